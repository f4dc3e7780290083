use crate::config::structs::database_config::DatabaseConfig;
use crate::database::enums::optional_table::OptionalTable;

impl OptionalTable {
    pub const ALL: [OptionalTable; 6] = [
        OptionalTable::IpBan,
        OptionalTable::Ipv6Ban,
        OptionalTable::OnlineIdBan,
        OptionalTable::PlayerReports,
        OptionalTable::IpGeolocation,
        OptionalTable::Ipv6Geolocation,
    ];

    pub fn table_name<'a>(&self, config: &'a DatabaseConfig) -> &'a str {
        match self {
            OptionalTable::IpBan => &config.ip_ban_table,
            OptionalTable::Ipv6Ban => &config.ipv6_ban_table,
            OptionalTable::OnlineIdBan => &config.online_id_ban_table,
            OptionalTable::PlayerReports => &config.player_reports_table,
            OptionalTable::IpGeolocation => &config.ip_geolocation_table,
            OptionalTable::Ipv6Geolocation => &config.ipv6_geolocation_table,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            OptionalTable::IpBan => "IP ban",
            OptionalTable::Ipv6Ban => "IPv6 ban",
            OptionalTable::OnlineIdBan => "online id ban",
            OptionalTable::PlayerReports => "player reports",
            OptionalTable::IpGeolocation => "IP geolocation",
            OptionalTable::Ipv6Geolocation => "IPv6 geolocation",
        }
    }
}
