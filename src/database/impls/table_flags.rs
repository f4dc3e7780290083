use crate::database::enums::optional_table::OptionalTable;
use crate::database::structs::table_flags::TableFlags;

impl TableFlags {
    pub fn get(&self, table: OptionalTable) -> bool {
        match table {
            OptionalTable::IpBan => self.ip_ban,
            OptionalTable::Ipv6Ban => self.ipv6_ban,
            OptionalTable::OnlineIdBan => self.online_id_ban,
            OptionalTable::PlayerReports => self.player_reports,
            OptionalTable::IpGeolocation => self.ip_geolocation,
            OptionalTable::Ipv6Geolocation => self.ipv6_geolocation,
        }
    }

    pub fn set(&mut self, table: OptionalTable, exists: bool) {
        let flag = match table {
            OptionalTable::IpBan => &mut self.ip_ban,
            OptionalTable::Ipv6Ban => &mut self.ipv6_ban,
            OptionalTable::OnlineIdBan => &mut self.online_id_ban,
            OptionalTable::PlayerReports => &mut self.player_reports,
            OptionalTable::IpGeolocation => &mut self.ip_geolocation,
            OptionalTable::Ipv6Geolocation => &mut self.ipv6_geolocation,
        };
        *flag = exists;
    }
}
