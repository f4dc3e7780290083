use log::{debug, info, warn};
use crate::database::enums::database_error::DatabaseError;
use crate::database::enums::optional_table::OptionalTable;
use crate::database::helpers::BAN_ACTIVE_FILTER;
use crate::database::impls::database_connector::{QueryRows, LOG_PREFIX};
use crate::database::structs::database_connector::DatabaseConnector;
use crate::database::structs::ip_ban_table_data::IpBanTableData;
use crate::database::structs::ipv6_ban_table_data::Ipv6BanTableData;
use crate::database::structs::online_id_ban_table_data::OnlineIdBanTableData;
use crate::database::structs::query_builder::QueryBuilder;
use crate::network::enums::socket_address::SocketAddress;

/// Column names and rows of one ban table.
pub type BanTableListing = (String, Vec<String>, QueryRows);

impl DatabaseConnector {
    /// Active IPv4 range bans, all of them or the first one covering `ip`.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn get_ip_ban_table_data(&self, ip: Option<u32>) -> Result<Vec<IpBanTableData>, DatabaseError> {
        let table = self.table(OptionalTable::IpBan)?;
        let mut query = QueryBuilder::with("SELECT rowid, ip_start, ip_end, reason, description FROM ");
        query.push_str(table).push_str(" WHERE ");
        if let Some(ip) = ip {
            query.push_str("ip_start <= ").push_value(ip)
                .push_str(" AND ip_end >= ").push_value(ip)
                .push_str(" AND ");
        }
        query.push_str(BAN_ACTIVE_FILTER);
        if ip.is_some() {
            query.push_str(" LIMIT 1");
        }
        query.push_str(";");

        Ok(self.query_rows(&query)?
            .into_iter()
            .filter_map(|row| {
                Some(IpBanTableData {
                    row_id: row.first()?.parse().ok()?,
                    ip_start: row.get(1)?.parse().ok()?,
                    ip_end: row.get(2)?.parse().ok()?,
                    reason: row.get(3)?.clone(),
                    description: row.get(4)?.clone(),
                })
            })
            .collect())
    }

    /// Active IPv6 CIDR bans, all of them or the first one containing
    /// `ipv6`. An empty address counts as no address.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn get_ipv6_ban_table_data(&self, ipv6: Option<&str>) -> Result<Vec<Ipv6BanTableData>, DatabaseError> {
        let table = self.table(OptionalTable::Ipv6Ban)?;
        let ipv6 = ipv6.filter(|address| !address.is_empty());
        let mut query = QueryBuilder::with("SELECT rowid, ipv6_cidr, reason, description FROM ");
        query.push_str(table).push_str(" WHERE ");
        if let Some(address) = ipv6 {
            query.push_str("insideIPv6CIDR(ipv6_cidr, ")
                .push_bind(address, "ipv6", false)
                .push_str(") = 1 AND ");
        }
        query.push_str(BAN_ACTIVE_FILTER);
        if ipv6.is_some() {
            query.push_str(" LIMIT 1");
        }
        query.push_str(";");

        Ok(self.query_rows(&query)?
            .into_iter()
            .filter_map(|row| {
                Some(Ipv6BanTableData {
                    row_id: row.first()?.parse().ok()?,
                    ipv6_cidr: row.get(1)?.clone(),
                    reason: row.get(2)?.clone(),
                    description: row.get(3)?.clone(),
                })
            })
            .collect())
    }

    /// Active online id bans, all of them or the first one for `online_id`.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn get_online_id_ban_table_data(&self, online_id: Option<u32>) -> Result<Vec<OnlineIdBanTableData>, DatabaseError> {
        let table = self.table(OptionalTable::OnlineIdBan)?;
        let mut query = QueryBuilder::with("SELECT rowid, online_id, reason, description FROM ");
        query.push_str(table).push_str(" WHERE ");
        if let Some(online_id) = online_id {
            query.push_str("online_id = ").push_value(online_id).push_str(" AND ");
        }
        query.push_str(BAN_ACTIVE_FILTER);
        if online_id.is_some() {
            query.push_str(" LIMIT 1");
        }
        query.push_str(";");

        Ok(self.query_rows(&query)?
            .into_iter()
            .filter_map(|row| {
                Some(OnlineIdBanTableData {
                    row_id: row.first()?.parse().ok()?,
                    online_id: row.get(1)?.parse().ok()?,
                    reason: row.get(2)?.clone(),
                    description: row.get(3)?.clone(),
                })
            })
            .collect())
    }

    pub fn increase_ip_ban_trigger_count(&self, ip_start: u32, ip_end: u32) -> Result<(), DatabaseError> {
        let table = self.table(OptionalTable::IpBan)?;
        let mut query = QueryBuilder::with("UPDATE ");
        query.push_str(table)
            .push_str(" SET trigger_count = trigger_count + 1, last_trigger = datetime('now') WHERE ip_start = ")
            .push_value(ip_start)
            .push_str(" AND ip_end = ")
            .push_value(ip_end)
            .push_str(";");
        self.execute(&query)
    }

    pub fn increase_ipv6_ban_trigger_count(&self, ipv6_cidr: &str) -> Result<(), DatabaseError> {
        let table = self.table(OptionalTable::Ipv6Ban)?;
        let mut query = QueryBuilder::with("UPDATE ");
        query.push_str(table)
            .push_str(" SET trigger_count = trigger_count + 1, last_trigger = datetime('now') WHERE ipv6_cidr = ")
            .push_bind(ipv6_cidr, "ipv6_cidr", false)
            .push_str(";");
        self.execute(&query)
    }

    pub fn increase_online_id_ban_trigger_count(&self, online_id: u32) -> Result<(), DatabaseError> {
        let table = self.table(OptionalTable::OnlineIdBan)?;
        let mut query = QueryBuilder::with("UPDATE ");
        query.push_str(table)
            .push_str(" SET trigger_count = trigger_count + 1, last_trigger = datetime('now') WHERE online_id = ")
            .push_value(online_id)
            .push_str(";");
        self.execute(&query)
    }

    /// Bans exactly this IPv4 address with no expiry.
    ///
    /// IPv6 addresses cannot be stored in the IPv4 range table and are
    /// rejected.
    pub fn save_address_to_ip_ban_table(&self, address: &SocketAddress) -> Result<(), DatabaseError> {
        let table = self.table(OptionalTable::IpBan)?;
        let ip = address.get_ip();
        if address.is_unset() || ip == 0 {
            warn!("{} Only IPv4 addresses can be added to {}", LOG_PREFIX, table);
            return Err(DatabaseError::InvalidInput(format!("{} is not an IPv4 address", address.readable(false))));
        }
        let mut query = QueryBuilder::with("INSERT INTO ");
        query.push_str(table)
            .push_str(" (ip_start, ip_end) VALUES (")
            .push_value(ip)
            .push_str(", ")
            .push_value(ip)
            .push_str(");");
        self.execute(&query)?;
        info!("{} Added {} to {}", LOG_PREFIX, address.readable(false), table);
        Ok(())
    }

    /// Every row of the IPv4, IPv6 and online id ban tables that exist,
    /// expired rows included.
    pub fn list_ban_tables(&self) -> Result<Vec<BanTableListing>, DatabaseError> {
        self.handle()?;
        let mut listings = Vec::new();
        for table in [OptionalTable::IpBan, OptionalTable::Ipv6Ban, OptionalTable::OnlineIdBan] {
            let name = match self.table(table) {
                Ok(name) => name,
                Err(e) => {
                    debug!("{} Skipping {}: {}", LOG_PREFIX, table.label(), e);
                    continue;
                }
            };
            let mut query = QueryBuilder::with("SELECT * FROM ");
            query.push_str(name).push_str(";");
            let (columns, rows) = self.query_named_rows(&query)?;
            listings.push((name.to_string(), columns, rows));
        }
        Ok(listings)
    }
}
