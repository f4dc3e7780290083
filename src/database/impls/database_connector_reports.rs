use log::debug;
use crate::database::enums::database_error::DatabaseError;
use crate::database::enums::optional_table::OptionalTable;
use crate::database::impls::database_connector::LOG_PREFIX;
use crate::database::structs::database_connector::DatabaseConnector;
use crate::database::structs::query_builder::QueryBuilder;
use crate::database::structs::report_party::ReportParty;

impl DatabaseConnector {
    /// Stores a report of `reporter` about `reporting`.
    ///
    /// With IPv6 connections enabled, an IPv6 party is stored with IP 0 and
    /// its address text in the `_ipv6` column.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn write_report(&self, reporter: &ReportParty, reporting: &ReportParty, info: &str) -> Result<(), DatabaseError> {
        let table = self.table(OptionalTable::PlayerReports)?;
        let ipv6_connection = self.config.server.ipv6_connection;

        let mut query = QueryBuilder::with("INSERT INTO ");
        query.push_str(table).push_str(match ipv6_connection {
            true => " (server_uid, reporter_ip, reporter_ipv6, reporter_online_id, reporter_username, \
                info, reporting_ip, reporting_ipv6, reporting_online_id, reporting_username) VALUES (",
            false => " (server_uid, reporter_ip, reporter_online_id, reporter_username, \
                info, reporting_ip, reporting_online_id, reporting_username) VALUES (",
        });
        query.push_bind(self.config.server.server_uid.as_str(), "server_uid", false);
        Self::push_party(&mut query, reporter, ipv6_connection, "reporter_name");
        query.push_str(", ").push_bind(info, "info", false);
        Self::push_party(&mut query, reporting, ipv6_connection, "reporting_name");
        query.push_str(");");
        self.execute(&query)
    }

    fn push_party(query: &mut QueryBuilder, party: &ReportParty, ipv6_connection: bool, name: &str) {
        let ipv6 = party.address.is_ipv6() && party.address.get_ip() == 0;
        if ipv6_connection {
            let ipv6_text = match ipv6 {
                true => party.address.readable(false),
                false => String::new(),
            };
            query.push_str(", ").push_value(if ipv6 { 0 } else { party.address.get_ip() })
                .push_str(", ").push_bind(ipv6_text, "ipv6", false);
        } else {
            query.push_str(", ").push_value(party.address.get_ip());
        }
        query.push_str(", ").push_value(party.online_id)
            .push_str(", ").push_bind(party.name.as_str(), name, false);
    }

    /// Deletes reports older than the configured retention.
    ///
    /// A retention of 0 days keeps every report.
    pub fn clear_old_reports(&self) -> Result<(), DatabaseError> {
        let table = self.table(OptionalTable::PlayerReports)?;
        let days = self.config.database.player_reports_expired_days;
        if days == 0.0 {
            debug!("{} Player reports never expire", LOG_PREFIX);
            return Ok(());
        }
        let mut query = QueryBuilder::with("DELETE FROM ");
        query.push_str(table)
            .push_str(" WHERE datetime(reported_time, '+")
            .push_value(format!("{days:.6}"))
            .push_str(" days') < datetime('now');");
        self.execute(&query)
    }
}
