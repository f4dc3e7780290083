use log::{debug, info};
use crate::common::common::extract_version_os;
use crate::database::enums::database_error::DatabaseError;
use crate::database::helpers::has_window_functions;
use crate::database::impls::database_connector::LOG_PREFIX;
use crate::database::structs::database_connector::DatabaseConnector;
use crate::database::structs::peer_session::PeerSession;
use crate::database::structs::query_builder::QueryBuilder;
use crate::database::traits::peer_registry::PeerRegistry;

const MINUTES_PLAYED: &str = "(STRFTIME('%s', disconnected_time) - STRFTIME('%s', connected_time)) / 60.0";

impl DatabaseConnector {
    /// `v<version>_<server uid>_<suffix>`
    pub fn versioned_name(&self, suffix: &str) -> String {
        format!("v{}_{}_{}", self.config.server.server_db_version, self.config.server.server_uid, suffix)
    }

    pub fn countries_table_name(&self) -> String {
        format!("v{}_countries", self.config.server.server_db_version)
    }

    /// Creates the statistics table, the countries table and the reporting
    /// views when missing.
    ///
    /// Host id allocation resumes after the highest stored id, and sessions
    /// a crash left open are closed. Returns that highest id.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn init_server_stats_table(&mut self, registry: &dyn PeerRegistry) -> Result<u32, DatabaseError> {
        self.handle()?;
        self.server_stats_table.clear();
        let ipv6_connection = self.config.server.ipv6_connection;
        let table = self.versioned_name("stats");

        let mut create = QueryBuilder::with("CREATE TABLE IF NOT EXISTS ");
        create.push_str(&table).push_str(" (\n")
            .push_str("    host_id INTEGER UNSIGNED NOT NULL PRIMARY KEY,\n")
            .push_str("    ip INTEGER UNSIGNED NOT NULL,\n");
        if ipv6_connection {
            create.push_str("    ipv6 TEXT NOT NULL DEFAULT '',\n");
        }
        create.push_str("    port INTEGER UNSIGNED NOT NULL,\n")
            .push_str("    online_id INTEGER UNSIGNED NOT NULL,\n")
            .push_str("    username TEXT NOT NULL,\n")
            .push_str("    player_num INTEGER UNSIGNED NOT NULL,\n")
            .push_str("    country_code TEXT NULL DEFAULT NULL,\n")
            .push_str("    version TEXT NOT NULL,\n")
            .push_str("    os TEXT NOT NULL,\n")
            .push_str("    connected_time TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,\n")
            .push_str("    disconnected_time TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,\n")
            .push_str("    ping INTEGER UNSIGNED NOT NULL DEFAULT 0,\n")
            .push_str("    packet_loss INTEGER NOT NULL DEFAULT 0\n")
            .push_str(") WITHOUT ROWID;");
        self.execute(&create)?;
        self.server_stats_table = table.clone();

        let countries = self.countries_table_name();
        let mut query = QueryBuilder::with("CREATE TABLE IF NOT EXISTS ");
        query.push_str(&countries).push_str(" (\n")
            .push_str("    country_code TEXT NOT NULL PRIMARY KEY UNIQUE,\n")
            .push_str("    country_flag TEXT NOT NULL,\n")
            .push_str("    country_name TEXT NOT NULL\n")
            .push_str(") WITHOUT ROWID;");
        self.log_failure(self.execute(&query));

        let full_stats = self.versioned_name("full_stats");
        self.log_failure(self.execute(&self.player_view_query(&full_stats, &table, &countries, false)));
        let current_players = self.versioned_name("current_players");
        self.log_failure(self.execute(&self.player_view_query(&current_players, &table, &countries, true)));
        let player_stats = self.versioned_name("player_stats");
        self.log_failure(self.execute(&self.player_stats_view_query(&player_stats, &table, &full_stats)));

        let mut query = QueryBuilder::with("SELECT MAX(host_id) FROM ");
        query.push_str(&table).push_str(";");
        let last_host_id = match self.query_rows(&query) {
            Ok(rows) => rows
                .first()
                .and_then(|row| row.first())
                .and_then(|value| value.parse::<u32>().ok())
                .unwrap_or(0),
            Err(e) => {
                self.server_stats_table.clear();
                return Err(e);
            }
        };
        info!("{} {} was the last server session max host id", LOG_PREFIX, last_host_id);
        registry.set_next_host_id(last_host_id);

        let mut query = QueryBuilder::with("UPDATE ");
        query.push_str(&table)
            .push_str(" SET disconnected_time = datetime('now') WHERE connected_time = disconnected_time;");
        self.log_failure(self.execute(&query));
        Ok(last_host_id)
    }

    /// `_full_stats` lists every session; `_current_players` only the open
    /// ones, timed up to now.
    fn player_view_query(&self, view: &str, table: &str, countries: &str, current_only: bool) -> QueryBuilder {
        let mut query = QueryBuilder::with("CREATE VIEW IF NOT EXISTS ");
        query.push_str(view).push_str(" AS\n")
            .push_str("    SELECT host_id, ip,\n")
            .push_str("    ((ip >> 24) & 255) ||'.'|| ((ip >> 16) & 255) ||'.'|| ((ip >> 8) & 255) ||'.'|| (ip & 255) AS ip_readable,\n");
        if self.config.server.ipv6_connection {
            query.push_str("    ipv6,");
        }
        query.push_str("    port, online_id, username, player_num,\n")
            .push_str("    ").push_str(table)
            .push_str(".country_code AS country_code, country_flag, country_name, version, os,\n");
        match current_only {
            true => query
                .push_str("    ROUND((STRFTIME('%s', 'now') - STRFTIME('%s', connected_time)) / 60.0, 2) AS time_played,\n")
                .push_str("    connected_time, ping FROM "),
            false => query
                .push_str("    ROUND(").push_str(MINUTES_PLAYED).push_str(", 2) AS time_played,\n")
                .push_str("    connected_time, disconnected_time, ping, packet_loss FROM "),
        };
        query.push_str(table)
            .push_str("\n    LEFT JOIN ").push_str(countries)
            .push_str(" ON ").push_str(countries).push_str(".country_code = ")
            .push_str(table).push_str(".country_code\n");
        match current_only {
            true => query.push_str("    WHERE connected_time = disconnected_time;"),
            false => query.push_str("    ORDER BY connected_time DESC;"),
        };
        query
    }

    /// Per online id totals; with window function support it also carries
    /// the latest session of each player.
    fn player_stats_view_query(&self, view: &str, table: &str, full_stats: &str) -> QueryBuilder {
        let mut query = QueryBuilder::with("CREATE VIEW IF NOT EXISTS ");
        query.push_str(view).push_str(" AS\n");
        if !has_window_functions() {
            query.push_str("    SELECT online_id, username, COUNT(online_id) AS num_connections,\n")
                .push_str("    MIN(connected_time) AS first_connected_time,\n")
                .push_str("    MAX(connected_time) AS last_connected_time,\n");
            Self::push_time_played_aggregates(&mut query, "    ");
            query.push_str("    FROM ").push_str(table).push_str("\n")
                .push_str("    WHERE online_id != 0 GROUP BY online_id ORDER BY num_connections DESC;");
            return query;
        }

        query.push_str("    SELECT a.online_id, a.username, a.ip, a.ip_readable,\n");
        if self.config.server.ipv6_connection {
            query.push_str("    a.ipv6,");
        }
        query.push_str("    a.port, a.player_num,\n")
            .push_str("    a.country_code, a.country_flag, a.country_name, a.version, a.os, a.ping, a.packet_loss,\n")
            .push_str("    b.num_connections, b.first_connected_time, b.first_disconnected_time,\n")
            .push_str("    a.connected_time AS last_connected_time, a.disconnected_time AS last_disconnected_time,\n")
            .push_str("    a.time_played AS last_time_played, b.total_time_played, b.average_time_played,\n")
            .push_str("    b.min_time_played, b.max_time_played\n")
            .push_str("    FROM\n    (\n")
            .push_str("        SELECT *, ROW_NUMBER() OVER (PARTITION BY online_id ORDER BY connected_time DESC) RowNum\n")
            .push_str("        FROM ").push_str(full_stats).push_str(" WHERE online_id != 0\n")
            .push_str("    ) AS a\n    JOIN\n    (\n")
            .push_str("        SELECT online_id, COUNT(online_id) AS num_connections,\n")
            .push_str("        MIN(connected_time) AS first_connected_time,\n")
            .push_str("        MIN(disconnected_time) AS first_disconnected_time,\n");
        Self::push_time_played_aggregates(&mut query, "        ");
        query.push_str("        FROM ").push_str(table).push_str(" WHERE online_id != 0 GROUP BY online_id\n")
            .push_str("    ) AS b\n")
            .push_str("    ON b.online_id = a.online_id\n")
            .push_str("    WHERE RowNum = 1 ORDER BY num_connections DESC;");
        query
    }

    fn push_time_played_aggregates(query: &mut QueryBuilder, indent: &str) {
        let aggregates = [("SUM", "total"), ("AVG", "average"), ("MIN", "min"), ("MAX", "max")];
        for (index, (function, name)) in aggregates.iter().enumerate() {
            query.push_str(indent)
                .push_str("ROUND(").push_str(function).push_str("(").push_str(MINUTES_PLAYED)
                .push_str("), 2) AS ").push_str(name).push_str("_time_played");
            query.push_str(if index + 1 == aggregates.len() { "\n" } else { ",\n" });
        }
    }

    fn log_failure(&self, result: Result<(), DatabaseError>) {
        if let Err(e) = result {
            debug!("{} Statistics setup step failed: {}", LOG_PREFIX, e);
        }
    }

    /// Records a peer that just joined.
    ///
    /// AI peers are skipped. With IPv6 connections enabled, an IPv6 peer is
    /// stored with IP 0 and its address text in the `ipv6` column. An empty
    /// `country_code` is stored as NULL.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn on_player_join_queries(&self, peer: &PeerSession, online_id: u32, player_count: u32, country_code: &str) -> Result<(), DatabaseError> {
        self.stats_table()?;
        if peer.ai {
            debug!("{} Not recording AI peer {}", LOG_PREFIX, peer.host_id);
            return Ok(());
        }
        let (version, os) = extract_version_os(&peer.user_version);
        let ipv6 = self.config.server.ipv6_connection && peer.address.is_ipv6() && peer.address.get_ip() == 0;

        let mut query = QueryBuilder::with("INSERT INTO ");
        query.push_str(&self.server_stats_table);
        match ipv6 {
            true => query
                .push_str(" (host_id, ip, ipv6, port, online_id, username, player_num, country_code, version, os, ping) VALUES (")
                .push_value(peer.host_id)
                .push_str(", 0, ")
                .push_bind(peer.address.readable(false), "ipv6", false),
            false => query
                .push_str(" (host_id, ip, port, online_id, username, player_num, country_code, version, os, ping) VALUES (")
                .push_value(peer.host_id)
                .push_str(", ")
                .push_value(peer.address.get_ip()),
        };
        query.push_str(", ").push_value(peer.address.get_port())
            .push_str(", ").push_value(online_id)
            .push_str(", ").push_bind(peer.username.as_str(), "player_name", false)
            .push_str(", ").push_value(player_count)
            .push_str(", ").push_bind(country_code, "country_code", true)
            .push_str(", ").push_bind(version, "version", false)
            .push_str(", ").push_bind(os, "os", false)
            .push_str(", ").push_value(peer.average_ping)
            .push_str(");");
        self.execute(&query)
    }

    /// Stamps the disconnect time, ping and packet loss of one session.
    pub fn write_disconnect_info(&self, peer: &PeerSession) -> Result<(), DatabaseError> {
        self.stats_table()?;
        let mut query = QueryBuilder::with("UPDATE ");
        query.push_str(&self.server_stats_table)
            .push_str(" SET disconnected_time = datetime('now'), ping = ").push_value(peer.average_ping)
            .push_str(", packet_loss = ").push_value(peer.packet_loss)
            .push_str(" WHERE host_id = ").push_value(peer.host_id)
            .push_str(";");
        self.execute(&query)
    }

    /// Closes every open session whose host is not in `present_hosts`.
    pub fn set_disconnection_times(&self, present_hosts: &[u32]) -> Result<(), DatabaseError> {
        self.stats_table()?;
        let mut query = QueryBuilder::with("UPDATE ");
        query.push_str(&self.server_stats_table)
            .push_str(" SET disconnected_time = datetime('now') WHERE connected_time = disconnected_time");
        if !present_hosts.is_empty() {
            query.push_str(" AND host_id NOT IN (").push_list(present_hosts, ",").push_str(")");
        }
        query.push_str(";");
        self.execute(&query)
    }

    fn stats_table(&self) -> Result<&str, DatabaseError> {
        self.handle()?;
        if self.server_stats_table.is_empty() {
            return Err(DatabaseError::NotConfigured(String::from("server stats table is missing")));
        }
        Ok(&self.server_stats_table)
    }
}
