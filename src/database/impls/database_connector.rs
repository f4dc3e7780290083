use std::sync::Arc;
use std::time::{Duration, Instant};
use log::{debug, error, info, warn};
use rusqlite::{Connection, OpenFlags, Statement};
use crate::config::structs::configuration::Configuration;
use crate::database::enums::database_error::DatabaseError;
use crate::database::enums::optional_table::OptionalTable;
use crate::database::helpers::{column_text, register_ipv6_functions};
use crate::database::structs::binder_collection::BinderCollection;
use crate::database::structs::busy_retry::BusyRetry;
use crate::database::structs::database_connector::DatabaseConnector;
use crate::database::structs::query_builder::QueryBuilder;
use crate::database::structs::table_flags::TableFlags;
use crate::database::traits::peer_registry::PeerRegistry;

pub(crate) const LOG_PREFIX: &str = "[SQLite]";

/// Result rows, every column as text.
pub type QueryRows = Vec<Vec<String>>;

impl DatabaseConnector {
    pub fn new(config: Arc<Configuration>) -> DatabaseConnector {
        let retry = BusyRetry::from_timeout(config.database.timeout);
        DatabaseConnector {
            config,
            db: None,
            tables: TableFlags::default(),
            server_stats_table: String::new(),
            last_poll: Instant::now(),
            retry,
        }
    }

    /// Opens the configured database file and checks which optional tables exist.
    ///
    /// A file that cannot be opened is logged and leaves the connector
    /// without a handle; every later operation then reports
    /// [`DatabaseError::NotConfigured`].
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn init_database(&mut self, create_if_missing: bool) {
        self.last_poll = Instant::now();
        self.db = None;
        self.tables = TableFlags::default();
        self.server_stats_table.clear();

        let config = self.config.clone();
        if !config.database.enabled {
            info!("{} Database is disabled in the configuration", LOG_PREFIX);
            return;
        }

        let mut flags = OpenFlags::SQLITE_OPEN_SHARED_CACHE
            | OpenFlags::SQLITE_OPEN_FULL_MUTEX
            | OpenFlags::SQLITE_OPEN_READ_WRITE;
        if create_if_missing {
            flags |= OpenFlags::SQLITE_OPEN_CREATE;
        }
        let connection = match Connection::open_with_flags(&config.database.path, flags) {
            Ok(connection) => connection,
            Err(e) => {
                error!("{} Cannot open database {}: {}", LOG_PREFIX, config.database.path, e);
                return;
            }
        };

        // Contention is handled by BusyRetry, not by the engine.
        if let Err(e) = connection.busy_timeout(Duration::ZERO) {
            warn!("{} Unable to reset the busy timeout: {}", LOG_PREFIX, e);
        }
        if let Err(e) = register_ipv6_functions(&connection) {
            error!("{} Unable to register the IPv6 SQL functions: {}", LOG_PREFIX, e);
        }

        self.retry = BusyRetry::from_timeout(config.database.timeout);
        self.db = Some(connection);
        info!("{} Opened database {}", LOG_PREFIX, config.database.path);

        for table in OptionalTable::ALL {
            let name = table.table_name(&config.database);
            let exists = self.check_table_exists(name);
            self.tables.set(table, exists);
            match exists {
                true => info!("{} Using {} table {}", LOG_PREFIX, table.label(), name),
                false => debug!("{} No {} table {}", LOG_PREFIX, table.label(), name),
            }
        }
    }

    /// Writes the disconnect info of every connected peer and closes the
    /// handle.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn destroy_database(&mut self, registry: &dyn PeerRegistry) {
        if self.db.is_none() {
            return;
        }
        for peer in registry.connected_peers().iter().filter(|peer| !peer.ai) {
            if let Err(e) = self.write_disconnect_info(peer) {
                debug!("{} Disconnect info of host {} not written: {}", LOG_PREFIX, peer.host_id, e);
            }
        }
        if let Some(connection) = self.db.take() {
            if let Err((_, e)) = connection.close() {
                error!("{} Error closing the database: {}", LOG_PREFIX, e);
            }
        }
        self.tables = TableFlags::default();
        self.server_stats_table.clear();
    }

    /// Runs `query`, binding `binders` when given.
    ///
    /// Returns false when no database is open or the query fails; the
    /// failure is logged with the query text. On success `output`, when
    /// given, receives every row with NULL columns replaced by
    /// `null_value`.
    pub fn easy_sql_query(
        &self,
        query: &str,
        output: Option<&mut QueryRows>,
        binders: Option<&BinderCollection>,
        null_value: &str,
    ) -> bool {
        if self.db.is_none() {
            return false;
        }
        let bind = |statement: &mut Statement<'_>| match binders {
            Some(binders) => binders.bind_all(statement),
            None => Ok(()),
        };
        match self.run_statement(query, bind, null_value) {
            Ok((_, rows)) => {
                if let Some(output) = output {
                    *output = rows;
                }
                true
            }
            Err(_) => false,
        }
    }

    /// Rows of `query`; NULL columns become empty strings.
    pub fn query_rows(&self, query: &QueryBuilder) -> Result<QueryRows, DatabaseError> {
        self.query_named_rows(query).map(|(_, rows)| rows)
    }

    /// Column names and rows of `query`.
    pub fn query_named_rows(&self, query: &QueryBuilder) -> Result<(Vec<String>, QueryRows), DatabaseError> {
        self.run_statement(query.sql(), |statement| query.binders().bind_all(statement), "")
    }

    pub fn execute(&self, query: &QueryBuilder) -> Result<(), DatabaseError> {
        self.query_named_rows(query).map(|_| ())
    }

    /// Every statement reaches SQLite through here.
    fn run_statement<B>(&self, query: &str, bind: B, null_value: &str) -> Result<(Vec<String>, QueryRows), DatabaseError>
    where
        B: Fn(&mut Statement<'_>) -> rusqlite::Result<()>,
    {
        let connection = self.handle()?;
        self.retry
            .run(|| Self::step_all(connection, query, &bind, null_value))
            .map_err(|e| {
                error!("{} Error querying \"{}\": {}", LOG_PREFIX, query, e);
                DatabaseError::QueryFailed(e.to_string())
            })
    }

    fn step_all<B>(connection: &Connection, query: &str, bind: &B, null_value: &str) -> rusqlite::Result<(Vec<String>, QueryRows)>
    where
        B: Fn(&mut Statement<'_>) -> rusqlite::Result<()>,
    {
        let mut statement = connection.prepare(query)?;
        bind(&mut statement)?;
        let columns: Vec<String> = statement.column_names().into_iter().map(String::from).collect();
        let mut output = QueryRows::new();
        let mut rows = statement.raw_query();
        while let Some(row) = rows.next()? {
            let mut values = Vec::with_capacity(columns.len());
            for index in 0..columns.len() {
                values.push(column_text(row.get_ref(index)?, null_value));
            }
            output.push(values);
        }
        Ok((columns, output))
    }

    pub fn check_table_exists(&self, table: &str) -> bool {
        let mut query = QueryBuilder::with("SELECT count(type) FROM sqlite_master WHERE type='table' AND name=");
        query.push_bind(table, "table_name", false).push_str(";");
        match self.query_rows(&query) {
            Ok(rows) => rows
                .first()
                .and_then(|row| row.first())
                .is_some_and(|count| !count.is_empty() && count != "0"),
            Err(_) => false,
        }
    }

    pub(crate) fn handle(&self) -> Result<&Connection, DatabaseError> {
        self.db
            .as_ref()
            .ok_or_else(|| DatabaseError::NotConfigured(String::from("database is not open")))
    }

    /// Name of `table` when the handle is open and the table exists.
    pub(crate) fn table(&self, table: OptionalTable) -> Result<&str, DatabaseError> {
        self.handle()?;
        if !self.tables.get(table) {
            return Err(DatabaseError::NotConfigured(format!("{} table is missing", table.label())));
        }
        Ok(table.table_name(&self.config.database))
    }

    pub fn is_open(&self) -> bool {
        self.db.is_some()
    }

    pub fn config(&self) -> &Arc<Configuration> {
        &self.config
    }

    pub fn has_table(&self, table: OptionalTable) -> bool {
        self.is_open() && self.tables.get(table)
    }

    pub fn has_ip_ban_table(&self) -> bool {
        self.has_table(OptionalTable::IpBan)
    }

    pub fn has_ipv6_ban_table(&self) -> bool {
        self.has_table(OptionalTable::Ipv6Ban)
    }

    pub fn has_online_id_ban_table(&self) -> bool {
        self.has_table(OptionalTable::OnlineIdBan)
    }

    pub fn has_player_reports_table(&self) -> bool {
        self.has_table(OptionalTable::PlayerReports)
    }

    pub fn has_ip_geolocation_table(&self) -> bool {
        self.has_table(OptionalTable::IpGeolocation)
    }

    pub fn has_ipv6_geolocation_table(&self) -> bool {
        self.has_table(OptionalTable::Ipv6Geolocation)
    }

    pub fn has_server_stats_table(&self) -> bool {
        self.is_open() && !self.server_stats_table.is_empty()
    }

    pub fn server_stats_table(&self) -> &str {
        &self.server_stats_table
    }
}
