use std::sync::Arc;
use std::time::Instant;
use rusqlite::Connection;
use crate::config::structs::configuration::Configuration;
use crate::database::structs::busy_retry::BusyRetry;
use crate::database::structs::table_flags::TableFlags;

#[derive(Debug)]
pub struct DatabaseConnector {
    pub(crate) config: Arc<Configuration>,
    pub(crate) db: Option<Connection>,
    pub(crate) tables: TableFlags,
    /// Versioned statistics table, empty until created.
    pub(crate) server_stats_table: String,
    pub(crate) last_poll: Instant,
    pub(crate) retry: BusyRetry,
}
