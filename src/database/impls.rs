//! Implementation blocks for database types.

pub mod binder;
pub mod binder_collection;
pub mod busy_retry;
pub mod database_connector;
pub mod database_connector_bans;
pub mod database_connector_geolocation;
pub mod database_connector_poll;
pub mod database_connector_reports;
pub mod database_connector_stats;
pub mod optional_table;
pub mod query_builder;
pub mod table_flags;
