//! Database module.
//!
//! One SQLite handle per server, owned by [`DatabaseConnector`]. Every
//! query runs through a single choke point that prepares the statement,
//! binds the parameters collected by a [`QueryBuilder`], retries while the
//! file is locked by another process and copies result columns as text.
//!
//! The operator owns the ban, report and geolocation tables; the connector
//! only checks for them at start-up and disables the paths whose table is
//! missing. The versioned statistics table and its views are created by
//! the connector itself.
//!
//! [`DatabaseConnector`]: structs::database_connector::DatabaseConnector
//! [`QueryBuilder`]: structs::query_builder::QueryBuilder

pub mod enums;
pub mod helpers;
pub mod impls;
pub mod structs;
pub mod traits;
#[cfg(test)]
mod tests;
