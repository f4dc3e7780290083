//! Database connector structures.

/// Main database connector owning the SQLite handle.
pub mod database_connector;

/// One positional parameter waiting to be bound.
pub mod binder;

/// Ordered parameters of one statement.
pub mod binder_collection;

/// Query text paired with its parameters.
pub mod query_builder;

/// Bounded retry policy for a busy database file.
pub mod busy_retry;

/// Which optional tables exist.
pub mod table_flags;

/// Row of the IPv4 range ban table.
pub mod ip_ban_table_data;

/// Row of the IPv6 CIDR ban table.
pub mod ipv6_ban_table_data;

/// Row of the online id ban table.
pub mod online_id_ban_table_data;

/// What the statistics table records about one peer.
pub mod peer_session;

/// One side of a player report.
pub mod report_party;

/// A ban that matched a connected peer.
pub mod ban_match;

/// Classification of one address for the operator console.
pub mod address_lookup;
