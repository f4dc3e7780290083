//! Configuration data structures.
//!
//! Each struct corresponds to a section in the TOML configuration file.

/// Root configuration structure containing all settings.
pub mod configuration;

/// Server identity and statistics settings.
pub mod server_config;

/// SQLite file, timeouts and table names.
pub mod database_config;

/// Address family policy and NAT64 prefix.
pub mod network_config;
