//! Configuration management module.
//!
//! This module handles loading, parsing, and validating the server
//! configuration from TOML files.
//!
//! # Configuration Structure
//!
//! The main configuration file (`config.toml`) contains sections for:
//! - **server**: Server identity (`server_uid`), statistics schema version
//!   and whether peers may connect over IPv6
//! - **database**: SQLite file, busy timeout, poll interval, the names of the
//!   operator-owned ban/report/geolocation tables and report retention
//! - **network**: Address family policy, NAT64 prefix and whether the
//!   transport socket is dual-stack
//!
//! Every identifier that is spliced into SQL text (table names and the
//! server uid) is checked by [`Configuration::validate`].
//!
//! # Example
//!
//! ```rust,ignore
//! use kartnet::config::structs::configuration::Configuration;
//!
//! // Load configuration from file, creating a default one if missing
//! let config = Configuration::load_from_file("config.toml", true)?;
//!
//! // Generate default configuration
//! let default_config = Configuration::init();
//! Configuration::save_file("config.toml", toml::to_string(&default_config)?)?;
//! ```
//!
//! [`Configuration::validate`]: structs::configuration::Configuration::validate

/// Configuration enumerations (IP type, errors).
pub mod enums;

/// Configuration data structures.
pub mod structs;

/// Implementation blocks for configuration loading/saving.
pub mod impls;
