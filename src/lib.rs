//! # Kartnet
//!
//! Dual-stack peer addressing and the SQLite-backed moderation store used by
//! kart-racing game servers.
//!
//! ## Overview
//!
//! A game server accepts peers over a transport that may run on an IPv4 or a
//! dual-stack IPv6 socket. Kartnet gives it one address type for both
//! families, plus the database layer that decides whether a peer is banned,
//! where it connects from, and what it did while it was connected.
//!
//! ## Features
//!
//! - **Dual-stack addressing**: `SocketAddress` over IPv4 and IPv6, with
//!   IPv4-mapped unwrapping, NAT64 conversion and transport-struct round trips
//! - **Classification**: loopback, LAN (RFC 1918, ULA, link-local) and
//!   "is this one of my own interfaces"
//! - **Moderation**: IPv4 range, IPv6 CIDR and online-id bans with expiry and
//!   trigger counters
//! - **Statistics**: versioned per-server session table plus reporting views
//! - **Safe SQL**: a query builder that records bound parameters in the same
//!   call that writes their `?` placeholder
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use kartnet::config::structs::configuration::Configuration;
//! use kartnet::database::structs::database_connector::DatabaseConnector;
//! use kartnet::network::enums::socket_address::SocketAddress;
//!
//! let config = Arc::new(Configuration::load_from_file("config.toml", false)?);
//! let mut connector = DatabaseConnector::new(config);
//! connector.init_database(false);
//!
//! let peer = SocketAddress::new("203.0.113.7:2759");
//! let bans = connector.get_ip_ban_table_data(Some(peer.get_ip()));
//! ```
//!
//! ## Modules
//!
//! - [`common`] - Logging setup, client version parsing and the generic error type
//! - [`config`] - Configuration management and TOML parsing
//! - [`database`] - SQLite connector, query builder, bans, reports and stats
//! - [`network`] - IPv6 helpers, `SocketAddress` and transport addresses
//! - [`structs`] - CLI argument parsing

/// Common utilities and shared functionality.
///
/// Contains logging setup, client version parsing and the
/// message-only error type used by the binary.
pub mod common;

/// Configuration management module.
///
/// Handles loading, parsing, and validating configuration from TOML files.
/// Every identifier that ends up inside SQL text is validated here.
pub mod config;

/// Database module.
///
/// Owns the single SQLite handle, the parameter binder, the busy-retry
/// policy, and every ban, report, geolocation and statistics query.
pub mod database;

/// Network addressing module.
///
/// IPv6 primitives, the dual-stack `SocketAddress` and the transport-layer
/// address representation.
pub mod network;

/// CLI argument parsing.
pub mod structs;
