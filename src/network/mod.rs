//! Network addressing module.
//!
//! Peers reach the server over IPv4 or over a dual-stack IPv6 socket. This
//! module gives both families one value type and the helpers needed to compare,
//! classify and print them.
//!
//! # Components
//!
//! - `ipv6` - pure IPv6 helpers (CIDR containment, 64-bit upper bound,
//!   canonical text, equality)
//! - `SocketAddress` - tagged union over an IPv4 and an IPv6 endpoint
//! - `ENetAddress` - the little-endian word layout the transport layer uses
//!
//! # Example
//!
//! ```rust,ignore
//! use kartnet::network::enums::socket_address::SocketAddress;
//!
//! let peer = SocketAddress::new("[fe80::1]:2759");
//! assert!(peer.is_lan());
//! assert_eq!(peer.readable(true), "[fe80::1]:2759");
//! ```

/// Address family and socket address enumerations.
pub mod enums;

/// IPv6 primitive helpers.
pub mod ipv6;

/// Endpoint and transport address structures.
pub mod structs;

/// Implementation blocks for network types.
pub mod impls;
