//! Network data structures.

/// IPv4 endpoint (address octets and port).
pub mod ipv4_endpoint;

/// IPv6 endpoint (address octets, port and scope id).
pub mod ipv6_endpoint;

/// Transport-layer address in little-endian word layout.
pub mod enet_address;
