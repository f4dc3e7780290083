//! Implementation blocks for network types.

/// Family selector helpers.
pub mod address_family;

/// Construction, classification and serialization of socket addresses.
pub mod socket_address;

/// Parsing and name resolution of textual addresses.
pub mod socket_address_resolve;

/// Conversions between transport addresses and socket addresses.
pub mod enet_address;
