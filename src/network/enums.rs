//! Network enumeration types.

/// Address family selector used during name resolution.
pub mod address_family;

/// The dual-stack socket address sum type.
pub mod socket_address;
