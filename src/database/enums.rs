//! Database enumeration types.

/// Kind of ban that matched a peer.
pub mod ban_kind;

/// Errors returned by connector operations.
pub mod database_error;

/// Operator-owned tables checked at start-up.
pub mod optional_table;
