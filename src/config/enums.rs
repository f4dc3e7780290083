//! Configuration enumeration types.

/// Errors raised while reading, writing or validating configuration.
pub mod configuration_error;

/// Address family policy of the host network.
pub mod ip_type;
