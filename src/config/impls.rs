//! Implementation blocks for configuration types.

/// Loading, saving and validating the root configuration.
pub mod configuration;

/// Display and error implementations for configuration errors.
pub mod configuration_error;

/// NAT64 prefix helpers.
pub mod network_config;
