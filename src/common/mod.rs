//! Common utilities and shared functionality.
//!
//! This module contains helper functions and data structures used across
//! all other modules.
//!
//! # Utilities
//!
//! - Logging setup
//! - Client version and operating system extraction
//!
//! # Data Structures
//!
//! - `CustomError` - Custom error type
//!
//! # Example
//!
//! ```rust,ignore
//! use kartnet::common::common::extract_version_os;
//!
//! let (version, os) = extract_version_os("SuperTuxKart/1.4 (Linux)");
//! ```

/// Common data structures (errors).
pub mod structs;

/// Core utility functions.
#[allow(clippy::module_inception)]
pub mod common;

/// Implementation blocks for common types.
pub mod impls;
