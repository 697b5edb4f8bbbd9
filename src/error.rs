//! Error types for the ACOS client SDK.
//!
//! This module contains the configuration and validation errors raised while
//! building an [`AcosConfig`](crate::AcosConfig). Errors raised while talking
//! to the device live in [`clients`](crate::clients).
//!
//! # Example
//!
//! ```rust
//! use acos_client::{ConfigError, Host};
//!
//! let result = Host::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyHost)));
//! ```

use thiserror::Error;

/// Errors that can occur during SDK configuration.
///
/// Each variant provides a clear, actionable error message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Host cannot be empty.
    #[error("Host cannot be empty. Please provide the address of the ACOS device.")]
    EmptyHost,

    /// Host contains a scheme, path, or whitespace.
    #[error("Invalid host '{host}'. Expected a bare hostname or IP address (e.g., '10.0.0.1'), without scheme or path.")]
    InvalidHost {
        /// The invalid host that was provided.
        host: String,
    },

    /// Username cannot be empty.
    #[error("Username cannot be empty.")]
    EmptyUsername,

    /// Protocol is not one of the supported schemes.
    #[error("Invalid protocol '{protocol}'. Expected 'http' or 'https'.")]
    InvalidProtocol {
        /// The invalid protocol string that was provided.
        protocol: String,
    },

    /// The retry budget must allow at least one attempt.
    #[error("max_attempts must be at least 1.")]
    ZeroMaxAttempts,

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },
}
