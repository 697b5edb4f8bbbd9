//! Configuration types for the ACOS client SDK.
//!
//! This module provides the configuration used to reach an ACOS device and
//! tune the transport.
//!
//! # Overview
//!
//! - [`AcosConfig`]: The main configuration struct holding all SDK settings
//! - [`AcosConfigBuilder`]: A builder for constructing [`AcosConfig`] instances
//! - [`Host`]: A validated device host
//! - [`Username`] / [`Password`]: Admin credentials (password masked in debug output)
//! - [`Protocol`]: `http` or `https`
//!
//! # Example
//!
//! ```rust
//! use acos_client::{AcosConfig, Host, Password, Protocol, Username};
//!
//! let config = AcosConfig::builder()
//!     .host(Host::new("10.48.5.219").unwrap())
//!     .username(Username::new("admin").unwrap())
//!     .password(Password::new("a10"))
//!     .protocol(Protocol::Https)
//!     .retry_errnos([104, 111])
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.base_url(), "https://10.48.5.219:443");
//! ```

mod newtypes;
mod protocol;

pub use newtypes::{Host, Password, Username};
pub use protocol::Protocol;

use std::time::Duration;

use crate::clients::RetryPolicy;
use crate::error::ConfigError;

/// Default number of attempts made for a single logical request.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 1500;

/// Default pause between attempts that failed with a retryable error.
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(100);

/// Configuration for the ACOS client SDK.
///
/// # Thread Safety
///
/// `AcosConfig` is `Clone`, `Send`, and `Sync`.
#[derive(Clone, Debug)]
pub struct AcosConfig {
    host: Host,
    port: u16,
    protocol: Protocol,
    username: Username,
    password: Password,
    timeout: Option<Duration>,
    retry_errnos: Vec<i32>,
    max_attempts: u32,
    retry_delay: Duration,
    user_agent_prefix: Option<String>,
}

impl AcosConfig {
    /// Creates a new builder for constructing an `AcosConfig`.
    #[must_use]
    pub fn builder() -> AcosConfigBuilder {
        AcosConfigBuilder::new()
    }

    /// Returns the device host.
    #[must_use]
    pub const fn host(&self) -> &Host {
        &self.host
    }

    /// Returns the port, resolved from the protocol when not set explicitly.
    #[must_use]
    pub const fn port(&self) -> u16 {
        self.port
    }

    /// Returns the protocol.
    #[must_use]
    pub const fn protocol(&self) -> Protocol {
        self.protocol
    }

    /// Returns the admin username.
    #[must_use]
    pub const fn username(&self) -> &Username {
        &self.username
    }

    /// Returns the admin password.
    #[must_use]
    pub const fn password(&self) -> &Password {
        &self.password
    }

    /// Returns the per-request timeout, if configured.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Returns the OS error codes treated as transient.
    #[must_use]
    pub fn retry_errnos(&self) -> &[i32] {
        &self.retry_errnos
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns the base URL, `{protocol}://{host}:{port}`.
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("{}://{}:{}", self.protocol, self.host, self.port)
    }

    /// Builds the retry policy described by this configuration.
    #[must_use]
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.retry_errnos.iter().copied())
            .with_max_attempts(self.max_attempts)
            .with_delay(self.retry_delay)
    }
}

// Verify AcosConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<AcosConfig>();
};

/// Builder for constructing [`AcosConfig`] instances.
///
/// Required fields are `host`, `username` and `password`.
///
/// # Defaults
///
/// - `protocol`: `https`
/// - `port`: 80 for `http`, 443 otherwise
/// - `timeout`: `None`
/// - `retry_errnos`: empty
/// - `max_attempts`: 1500
/// - `retry_delay`: 100 ms
/// - `user_agent_prefix`: `None`
#[derive(Debug, Default)]
pub struct AcosConfigBuilder {
    host: Option<Host>,
    port: Option<u16>,
    protocol: Option<Protocol>,
    username: Option<Username>,
    password: Option<Password>,
    timeout: Option<Duration>,
    retry_errnos: Vec<i32>,
    max_attempts: Option<u32>,
    retry_delay: Option<Duration>,
    user_agent_prefix: Option<String>,
}

impl AcosConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the device host (required).
    #[must_use]
    pub fn host(mut self, host: Host) -> Self {
        self.host = Some(host);
        self
    }

    /// Sets the port explicitly.
    #[must_use]
    pub const fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Sets the protocol.
    #[must_use]
    pub const fn protocol(mut self, protocol: Protocol) -> Self {
        self.protocol = Some(protocol);
        self
    }

    /// Sets the admin username (required).
    #[must_use]
    pub fn username(mut self, username: Username) -> Self {
        self.username = Some(username);
        self
    }

    /// Sets the admin password (required).
    #[must_use]
    pub fn password(mut self, password: Password) -> Self {
        self.password = Some(password);
        self
    }

    /// Sets the per-request timeout applied by the HTTP library.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the OS error codes that are retried transparently.
    ///
    /// Typical values are `ECONNRESET` (104) and `ECONNREFUSED` (111).
    #[must_use]
    pub fn retry_errnos(mut self, errnos: impl IntoIterator<Item = i32>) -> Self {
        self.retry_errnos = errnos.into_iter().collect();
        self
    }

    /// Sets the attempt cap for a single logical request.
    #[must_use]
    pub const fn max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = Some(max_attempts);
        self
    }

    /// Sets the pause between retryable failures.
    #[must_use]
    pub const fn retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = Some(delay);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`AcosConfig`], validating that required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `host`, `username` or
    /// `password` are not set, and [`ConfigError::ZeroMaxAttempts`] if the
    /// attempt cap is zero.
    pub fn build(self) -> Result<AcosConfig, ConfigError> {
        let host = self
            .host
            .ok_or(ConfigError::MissingRequiredField { field: "host" })?;
        let username = self
            .username
            .ok_or(ConfigError::MissingRequiredField { field: "username" })?;
        let password = self
            .password
            .ok_or(ConfigError::MissingRequiredField { field: "password" })?;

        let max_attempts = self.max_attempts.unwrap_or(DEFAULT_MAX_ATTEMPTS);
        if max_attempts == 0 {
            return Err(ConfigError::ZeroMaxAttempts);
        }

        let protocol = self.protocol.unwrap_or_default();

        Ok(AcosConfig {
            host,
            port: self.port.unwrap_or_else(|| protocol.default_port()),
            protocol,
            username,
            password,
            timeout: self.timeout,
            retry_errnos: self.retry_errnos,
            max_attempts,
            retry_delay: self.retry_delay.unwrap_or(DEFAULT_RETRY_DELAY),
            user_agent_prefix: self.user_agent_prefix,
        })
    }
}
