//! Transport protocol definitions.
//!
//! This module provides the [`Protocol`] enum used to build the endpoint
//! base URL and pick the default port.

use crate::error::ConfigError;
use std::fmt;
use std::str::FromStr;

/// URL scheme used to reach the device.
///
/// # Example
///
/// ```rust
/// use acos_client::Protocol;
///
/// let protocol: Protocol = "HTTP".parse().unwrap();
/// assert_eq!(protocol, Protocol::Http);
/// assert_eq!(protocol.default_port(), 80);
/// assert_eq!(Protocol::default(), Protocol::Https);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Protocol {
    /// Plain HTTP.
    Http,
    /// HTTP over TLS.
    #[default]
    Https,
}

impl Protocol {
    /// Returns the port used when none is configured.
    ///
    /// Only plain HTTP maps to 80; everything else uses 443.
    #[must_use]
    pub const fn default_port(self) -> u16 {
        match self {
            Self::Http => 80,
            Self::Https => 443,
        }
    }

    /// Returns the URL scheme string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Http => "http",
            Self::Https => "https",
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Protocol {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "http" => Ok(Self::Http),
            "https" => Ok(Self::Https),
            other => Err(ConfigError::InvalidProtocol {
                protocol: other.to_string(),
            }),
        }
    }
}
