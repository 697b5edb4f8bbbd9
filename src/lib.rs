//! # ACOS aXAPI Rust Client
//!
//! A thin client for the A10 ACOS aXAPI v3 management API: validated
//! configuration, session authentication, JSON request and response
//! handling, and retries of transient socket errors.
//!
//! ## Overview
//!
//! This SDK provides:
//! - Type-safe configuration via [`AcosConfig`] and [`AcosConfigBuilder`]
//! - Validated newtypes for the device endpoint and credentials
//! - An async [`HttpClient`] that retries allow-listed socket errors and
//!   maps aXAPI failure envelopes to typed errors
//! - A [`Session`] that logs in lazily and logs off on close
//! - Active partition switching via [`auth::partition`]
//!
//! ## Quick Start
//!
//! ```rust
//! use acos_client::{AcosConfig, Host, Password, Protocol, Username};
//!
//! let config = AcosConfig::builder()
//!     .host(Host::new("10.0.0.1").unwrap())
//!     .username(Username::new("admin").unwrap())
//!     .password(Password::new("a10"))
//!     .protocol(Protocol::Https)
//!     .retry_errnos([104, 111, 113])
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.base_url(), "https://10.0.0.1:443");
//! ```
//!
//! ## Making API Requests
//!
//! ```rust,ignore
//! use acos_client::AcosClient;
//! use serde_json::json;
//!
//! let mut client = AcosClient::new(config)?;
//!
//! // Logs in on first use; the signature is cached afterwards.
//! let headers = client.session_mut().authorization_header().await?;
//!
//! let server = json!({"server": {"name": "s1", "host": "10.0.0.5"}});
//! client.http().post("/axapi/v3/slb/server", Some(server), headers).await?;
//!
//! client.close().await?;
//! ```
//!
//! ## Retries
//!
//! Each request is attempted up to 1500 times, 100 ms apart, while the
//! failure is a socket error on the configured allow-list or a malformed
//! status line. Anything else fails immediately. Both limits are
//! configurable on the builder.
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: All newtypes validate on construction
//! - **Thread-safe**: Configuration and HTTP client are `Send + Sync`
//! - **Async-first**: Designed for use with Tokio async runtime
//! - **No logging setup**: The library emits `tracing` events; installing a
//!   subscriber is left to the application

pub mod auth;
mod client;
pub mod clients;
pub mod config;
pub mod error;

pub use client::AcosClient;

// Re-export public types at crate root for convenience
pub use auth::Session;
pub use config::{AcosConfig, AcosConfigBuilder, Host, Password, Protocol, Username};
pub use error::ConfigError;

// Re-export HTTP client types
pub use clients::{
    is_retryable, ApiError, AuthSchemaError, AxapiResponse, DecodeError, HttpClient, HttpError,
    HttpMethod, HttpRequest, HttpRequestBuilder, HttpResponse, InvalidHttpRequestError,
    MaxRetriesExceededError, RetryPolicy, Transport, TransportError,
};
