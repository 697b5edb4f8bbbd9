//! HTTP-specific error types for the ACOS client SDK.
//!
//! # Error Handling
//!
//! - [`InvalidHttpRequestError`]: A request failed validation before sending
//! - [`TransportError`]: A network-level failure from a single attempt
//! - [`MaxRetriesExceededError`]: Every attempt failed with a retryable error
//! - [`DecodeError`]: A non-200 response carried a body that is not JSON
//! - [`ApiError`]: The device answered with `"status": "fail"`
//! - [`AuthSchemaError`]: The device answered with an authorization schema
//! - [`HttpError`]: Unified error type encompassing all of the above
//!
//! # Example
//!
//! ```rust,ignore
//! use acos_client::clients::HttpError;
//!
//! match client.get("/axapi/v3/slb/server", None, None).await {
//!     Ok(response) => println!("{:?}", response.json()),
//!     Err(HttpError::Api(e)) => println!("device rejected {} {}: {:?}", e.method, e.path, e.msg),
//!     Err(HttpError::MaxRetries(e)) => println!("gave up after {} tries", e.tries),
//!     Err(other) => println!("request failed: {other}"),
//! }
//! ```

use std::error::Error as StdError;
use std::io;

use thiserror::Error;

use crate::clients::http_request::HttpMethod;

/// Error returned when an HTTP request fails validation.
///
/// Raised before any network call is made.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// Only one of file name and file content was provided.
    #[error("file_name and file_content must both be populated if one is.")]
    FilePayloadMismatch,

    /// The request parameters are not a JSON object.
    #[error("Request params must be a JSON object, got {kind}.")]
    ParamsNotObject {
        /// The JSON type that was provided instead.
        kind: &'static str,
    },
}

/// A network-level failure observed on a single attempt.
///
/// The message is the full rendered error chain (`outer: inner: ...`) so it
/// can be matched against retry markers. The OS error code is taken from the
/// first [`std::io::Error`] found in the chain.
///
/// # Example
///
/// ```rust
/// use acos_client::clients::TransportError;
///
/// let error = TransportError::from(std::io::Error::from_raw_os_error(104));
/// assert_eq!(error.os_error(), Some(104));
/// assert!(error.message().contains("(os error 104)"));
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct TransportError {
    message: String,
    os_error: Option<i32>,
}

impl TransportError {
    /// Creates a transport error from a rendered message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            os_error: None,
        }
    }

    /// Attaches an OS error code.
    #[must_use]
    pub const fn with_os_error(mut self, code: i32) -> Self {
        self.os_error = Some(code);
        self
    }

    /// Returns the rendered error chain.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the OS error code, if the failure came from a socket.
    #[must_use]
    pub const fn os_error(&self) -> Option<i32> {
        self.os_error
    }

    fn from_chain(error: &(dyn StdError + 'static)) -> Self {
        let mut message = error.to_string();
        let mut os_error = error.downcast_ref::<io::Error>().and_then(io::Error::raw_os_error);

        let mut source = error.source();
        while let Some(inner) = source {
            let rendered = inner.to_string();
            if !message.contains(&rendered) {
                message.push_str(": ");
                message.push_str(&rendered);
            }
            if os_error.is_none() {
                os_error = inner.downcast_ref::<io::Error>().and_then(io::Error::raw_os_error);
            }
            source = inner.source();
        }

        Self { message, os_error }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(error: reqwest::Error) -> Self {
        Self::from_chain(&error)
    }
}

impl From<io::Error> for TransportError {
    fn from(error: io::Error) -> Self {
        Self::from_chain(&error)
    }
}

/// Error returned when every attempt failed with a retryable error.
///
/// Carries the last observed transport error as its source.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Exceeded maximum retry count of {tries}. Last error: {source}")]
pub struct MaxRetriesExceededError {
    /// The number of attempts that were made.
    pub tries: u32,
    /// The error from the final attempt.
    #[source]
    pub source: TransportError,
}

/// Error returned when a response body is not JSON and the status is not 200.
#[derive(Debug, Error)]
#[error("Failed to decode response with status {status}: {source}")]
pub struct DecodeError {
    /// The HTTP status code of the response.
    pub status: u16,
    /// The JSON parse failure.
    #[source]
    pub source: serde_json::Error,
}

/// Error returned when the device reports `"status": "fail"`.
///
/// The code and message are lifted from the `response.err` object when the
/// device provides them.
#[derive(Debug, Error, Clone, PartialEq)]
#[error("{method} {path} failed with code {}: {}", .code.map_or_else(|| "unknown".to_string(), |c| c.to_string()), .msg.as_deref().unwrap_or("no message"))]
pub struct ApiError {
    /// The HTTP method of the failed request.
    pub method: HttpMethod,
    /// The request path.
    pub path: String,
    /// The device error code, if provided.
    pub code: Option<i64>,
    /// The device error message, if provided.
    pub msg: Option<String>,
    /// The decoded response body.
    pub body: serde_json::Value,
}

impl ApiError {
    /// Builds an API error from a decoded failure envelope.
    #[must_use]
    pub fn from_body(method: HttpMethod, path: impl Into<String>, body: serde_json::Value) -> Self {
        let err = body.get("response").and_then(|r| r.get("err"));
        let code = err.and_then(|e| e.get("code")).and_then(serde_json::Value::as_i64);
        let msg = err
            .and_then(|e| e.get("msg"))
            .and_then(serde_json::Value::as_str)
            .map(String::from);

        Self {
            method,
            path: path.into(),
            code,
            msg,
            body,
        }
    }
}

/// Error returned when the device answers with an authorization schema,
/// meaning the credentials or token were not accepted.
#[derive(Debug, Error, Clone, PartialEq)]
#[error("{method} {path} was rejected by the authorization schema")]
pub struct AuthSchemaError {
    /// The HTTP method of the rejected request.
    pub method: HttpMethod,
    /// The request path.
    pub path: String,
    /// The decoded response body.
    pub body: serde_json::Value,
    /// The caller-supplied headers, with secrets masked.
    pub headers: serde_json::Value,
}

/// Unified error type for all HTTP-related errors.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Request validation failed.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// A non-retryable network error.
    #[error("Network error: {0}")]
    Transport(#[from] TransportError),

    /// Retry attempts exhausted.
    #[error(transparent)]
    MaxRetries(#[from] MaxRetriesExceededError),

    /// The response body could not be decoded.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// The device reported a failure.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The device rejected the request's authorization.
    #[error(transparent)]
    AuthSchema(#[from] AuthSchemaError),

    /// The request payload could not be serialized.
    #[error("Failed to serialize request payload: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The underlying HTTP client could not be built.
    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}
