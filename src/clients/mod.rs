//! HTTP client types for aXAPI communication.
//!
//! This module provides the transport layer: request and response types,
//! the retry policy, and the [`HttpClient`] that ties them together.
//!
//! # Overview
//!
//! - [`HttpClient`]: Issues aXAPI calls with transparent retries
//! - [`HttpRequest`]: A request, built with [`HttpRequest::builder`]
//! - [`AxapiResponse`]: The normalized result (`NoContent` or JSON)
//! - [`RetryPolicy`] / [`is_retryable`]: Which transport errors are retried
//! - [`Transport`]: The single-attempt seam, implemented by [`ReqwestTransport`]
//!
//! # Retry Behavior
//!
//! A request is attempted up to 1500 times with a 100 ms pause between
//! attempts, but only while the failure is a socket error whose OS code is
//! configured as retryable or whose text matches a retry marker (including
//! a malformed status line). Other failures are returned immediately.

mod errors;
mod http_client;
mod http_request;
mod http_response;
mod redact;
mod retry;
mod transport;

#[cfg(test)]
pub(crate) mod test_support;

pub use errors::{
    ApiError, AuthSchemaError, DecodeError, HttpError, InvalidHttpRequestError,
    MaxRetriesExceededError, TransportError,
};
pub use http_client::{HttpClient, SDK_VERSION};
pub use http_request::{FilePayload, HttpMethod, HttpRequest, HttpRequestBuilder};
pub use http_response::{AxapiResponse, HttpResponse, AUTHORIZATION_SCHEMA_KEY};
pub use redact::{redact, redact_headers, MASK};
pub use retry::{is_retryable, RetryPolicy, MALFORMED_STATUS_MARKERS};
pub use transport::{PreparedRequest, RequestBody, ReqwestTransport, Transport};
