//! Authentication types for the aXAPI client.
//!
//! # Overview
//!
//! - [`Session`]: Lazily logs in, caches the signature, and logs off on close
//! - [`partition`]: Switches the active partition of a session
//!
//! # Authorization Header
//!
//! Every authenticated aXAPI call carries `Authorization: A10 {signature}`.
//! [`authorization_headers`] builds that header map for a raw token, and
//! [`Session::authorization_header`] does the same for the session's own
//! token, logging in first when needed.
//!
//! ```rust
//! use acos_client::auth::authorization_headers;
//!
//! let headers = authorization_headers("abc123");
//! assert_eq!(headers["Authorization"], "A10 abc123");
//! ```

use std::collections::HashMap;

pub mod partition;
pub mod session;

pub use session::Session;

/// Builds the `Authorization` header map for `token`.
#[must_use]
pub fn authorization_headers(token: &str) -> HashMap<String, String> {
    let mut headers = HashMap::new();
    headers.insert("Authorization".to_string(), format!("A10 {token}"));
    headers
}
