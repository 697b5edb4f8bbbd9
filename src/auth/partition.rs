//! Active partition switching.
//!
//! ACOS devices scope configuration to partitions. An admin session starts
//! in `shared`; switching to another partition lasts until the session ends
//! or the partition is switched back.

use crate::auth::authorization_headers;
use crate::clients::{AxapiResponse, HttpClient, HttpError};

/// The partition every session starts in.
pub const DEFAULT_PARTITION: &str = "shared";

/// Returns the aXAPI path that activates partition `name`.
#[must_use]
pub fn active_partition_path(name: &str) -> String {
    format!("/axapi/v3/active-partition/{}", urlencoding::encode(name))
}

/// Switches the session identified by `token` to partition `name`.
///
/// # Errors
///
/// Returns [`HttpError`] if the request fails or the device rejects the
/// partition name.
///
/// # Example
///
/// ```rust,ignore
/// use acos_client::auth::partition::{activate_partition, DEFAULT_PARTITION};
///
/// activate_partition(&http, token, "tenant-a").await?;
/// // ...
/// activate_partition(&http, token, DEFAULT_PARTITION).await?;
/// ```
pub async fn activate_partition(
    http: &HttpClient,
    token: &str,
    name: &str,
) -> Result<AxapiResponse, HttpError> {
    tracing::debug!("acos_client: activating partition {}", name);
    http.post(
        &active_partition_path(name),
        None,
        Some(authorization_headers(token)),
    )
    .await
}
