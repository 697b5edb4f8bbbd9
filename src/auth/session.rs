//! Session management for aXAPI authentication.
//!
//! This module provides the [`Session`] type, which obtains an aXAPI
//! signature on first use, caches it, and logs off on close.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::auth::authorization_headers;
use crate::auth::partition::{activate_partition, DEFAULT_PARTITION};
use crate::clients::{AxapiResponse, HttpClient, HttpError};
use crate::config::{Password, Username};

/// Path of the login endpoint.
pub const AUTH_PATH: &str = "/axapi/v3/auth";

/// Path of the logoff endpoint.
pub const LOGOFF_PATH: &str = "/axapi/v3/logoff";

#[derive(Serialize)]
struct AuthRequest<'a> {
    credentials: Credentials<'a>,
}

#[derive(Serialize)]
struct Credentials<'a> {
    username: &'a str,
    password: &'a str,
}

/// An aXAPI login session.
///
/// The token ("signature") is fetched lazily by [`Session::id`] and reused
/// until [`Session::close`] or a fresh [`Session::authenticate`]. Methods
/// that touch the token take `&mut self`, so one session is never driven
/// from two tasks at once.
///
/// # Example
///
/// ```rust,ignore
/// use acos_client::{AcosClient, AcosConfig};
///
/// let mut client = AcosClient::new(config)?;
/// let headers = client.session_mut().authorization_header().await?;
/// let servers = client.http().get("/axapi/v3/slb/server", None, headers).await?;
/// client.close().await?;
/// ```
pub struct Session {
    http: Arc<HttpClient>,
    username: Username,
    password: Password,
    token: Option<String>,
    authenticated_at: Option<DateTime<Utc>>,
}

// Verify Session is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Session>();
};

/// Clears the cached token when dropped, whether the logoff completed,
/// failed, or was cancelled.
struct ClearOnDrop<'a> {
    token: &'a mut Option<String>,
    authenticated_at: &'a mut Option<DateTime<Utc>>,
}

impl Drop for ClearOnDrop<'_> {
    fn drop(&mut self) {
        *self.token = None;
        *self.authenticated_at = None;
    }
}

impl Session {
    /// Creates an unauthenticated session for the given credentials.
    #[must_use]
    pub const fn new(http: Arc<HttpClient>, username: Username, password: Password) -> Self {
        Self {
            http,
            username,
            password,
            token: None,
            authenticated_at: None,
        }
    }

    /// Returns the HTTP client this session talks through.
    #[must_use]
    pub const fn http(&self) -> &Arc<HttpClient> {
        &self.http
    }

    /// Returns the stored username.
    #[must_use]
    pub const fn username(&self) -> &Username {
        &self.username
    }

    /// Returns `true` while a token is cached.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Returns when the cached token was obtained.
    #[must_use]
    pub const fn authenticated_at(&self) -> Option<DateTime<Utc>> {
        self.authenticated_at
    }

    /// Returns the session token, logging in with the stored credentials
    /// if none is cached.
    ///
    /// `Ok(None)` means the device answered the login without a signature.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the login request fails.
    pub async fn id(&mut self) -> Result<Option<&str>, HttpError> {
        if self.token.is_none() {
            let username = self.username.clone();
            let password = self.password.clone();
            self.authenticate(&username, &password).await?;
        }
        Ok(self.token.as_deref())
    }

    /// Returns the `Authorization` header for the current token, logging in
    /// first if needed.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the login request fails.
    pub async fn authorization_header(
        &mut self,
    ) -> Result<Option<HashMap<String, String>>, HttpError> {
        Ok(self.id().await?.map(authorization_headers))
    }

    /// Logs in with `username` and `password`, closing any current session
    /// first.
    ///
    /// The raw login response is returned. A response without
    /// `authresponse.signature` leaves the session unauthenticated.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if closing the previous session or the login
    /// request fails.
    pub async fn authenticate(
        &mut self,
        username: &Username,
        password: &Password,
    ) -> Result<AxapiResponse, HttpError> {
        if self.token.is_some() {
            self.close().await?;
        }

        let payload = serde_json::to_value(AuthRequest {
            credentials: Credentials {
                username: username.as_ref(),
                password: password.as_ref(),
            },
        })?;
        let response = self.http.post(AUTH_PATH, Some(payload), None).await?;

        self.token = response
            .json()
            .and_then(|body| body.pointer("/authresponse/signature"))
            .and_then(signature_to_token);

        if self.token.is_some() {
            self.authenticated_at = Some(Utc::now());
            tracing::debug!("acos_client: authenticated as {}", username.as_ref());
        } else {
            tracing::warn!(
                "acos_client: login for {} returned no signature; session remains unauthenticated",
                username.as_ref()
            );
        }

        Ok(response)
    }

    /// Logs off the current session.
    ///
    /// The active partition is first switched back to `shared`; failures of
    /// that step are ignored. The cached token is cleared even if the logoff
    /// itself fails. Returns `Ok(None)` when there was nothing to close.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the logoff request fails.
    pub async fn close(&mut self) -> Result<Option<AxapiResponse>, HttpError> {
        let Some(token) = self.token.clone() else {
            return Ok(None);
        };

        let _clear = ClearOnDrop {
            token: &mut self.token,
            authenticated_at: &mut self.authenticated_at,
        };

        if let Err(error) = activate_partition(&self.http, &token, DEFAULT_PARTITION).await {
            tracing::debug!(
                "acos_client: ignoring partition reset failure before logoff: {}",
                error
            );
        }

        let response = self
            .http
            .post(LOGOFF_PATH, None, Some(authorization_headers(&token)))
            .await?;
        Ok(Some(response))
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("base_url", &self.http.base_url())
            .field("username", &self.username)
            .field("token", &self.token.as_ref().map(|_| "*****"))
            .field("authenticated_at", &self.authenticated_at)
            .finish_non_exhaustive()
    }
}

fn signature_to_token(signature: &Value) -> Option<String> {
    match signature {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
