//! The [`AcosClient`] entry point.

use std::sync::Arc;

use crate::auth::Session;
use crate::clients::{AxapiResponse, HttpClient, HttpError, Transport};
use crate::config::AcosConfig;

/// A connection to one ACOS device: its configuration, the HTTP client, and
/// the admin session.
///
/// # Example
///
/// ```rust,ignore
/// use acos_client::{AcosClient, AcosConfig, Host, Password, Username};
///
/// let config = AcosConfig::builder()
///     .host(Host::new("10.0.0.1")?)
///     .username(Username::new("admin")?)
///     .password(Password::new("a10"))
///     .retry_errnos([104, 111])
///     .build()?;
///
/// let mut client = AcosClient::new(config)?;
/// let headers = client.session_mut().authorization_header().await?;
/// let version = client.http().get("/axapi/v3/version/oper", None, headers).await?;
/// client.close().await?;
/// ```
#[derive(Debug)]
pub struct AcosClient {
    config: AcosConfig,
    http: Arc<HttpClient>,
    session: Session,
}

impl AcosClient {
    /// Creates a client backed by `reqwest`.
    ///
    /// No request is sent until the session is first used.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Client`] if the HTTP client cannot be built.
    pub fn new(config: AcosConfig) -> Result<Self, HttpError> {
        let http = HttpClient::new(&config)?;
        Ok(Self::from_http(config, http))
    }

    /// Creates a client over a custom [`Transport`].
    #[must_use]
    pub fn with_transport(config: AcosConfig, transport: impl Transport + 'static) -> Self {
        let http = HttpClient::with_transport(&config, transport);
        Self::from_http(config, http)
    }

    fn from_http(config: AcosConfig, http: HttpClient) -> Self {
        let http = Arc::new(http);
        let session = Session::new(
            Arc::clone(&http),
            config.username().clone(),
            config.password().clone(),
        );
        Self {
            config,
            http,
            session,
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &AcosConfig {
        &self.config
    }

    /// Returns the HTTP client.
    #[must_use]
    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    /// Returns the session.
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Returns the session mutably, for login and logoff.
    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// Closes the session. See [`Session::close`].
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the logoff request fails.
    pub async fn close(&mut self) -> Result<Option<AxapiResponse>, HttpError> {
        self.session.close().await
    }
}
