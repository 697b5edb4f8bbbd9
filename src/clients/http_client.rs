//! HTTP client for aXAPI communication.
//!
//! This module provides the [`HttpClient`] type for issuing aXAPI calls with
//! transparent retries of transient socket failures.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::clients::errors::{HttpError, MaxRetriesExceededError};
use crate::clients::http_request::{HttpMethod, HttpRequest};
use crate::clients::http_response::{AxapiResponse, HttpResponse};
use crate::clients::redact::{redact, redact_headers};
use crate::clients::retry::{is_retryable, RetryPolicy};
use crate::clients::transport::{PreparedRequest, ReqwestTransport, RequestBody, Transport};
use crate::config::AcosConfig;

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// HTTP client for making requests to an ACOS device.
///
/// The client handles:
/// - Base URL construction from the configured endpoint
/// - Default headers (`Content-type`, `User-Agent`) with caller overrides
/// - JSON and multipart payload construction
/// - Retries of transport errors allowed by the [`RetryPolicy`]
/// - Response decoding and failure-envelope detection
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`.
///
/// # Example
///
/// ```rust,ignore
/// use acos_client::{AcosConfig, HttpClient};
///
/// let client = HttpClient::new(&config)?;
/// let version = client.get("/axapi/v3/version/oper", None, Some(auth_headers)).await?;
/// ```
#[derive(Debug)]
pub struct HttpClient {
    transport: Arc<dyn Transport>,
    /// Base URL (e.g., `https://10.0.0.1:443`).
    base_url: String,
    /// Default headers to include in all requests.
    default_headers: HashMap<String, String>,
    retry_policy: RetryPolicy,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client backed by `reqwest`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Client`] if the TLS backend cannot be initialised.
    pub fn new(config: &AcosConfig) -> Result<Self, HttpError> {
        let transport = ReqwestTransport::new(config.timeout())?;
        Ok(Self::with_transport(config, transport))
    }

    /// Creates a new HTTP client over a custom [`Transport`].
    #[must_use]
    pub fn with_transport(config: &AcosConfig, transport: impl Transport + 'static) -> Self {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));

        let mut default_headers = HashMap::new();
        default_headers.insert("Content-type".to_string(), "application/json".to_string());
        default_headers.insert(
            "User-Agent".to_string(),
            format!("{user_agent_prefix}ACOS-Client-AGENT-{SDK_VERSION}"),
        );

        Self {
            transport: Arc::new(transport),
            base_url: config.base_url(),
            default_headers,
            retry_policy: config.retry_policy(),
        }
    }

    /// Returns the base URL for this client.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Returns the retry policy for this client.
    #[must_use]
    pub const fn retry_policy(&self) -> &RetryPolicy {
        &self.retry_policy
    }

    /// Sends an aXAPI request.
    ///
    /// The request is only read; params, headers and file content are
    /// copied before use.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if:
    /// - Request validation fails (`InvalidRequest`)
    /// - A non-retryable network error occurs (`Transport`)
    /// - Every attempt fails with a retryable error (`MaxRetries`)
    /// - A non-200 response is not JSON (`Decode`)
    /// - The device reports `"status": "fail"` (`Api`)
    /// - The device returns an authorization schema (`AuthSchema`)
    pub async fn request(&self, request: &HttpRequest) -> Result<AxapiResponse, HttpError> {
        request.verify()?;

        let method = request.http_method;
        let url = format!("{}{}", self.base_url, request.path);
        tracing::debug!("axapi_http: full url = {}", url);
        tracing::debug!("axapi_http: {} url = {}", method, request.path);

        let params = request.merged_params().map(Value::Object);
        if let Some(params) = &params {
            tracing::debug!("axapi_http: params = {}", redact(params));
        }

        let mut headers = self.default_headers.clone();
        if let Some(extra) = &request.headers {
            for (key, value) in extra {
                headers.retain(|existing, _| !existing.eq_ignore_ascii_case(key));
                headers.insert(key.clone(), value.clone());
            }
        }

        let payload = params.as_ref().map(serde_json::to_string).transpose()?;

        let body = match request.file_payload() {
            Some(file) => {
                headers.retain(|key, _| !key.eq_ignore_ascii_case("content-type"));
                RequestBody::Multipart {
                    file,
                    json: payload,
                }
            }
            None => payload.map_or(RequestBody::Empty, RequestBody::Json),
        };

        tracing::debug!("axapi_http: headers = {}", redact_headers(&headers));

        let prepared = PreparedRequest {
            method,
            url,
            headers,
            body,
        };
        let response = self.send_with_retries(&prepared).await?;

        let caller_headers = request
            .headers
            .as_ref()
            .map_or_else(|| Value::Object(Map::new()), redact_headers);
        let result = response.into_axapi(method, &request.path, &caller_headers)?;

        if let AxapiResponse::Json(body) = &result {
            tracing::debug!("axapi_http: data = {}", redact(body));
        }

        Ok(result)
    }

    /// Runs the retry loop for a single logical request.
    async fn send_with_retries(&self, prepared: &PreparedRequest) -> Result<HttpResponse, HttpError> {
        let policy = &self.retry_policy;
        let mut tries: u32 = 0;

        loop {
            tries += 1;

            match self.transport.send(prepared).await {
                Ok(response) => {
                    if tries > 1 {
                        tracing::debug!("acos_client retried {} {} times", prepared.url, tries - 1);
                    }
                    return Ok(response);
                }
                Err(error) if is_retryable(&error, policy) => {
                    if tries >= policy.max_attempts() {
                        tracing::error!(
                            "acos_client failing with error {} after {} retries ignoring {:?}",
                            error,
                            tries - 1,
                            policy.markers()
                        );
                        return Err(MaxRetriesExceededError {
                            tries,
                            source: error,
                        }
                        .into());
                    }
                    tokio::time::sleep(policy.delay()).await;
                }
                Err(error) => return Err(HttpError::Transport(error)),
            }
        }
    }

    /// Sends a GET request.
    ///
    /// # Errors
    ///
    /// See [`HttpClient::request`].
    pub async fn get(
        &self,
        path: &str,
        params: Option<Value>,
        headers: Option<HashMap<String, String>>,
    ) -> Result<AxapiResponse, HttpError> {
        self.request(&Self::simple(HttpMethod::Get, path, params, headers))
            .await
    }

    /// Sends a POST request.
    ///
    /// # Errors
    ///
    /// See [`HttpClient::request`].
    pub async fn post(
        &self,
        path: &str,
        params: Option<Value>,
        headers: Option<HashMap<String, String>>,
    ) -> Result<AxapiResponse, HttpError> {
        self.request(&Self::simple(HttpMethod::Post, path, params, headers))
            .await
    }

    /// Sends a PUT request.
    ///
    /// # Errors
    ///
    /// See [`HttpClient::request`].
    pub async fn put(
        &self,
        path: &str,
        params: Option<Value>,
        headers: Option<HashMap<String, String>>,
    ) -> Result<AxapiResponse, HttpError> {
        self.request(&Self::simple(HttpMethod::Put, path, params, headers))
            .await
    }

    /// Sends a DELETE request.
    ///
    /// # Errors
    ///
    /// See [`HttpClient::request`].
    pub async fn delete(
        &self,
        path: &str,
        params: Option<Value>,
        headers: Option<HashMap<String, String>>,
    ) -> Result<AxapiResponse, HttpError> {
        self.request(&Self::simple(HttpMethod::Delete, path, params, headers))
            .await
    }

    fn simple(
        method: HttpMethod,
        path: &str,
        params: Option<Value>,
        headers: Option<HashMap<String, String>>,
    ) -> HttpRequest {
        HttpRequest {
            http_method: method,
            path: path.to_string(),
            params,
            headers,
            file_name: None,
            file_content: None,
            axapi_args: None,
        }
    }
}
