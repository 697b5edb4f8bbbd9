//! Single-attempt HTTP round trips.
//!
//! [`HttpClient`](crate::clients::HttpClient) drives its retry loop through
//! the [`Transport`] trait. [`ReqwestTransport`] is the production
//! implementation; tests substitute scripted transports.

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};

use crate::clients::errors::TransportError;
use crate::clients::http_request::{FilePayload, HttpMethod};
use crate::clients::http_response::HttpResponse;

/// Body of a prepared request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RequestBody {
    /// No body.
    Empty,
    /// A serialized JSON document.
    Json(String),
    /// A multipart upload: the `file` part plus an optional `json` part.
    Multipart {
        /// Sent as part `file`, `application/octet-stream`.
        file: FilePayload,
        /// Sent as part `json` with file name `blob`, `application/json`.
        json: Option<String>,
    },
}

/// A fully resolved request, ready to be put on the wire.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreparedRequest {
    /// The HTTP method.
    pub method: HttpMethod,
    /// The absolute URL.
    pub url: String,
    /// The final header set.
    pub headers: HashMap<String, String>,
    /// The request body.
    pub body: RequestBody,
}

/// Performs one HTTP round trip without retrying.
#[async_trait]
pub trait Transport: Send + Sync + fmt::Debug {
    /// Sends `request` once.
    ///
    /// Any response, whatever its status, is `Ok`; only failures to
    /// complete the exchange are `Err`.
    async fn send(&self, request: &PreparedRequest) -> Result<HttpResponse, TransportError>;
}

/// [`Transport`] backed by `reqwest`.
///
/// Certificate verification is disabled: ACOS devices ship with
/// self-signed certificates.
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Creates a transport with an optional per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns the `reqwest` error if the TLS backend cannot be initialised.
    pub fn new(timeout: Option<Duration>) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder()
            .use_rustls_tls()
            .danger_accept_invalid_certs(true);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }

    fn method(method: HttpMethod) -> reqwest::Method {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }

    fn multipart(file: &FilePayload, json: Option<&String>) -> Result<Form, reqwest::Error> {
        let file_part = Part::bytes(file.content.clone())
            .file_name(file.name.clone())
            .mime_str("application/octet-stream")?;
        let mut form = Form::new().part("file", file_part);

        if let Some(json) = json {
            let json_part = Part::text(json.clone())
                .file_name("blob")
                .mime_str("application/json")?;
            form = form.part("json", json_part);
        }
        Ok(form)
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: &PreparedRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = self
            .client
            .request(Self::method(request.method), &request.url);

        for (key, value) in &request.headers {
            builder = builder.header(key, value);
        }

        builder = match &request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(payload) => builder.body(payload.clone()),
            RequestBody::Multipart { file, json } => {
                builder.multipart(Self::multipart(file, json.as_ref())?)
            }
        };

        let res = builder.send().await?;
        let code = res.status().as_u16();
        let body = res.bytes().await?;

        Ok(HttpResponse::new(code, body.to_vec()))
    }
}
