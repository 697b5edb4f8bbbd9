//! HTTP request types for the ACOS client SDK.
//!
//! This module provides the [`HttpRequest`] type and its builder for
//! constructing aXAPI calls.

use std::collections::HashMap;
use std::fmt;

use serde_json::{Map, Value};

use crate::clients::errors::InvalidHttpRequestError;

/// HTTP methods used by the aXAPI.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// HTTP GET method for reading configuration.
    Get,
    /// HTTP POST method for creating objects and calling actions.
    Post,
    /// HTTP PUT method for replacing objects.
    Put,
    /// HTTP DELETE method for removing objects.
    Delete,
}

impl HttpMethod {
    /// Returns the method name as sent on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A file uploaded as the `file` part of a multipart request.
#[derive(Clone, PartialEq, Eq)]
pub struct FilePayload {
    /// The file name reported to the device.
    pub name: String,
    /// The raw file bytes.
    pub content: Vec<u8>,
}

impl fmt::Debug for FilePayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilePayload")
            .field("name", &self.name)
            .field("content_len", &self.content.len())
            .finish()
    }
}

/// An aXAPI request.
///
/// Use [`HttpRequest::builder`] to construct requests with the builder
/// pattern. The transport only ever reads a request, so the same value can
/// be sent repeatedly.
///
/// # Example
///
/// ```rust
/// use acos_client::clients::{HttpMethod, HttpRequest};
/// use serde_json::json;
///
/// let request = HttpRequest::builder(HttpMethod::Post, "/axapi/v3/slb/server")
///     .params(json!({"server": {"name": "s1", "host": "10.0.0.5"}}))
///     .build()
///     .unwrap();
///
/// assert!(request.file_payload().is_none());
/// ```
#[derive(Clone, Debug)]
pub struct HttpRequest {
    /// The HTTP method for this request.
    pub http_method: HttpMethod,
    /// The absolute API path (e.g., `/axapi/v3/auth`).
    pub path: String,
    /// JSON parameters sent as the request body.
    pub params: Option<Value>,
    /// Headers laid over the client's default headers.
    pub headers: Option<HashMap<String, String>>,
    /// Name of a file to upload.
    pub file_name: Option<String>,
    /// Content of a file to upload.
    pub file_content: Option<Vec<u8>>,
    /// Extra attributes merged into `params` with `_` replaced by `-` in
    /// their top-level keys.
    pub axapi_args: Option<Map<String, Value>>,
}

impl HttpRequest {
    /// Creates a new builder for constructing an `HttpRequest`.
    #[must_use]
    pub fn builder(method: HttpMethod, path: impl Into<String>) -> HttpRequestBuilder {
        HttpRequestBuilder::new(method, path)
    }

    /// Validates the request, ensuring it meets all requirements.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if:
    /// - only one of `file_name` and `file_content` is set
    /// - `params` is present but not a JSON object
    pub fn verify(&self) -> Result<(), InvalidHttpRequestError> {
        if self.file_name.is_some() != self.file_content.is_some() {
            return Err(InvalidHttpRequestError::FilePayloadMismatch);
        }

        match &self.params {
            None | Some(Value::Object(_) | Value::Null) => Ok(()),
            Some(other) => Err(InvalidHttpRequestError::ParamsNotObject {
                kind: json_kind(other),
            }),
        }
    }

    /// Returns the file payload, if both name and content are set.
    #[must_use]
    pub fn file_payload(&self) -> Option<FilePayload> {
        match (&self.file_name, &self.file_content) {
            (Some(name), Some(content)) => Some(FilePayload {
                name: name.clone(),
                content: content.clone(),
            }),
            _ => None,
        }
    }

    /// Returns a copy of the params with `axapi_args` merged in.
    ///
    /// Returns `None` when the result would be empty, in which case no body
    /// is sent.
    #[must_use]
    pub fn merged_params(&self) -> Option<Map<String, Value>> {
        let mut params = match &self.params {
            Some(Value::Object(map)) => map.clone(),
            _ => Map::new(),
        };

        if let Some(args) = &self.axapi_args {
            let hyphenated = args
                .iter()
                .map(|(k, v)| (k.replace('_', "-"), v.clone()))
                .collect();
            merge_maps(&mut params, hyphenated);
        }

        if params.is_empty() {
            None
        } else {
            Some(params)
        }
    }
}

/// Recursively merges `overlay` into `base`.
///
/// Nested objects present on both sides are merged; any other value from
/// `overlay` replaces the one in `base`.
pub(crate) fn merge_maps(base: &mut Map<String, Value>, overlay: Map<String, Value>) {
    for (key, value) in overlay {
        let Value::Object(incoming) = value else {
            base.insert(key, value);
            continue;
        };
        if let Some(Value::Object(existing)) = base.get_mut(&key) {
            merge_maps(existing, incoming);
            continue;
        }
        base.insert(key, Value::Object(incoming));
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Builder for constructing [`HttpRequest`] instances.
#[derive(Debug)]
pub struct HttpRequestBuilder {
    http_method: HttpMethod,
    path: String,
    params: Option<Value>,
    headers: Option<HashMap<String, String>>,
    file_name: Option<String>,
    file_content: Option<Vec<u8>>,
    axapi_args: Option<Map<String, Value>>,
}

impl HttpRequestBuilder {
    fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            http_method: method,
            path: path.into(),
            params: None,
            headers: None,
            file_name: None,
            file_content: None,
            axapi_args: None,
        }
    }

    /// Sets the JSON params.
    #[must_use]
    pub fn params(mut self, params: impl Into<Value>) -> Self {
        self.params = Some(params.into());
        self
    }

    /// Sets all extra headers at once.
    #[must_use]
    pub fn headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers = Some(headers);
        self
    }

    /// Adds a single extra header.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Sets the upload file name.
    #[must_use]
    pub fn file_name(mut self, name: impl Into<String>) -> Self {
        self.file_name = Some(name.into());
        self
    }

    /// Sets the upload file content.
    #[must_use]
    pub fn file_content(mut self, content: impl Into<Vec<u8>>) -> Self {
        self.file_content = Some(content.into());
        self
    }

    /// Sets both halves of a file upload.
    #[must_use]
    pub fn file(self, name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        self.file_name(name).file_content(content)
    }

    /// Sets attributes that the typed params do not cover yet.
    #[must_use]
    pub fn axapi_args(mut self, args: Map<String, Value>) -> Self {
        self.axapi_args = Some(args);
        self
    }

    /// Builds the [`HttpRequest`], validating it in the process.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if the request fails validation.
    pub fn build(self) -> Result<HttpRequest, InvalidHttpRequestError> {
        let request = HttpRequest {
            http_method: self.http_method,
            path: self.path,
            params: self.params,
            headers: self.headers,
            file_name: self.file_name,
            file_content: self.file_content,
            axapi_args: self.axapi_args,
        };
        request.verify()?;
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_http_method_display() {
        assert_eq!(HttpMethod::Get.to_string(), "GET");
        assert_eq!(HttpMethod::Post.to_string(), "POST");
        assert_eq!(HttpMethod::Put.to_string(), "PUT");
        assert_eq!(HttpMethod::Delete.to_string(), "DELETE");
    }

    #[test]
    fn test_builder_creates_valid_get_request() {
        let request = HttpRequest::builder(HttpMethod::Get, "/axapi/v3/slb/server")
            .build()
            .unwrap();

        assert_eq!(request.http_method, HttpMethod::Get);
        assert_eq!(request.path, "/axapi/v3/slb/server");
        assert!(request.params.is_none());
        assert!(request.merged_params().is_none());
    }

    #[test]
    fn test_file_name_without_content_is_rejected() {
        let result = HttpRequest::builder(HttpMethod::Post, "/axapi/v3/file/ssl-cert")
            .file_name("cert.pem")
            .build();

        assert_eq!(
            result.unwrap_err(),
            InvalidHttpRequestError::FilePayloadMismatch
        );
    }

    #[test]
    fn test_file_content_without_name_is_rejected() {
        let result = HttpRequest::builder(HttpMethod::Post, "/axapi/v3/file/ssl-cert")
            .file_content(b"-----BEGIN CERTIFICATE-----".to_vec())
            .build();

        assert_eq!(
            result.unwrap_err(),
            InvalidHttpRequestError::FilePayloadMismatch
        );
    }

    #[test]
    fn test_file_payload_present_when_both_set() {
        let request = HttpRequest::builder(HttpMethod::Post, "/axapi/v3/file/ssl-cert")
            .file("cert.pem", b"data".to_vec())
            .build()
            .unwrap();

        let payload = request.file_payload().unwrap();
        assert_eq!(payload.name, "cert.pem");
        assert_eq!(payload.content, b"data");
        assert!(format!("{payload:?}").contains("content_len"));
    }

    #[test]
    fn test_params_must_be_object() {
        let result = HttpRequest::builder(HttpMethod::Post, "/x")
            .params(json!([1, 2]))
            .build();

        assert_eq!(
            result.unwrap_err(),
            InvalidHttpRequestError::ParamsNotObject { kind: "an array" }
        );
    }

    #[test]
    fn test_axapi_args_are_hyphenated_and_deep_merged() {
        let mut args = Map::new();
        args.insert(
            "server".to_string(),
            json!({"conn-limit": 100, "port_list": [{"port-number": 80}]}),
        );
        args.insert("health_check".to_string(), json!("hc1"));

        let request = HttpRequest::builder(HttpMethod::Post, "/axapi/v3/slb/server")
            .params(json!({"server": {"name": "s1", "conn-limit": 10}}))
            .axapi_args(args)
            .build()
            .unwrap();

        let merged = Value::Object(request.merged_params().unwrap());
        assert_eq!(merged["server"]["name"], "s1");
        assert_eq!(merged["server"]["conn-limit"], 100);
        // Only top-level keys are rewritten.
        assert!(merged["server"].get("port_list").is_some());
        assert_eq!(merged["health-check"], "hc1");

        // The caller's params are untouched.
        assert_eq!(request.params.unwrap()["server"]["conn-limit"], 10);
    }

    #[test]
    fn test_empty_object_params_send_no_body() {
        let request = HttpRequest::builder(HttpMethod::Post, "/axapi/v3/logoff")
            .params(json!({}))
            .build()
            .unwrap();
        assert!(request.merged_params().is_none());
    }

    #[test]
    fn test_builder_with_extra_headers() {
        let request = HttpRequest::builder(HttpMethod::Get, "/axapi/v3/version/oper")
            .header("Authorization", "A10 abc")
            .build()
            .unwrap();

        let headers = request.headers.unwrap();
        assert_eq!(headers.get("Authorization"), Some(&"A10 abc".to_string()));
    }
}
