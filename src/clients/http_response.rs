//! HTTP response types for the ACOS client SDK.
//!
//! [`HttpResponse`] is what a single round trip produces. [`AxapiResponse`]
//! is the normalized result handed back to callers once the body has been
//! decoded and checked for failure envelopes.

use serde_json::{Map, Value};

use crate::clients::errors::{ApiError, AuthSchemaError, DecodeError, HttpError};
use crate::clients::http_request::HttpMethod;

/// Key whose presence marks an authorization-schema rejection.
pub const AUTHORIZATION_SCHEMA_KEY: &str = "authorizationschema";

/// A raw HTTP response from the device.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// The undecoded response body.
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Creates a new `HttpResponse`.
    #[must_use]
    pub fn new(code: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            code,
            body: body.into(),
        }
    }

    /// Decodes the body and checks it for failure envelopes.
    ///
    /// - 204 yields [`AxapiResponse::NoContent`]
    /// - a non-JSON body yields an empty object on 200 and
    ///   [`HttpError::Decode`] otherwise
    /// - `"response": {"status": "fail"}` yields [`HttpError::Api`]
    /// - an `authorizationschema` key yields [`HttpError::AuthSchema`]
    ///
    /// # Errors
    ///
    /// See above.
    pub fn into_axapi(
        self,
        method: HttpMethod,
        path: &str,
        request_headers: &Value,
    ) -> Result<AxapiResponse, HttpError> {
        if self.code == 204 {
            return Ok(AxapiResponse::NoContent);
        }

        let body: Value = match serde_json::from_slice(&self.body) {
            Ok(body) => body,
            Err(_) if self.code == 200 => return Ok(AxapiResponse::Json(Value::Object(Map::new()))),
            Err(source) => {
                return Err(DecodeError {
                    status: self.code,
                    source,
                }
                .into())
            }
        };

        let failed = body
            .get("response")
            .and_then(|r| r.get("status"))
            .and_then(Value::as_str)
            == Some("fail");
        if failed {
            return Err(ApiError::from_body(method, path, body).into());
        }

        if body.get(AUTHORIZATION_SCHEMA_KEY).is_some() {
            return Err(AuthSchemaError {
                method,
                path: path.to_string(),
                body,
                headers: request_headers.clone(),
            }
            .into());
        }

        Ok(AxapiResponse::Json(body))
    }
}

/// The normalized result of an aXAPI call.
///
/// `NoContent` (status 204) is distinct from an empty JSON object, which is
/// what a 200 with a non-JSON body produces.
#[derive(Clone, Debug, PartialEq)]
pub enum AxapiResponse {
    /// The device answered 204 No Content.
    NoContent,
    /// The decoded JSON body.
    Json(Value),
}

impl AxapiResponse {
    /// Returns `true` for a 204 response.
    #[must_use]
    pub const fn is_no_content(&self) -> bool {
        matches!(self, Self::NoContent)
    }

    /// Returns the decoded body, if any.
    #[must_use]
    pub const fn json(&self) -> Option<&Value> {
        match self {
            Self::Json(body) => Some(body),
            Self::NoContent => None,
        }
    }

    /// Consumes the response, returning the decoded body, if any.
    #[must_use]
    pub fn into_json(self) -> Option<Value> {
        match self {
            Self::Json(body) => Some(body),
            Self::NoContent => None,
        }
    }

    /// Looks up a top-level key in the decoded body.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.json().and_then(|body| body.get(key))
    }

    /// Returns `response.status` from the envelope, when present.
    #[must_use]
    pub fn status(&self) -> Option<&str> {
        self.get("response")
            .and_then(|r| r.get("status"))
            .and_then(Value::as_str)
    }
}
