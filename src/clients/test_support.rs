//! Scripted transport shared by unit tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::clients::errors::TransportError;
use crate::clients::http_response::HttpResponse;
use crate::clients::transport::{PreparedRequest, Transport};

/// Replays a fixed script of outcomes and records what it was sent.
///
/// Once the script runs out, every request gets `200 {}`.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    script: Mutex<VecDeque<Result<HttpResponse, TransportError>>>,
    pub sent: Arc<Mutex<Vec<PreparedRequest>>>,
}

impl ScriptedTransport {
    pub fn new(script: Vec<Result<HttpResponse, TransportError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            sent: Arc::default(),
        }
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: &PreparedRequest) -> Result<HttpResponse, TransportError> {
        self.sent.lock().unwrap().push(request.clone());
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(HttpResponse::new(200, b"{}".to_vec())))
    }
}

pub fn respond(code: u16, body: &str) -> Result<HttpResponse, TransportError> {
    Ok(HttpResponse::new(code, body.as_bytes().to_vec()))
}

pub fn ok(body: &str) -> Result<HttpResponse, TransportError> {
    respond(200, body)
}
