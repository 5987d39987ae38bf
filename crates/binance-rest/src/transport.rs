//! HTTP transport abstraction
//!
//! This module provides a trait-based abstraction over the HTTP call itself,
//! enabling unit testing of request construction without real network calls.
//!
//! # Example
//!
//! ```no_run
//! use binance_rest::config::{compose, AgentConfig, RequestKind};
//! use binance_rest::transport::{ReqwestTransport, Transport, TransportError};
//!
//! async fn example() -> Result<(), TransportError> {
//!     let transport = ReqwestTransport::new()?;
//!     let mut request = compose(RequestKind::Public, &AgentConfig::default(), None);
//!     request.url = "/ping?".to_string();
//!
//!     let response = transport.execute(&request).await?;
//!     println!("{} {}", response.status, response.data);
//!     Ok(())
//! }
//! ```

use crate::config::RequestDescriptor;
use crate::error::{RestError, RestResult};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use tracing::{debug, instrument};

/// HTTP response as seen by the agent
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    /// HTTP status code
    pub status: u16,
    /// Decoded body (JSON if parseable, otherwise a string, `Null` if empty)
    pub data: Value,
    /// Response headers
    pub headers: BTreeMap<String, String>,
}

impl Response {
    /// Create a response with no headers
    pub fn new(status: u16, data: Value) -> Self {
        Self {
            status,
            data,
            headers: BTreeMap::new(),
        }
    }

    /// Add a header
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Deserialize the body into a typed payload
    pub fn json<T: DeserializeOwned>(&self) -> RestResult<T> {
        serde_json::from_value(self.data.clone()).map_err(|e| RestError::Parse(e.to_string()))
    }
}

/// Category of transport failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    /// Could not connect (DNS, TCP, TLS)
    Connect,
    /// Timed out
    Timeout,
    /// Response received with a status the policy rejects
    Status,
    /// Response body could not be read
    Body,
    /// Request could not be built (bad header, bad URL)
    Request,
    /// Anything else
    Other,
}

impl fmt::Display for TransportErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Connect => "connection failed",
            Self::Timeout => "timed out",
            Self::Status => "rejected status",
            Self::Body => "unreadable body",
            Self::Request => "invalid request",
            Self::Other => "transport error",
        };
        f.write_str(name)
    }
}

/// Transport failure, optionally carrying the response that caused it
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct TransportError {
    /// Failure category
    pub kind: TransportErrorKind,
    /// Human-readable description
    pub message: String,
    /// Response, when the server answered
    pub response: Option<Response>,
}

impl TransportError {
    /// Create an error without a response
    pub fn new(kind: TransportErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            response: None,
        }
    }

    /// Status rejected by the policy
    pub fn status(response: Response) -> Self {
        Self {
            kind: TransportErrorKind::Status,
            message: format!("request failed with status code {}", response.status),
            response: Some(response),
        }
    }

    /// Attach a response
    pub fn with_response(mut self, response: Response) -> Self {
        self.response = Some(response);
        self
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        let kind = if err.is_timeout() {
            TransportErrorKind::Timeout
        } else if err.is_connect() {
            TransportErrorKind::Connect
        } else if err.is_builder() {
            TransportErrorKind::Request
        } else if err.is_body() || err.is_decode() {
            TransportErrorKind::Body
        } else {
            TransportErrorKind::Other
        };
        Self::new(kind, err.to_string())
    }
}

/// Executes a composed request
///
/// Implementations honour the descriptor's status policy: statuses the
/// policy rejects come back as [`TransportErrorKind::Status`] errors
/// carrying the response.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send the request and return the response
    async fn execute(&self, request: &RequestDescriptor) -> Result<Response, TransportError>;
}

/// Real HTTP transport using reqwest
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Create a transport with a fresh connection pool
    pub fn new() -> Result<Self, TransportError> {
        let client = Client::builder().build()?;
        Ok(Self { client })
    }

    /// Wrap an existing reqwest client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    #[instrument(skip(self, request), fields(method = %request.method, url = %request.url))]
    async fn execute(&self, request: &RequestDescriptor) -> Result<Response, TransportError> {
        let mut builder = self
            .client
            .request(request.method.clone(), request.full_url())
            .timeout(request.timeout);

        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(data) = &request.data {
            builder = builder.body(data.clone());
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let headers: BTreeMap<String, String> = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();

        // Status and headers already arrived; keep them if the body fails
        let text = match response.text().await {
            Ok(text) => text,
            Err(err) => {
                let partial = Response {
                    status,
                    data: Value::Null,
                    headers,
                };
                return Err(TransportError::from(err).with_response(partial));
            }
        };

        debug!(status, bytes = text.len(), "Received response");

        let response = Response {
            status,
            data: decode_body(&text),
            headers,
        };

        if request.status_policy.accepts(status) {
            Ok(response)
        } else {
            Err(TransportError::status(response))
        }
    }
}

fn decode_body(text: &str) -> Value {
    if text.is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

/// Mock transport for testing
///
/// Records every request and replays queued results in order. With an
/// empty queue it answers `200 {}`.
#[cfg(any(test, feature = "test-utils"))]
#[derive(Debug, Default)]
pub struct MockTransport {
    results: parking_lot::Mutex<std::collections::VecDeque<Result<Response, TransportError>>>,
    requests: parking_lot::Mutex<Vec<RequestDescriptor>>,
}

#[cfg(any(test, feature = "test-utils"))]
impl MockTransport {
    /// Create a new mock transport
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful response
    pub fn push_response(&self, response: Response) {
        self.results.lock().push_back(Ok(response));
    }

    /// Queue a JSON body with status 200
    pub fn push_json(&self, data: Value) {
        self.push_response(Response::new(200, data));
    }

    /// Queue a failure
    pub fn push_error(&self, error: TransportError) {
        self.results.lock().push_back(Err(error));
    }

    /// Snapshot of recorded requests
    pub fn requests(&self) -> Vec<RequestDescriptor> {
        self.requests.lock().clone()
    }

    /// Most recent request
    pub fn last_request(&self) -> Option<RequestDescriptor> {
        self.requests.lock().last().cloned()
    }

    /// Number of requests executed
    pub fn call_count(&self) -> usize {
        self.requests.lock().len()
    }
}

#[cfg(any(test, feature = "test-utils"))]
#[async_trait]
impl Transport for MockTransport {
    async fn execute(&self, request: &RequestDescriptor) -> Result<Response, TransportError> {
        self.requests.lock().push(request.clone());
        self.results
            .lock()
            .pop_front()
            .unwrap_or_else(|| Ok(Response::new(200, serde_json::json!({}))))
    }
}
