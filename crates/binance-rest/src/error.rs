//! Error types for REST API operations
//!
//! Failed private calls are normalized to the most specific payload
//! available, in this order:
//!
//! 1. the `error` field of the exchange payload
//! 2. the exchange payload itself
//! 3. the raw HTTP response
//! 4. the transport error
//!
//! A step counts as present only if its value is non-empty (not `null`,
//! `false`, `0` or `""`).

use crate::config::ConfigError;
use crate::transport::{Response, TransportError};
use binance_types::BinanceErrorCode;
use serde_json::Value;

/// Errors that can occur during REST API operations
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RestError {
    /// Missing API credentials for private endpoint
    #[error("Authentication required for this endpoint")]
    AuthRequired,

    /// Exchange-supplied `error` field
    #[error("Exchange error: {0}")]
    Exchange(Value),

    /// Exchange payload without an `error` field
    #[error("Exchange rejected request: {0}")]
    Payload(Value),

    /// Response received without a usable payload
    #[error("Request failed with status {}", .0.status)]
    Response(Response),

    /// Network-level failure (DNS, connection, timeout)
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// Invalid agent configuration
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// Failed to parse response
    #[error("Parse error: {0}")]
    Parse(String),
}

impl RestError {
    /// Normalize a transport failure into the most specific rejection
    pub fn from_transport(err: TransportError) -> Self {
        let Some(response) = err.response.as_ref() else {
            return Self::Transport(err);
        };

        if let Some(field) = response.data.get("error").filter(|v| is_present(v)) {
            return Self::Exchange(field.clone());
        }
        if is_present(&response.data) {
            return Self::Payload(response.data.clone());
        }

        match err.response {
            Some(response) => Self::Response(response),
            None => Self::Transport(err),
        }
    }

    /// Exchange payload, for `Exchange` and `Payload` rejections
    pub fn payload(&self) -> Option<&Value> {
        match self {
            Self::Exchange(value) | Self::Payload(value) => Some(value),
            _ => None,
        }
    }

    /// Numeric exchange error code (`{"code": -2010, ...}`)
    pub fn raw_code(&self) -> Option<i64> {
        self.payload()?.get("code")?.as_i64()
    }

    /// Typed exchange error code, if the code is documented
    pub fn exchange_code(&self) -> Option<BinanceErrorCode> {
        self.raw_code().and_then(BinanceErrorCode::from_code)
    }

    /// Exchange error message (`msg` field, or a bare string payload)
    pub fn exchange_message(&self) -> Option<&str> {
        let payload = self.payload()?;
        payload
            .get("msg")
            .and_then(Value::as_str)
            .or_else(|| payload.as_str())
    }

    /// HTTP status of the failed call, when the server answered
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Response(response) => Some(response.status),
            Self::Transport(err) => err.response.as_ref().map(|r| r.status),
            _ => None,
        }
    }
}

fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Result type for REST operations
pub type RestResult<T> = Result<T, RestError>;
