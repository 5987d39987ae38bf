//! HMAC-SHA256 request signing
//!
//! Binance signature algorithm:
//! 1. Add `timestamp` (milliseconds) and, when configured, `recvWindow`
//! 2. Url-encode the parameters in insertion order
//! 3. HMAC-SHA256(secret_key, encoded_parameters)
//! 4. Hex encode the result and append it as `signature`
//!
//! The exchange verifies the signature over the bytes it receives, so the
//! same [`query_string`] encoding must be used for signing and for sending.

use binance_types::Params;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::fmt;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::trace;

type HmacSha256 = Hmac<Sha256>;

/// Default exchange-side tolerance for clock skew
pub const DEFAULT_RECV_WINDOW_MS: u64 = 5000;

const TIMESTAMP_KEY: &str = "timestamp";
const RECV_WINDOW_KEY: &str = "recvWindow";
const SIGNATURE_KEY: &str = "signature";

/// Source of wall-clock time in milliseconds
pub trait Clock: Send + Sync + fmt::Debug {
    /// Current Unix time in milliseconds
    fn now_millis(&self) -> u64;
}

/// System wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }
}

/// Clock frozen at a fixed instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(u64);

impl FixedClock {
    /// Freeze time at `millis`
    pub fn new(millis: u64) -> Self {
        Self(millis)
    }
}

impl Clock for FixedClock {
    fn now_millis(&self) -> u64 {
        self.0
    }
}

/// Output of signing a request body
#[derive(Debug, Clone, PartialEq)]
pub struct SignatureResult {
    /// Lowercase hex HMAC-SHA256 digest
    pub digest: String,
    /// Original body plus timing fields plus `signature`
    pub body: Params,
}

impl SignatureResult {
    /// Encoded body, ready for a query string or form body
    pub fn query_string(&self) -> String {
        query_string(&self.body)
    }
}

/// Request signer
///
/// Holds the clock and receive window; the secret is supplied per call.
#[derive(Debug, Clone)]
pub struct Signer {
    clock: Arc<dyn Clock>,
    recv_window: Option<u64>,
}

impl Default for Signer {
    fn default() -> Self {
        Self::new()
    }
}

impl Signer {
    /// Signer on the system clock with the default receive window
    pub fn new() -> Self {
        Self {
            clock: Arc::new(SystemClock),
            recv_window: Some(DEFAULT_RECV_WINDOW_MS),
        }
    }

    /// Replace the clock
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Set the receive window; `None` omits `recvWindow` from signed bodies
    pub fn with_recv_window(mut self, recv_window: Option<u64>) -> Self {
        self.recv_window = recv_window;
        self
    }

    /// Configured receive window
    pub fn recv_window(&self) -> Option<u64> {
        self.recv_window
    }

    /// Sign `body` with `secret` at the clock's current time
    pub fn sign(&self, body: &Params, secret: &str) -> SignatureResult {
        self.sign_at(body, secret, self.clock.now_millis())
    }

    /// Sign `body` with `secret` at an explicit timestamp
    ///
    /// Caller-supplied `timestamp`, `recvWindow` and `signature` fields are
    /// overwritten.
    pub fn sign_at(&self, body: &Params, secret: &str, timestamp: u64) -> SignatureResult {
        let mut signed = body.clone();
        signed.remove(SIGNATURE_KEY);
        signed.insert(TIMESTAMP_KEY, timestamp);
        if let Some(window) = self.recv_window {
            signed.insert(RECV_WINDOW_KEY, window);
        }

        let digest = hmac_sha256_hex(secret, &query_string(&signed));
        signed.insert(SIGNATURE_KEY, digest.clone());
        trace!(timestamp, fields = signed.len(), "Signed request body");

        SignatureResult {
            digest,
            body: signed,
        }
    }
}

/// Sign `body` with the system clock and the default receive window
///
/// Standalone entry point for inspecting the signing scheme without a client.
pub fn sign_message(body: &Params, secret: &str) -> SignatureResult {
    Signer::new().sign(body, secret)
}

/// Url-encode parameters in insertion order
pub fn query_string(params: &Params) -> String {
    // Every value serializes as a string, which form encoding always accepts.
    serde_urlencoded::to_string(params).expect("string pairs are always url-encodable")
}

/// Lowercase hex HMAC-SHA256 of `payload` keyed by `secret`
pub fn hmac_sha256_hex(secret: &str, payload: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(payload.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use binance_types::ParamValue;
    use rust_decimal_macros::dec;

    const DOC_SECRET: &str = "NhqPtmdSJYdKjVHjA7PZj4Mge3R5YNiP1e3UZjInClVN65XAbvqqM6A7H5fATj0j";
    const DOC_TIMESTAMP: u64 = 1_499_827_319_559;

    fn doc_body() -> Params {
        Params::new()
            .with("symbol", "LTCBTC")
            .with("side", "BUY")
            .with("type", "LIMIT")
            .with("timeInForce", "GTC")
            .with("quantity", 1u64)
            .with("price", 0.1f64)
            .with("recvWindow", 5000u64)
    }

    #[test]
    fn test_exchange_documented_vector() {
        let signer = Signer::new().with_clock(FixedClock::new(DOC_TIMESTAMP));
        let result = signer.sign(&doc_body(), DOC_SECRET);

        assert_eq!(
            result.digest,
            "c8db56825ae71d6d79447849e617115f4a920fa2acdcab2b053c4b2838bd6b71"
        );
        assert_eq!(
            result.query_string(),
            "symbol=LTCBTC&side=BUY&type=LIMIT&timeInForce=GTC&quantity=1&price=0.1\
             &recvWindow=5000&timestamp=1499827319559\
             &signature=c8db56825ae71d6d79447849e617115f4a920fa2acdcab2b053c4b2838bd6b71"
        );
    }

    #[test]
    fn test_body_keeps_caller_fields() {
        let body = Params::new()
            .with("symbol", "BTCUSDT")
            .with("quantity", dec!(0.015))
            .with("newOrderRespType", "ACK");
        let result = Signer::new().sign_at(&body, "secret", 42);

        for (key, value) in body.iter() {
            assert_eq!(result.body.get(key), Some(value));
        }
        assert_eq!(result.body.get("timestamp"), Some(&ParamValue::UInt(42)));
        assert_eq!(
            result.body.get("recvWindow"),
            Some(&ParamValue::UInt(DEFAULT_RECV_WINDOW_MS))
        );
        assert_eq!(
            result.body.get("signature"),
            Some(&ParamValue::Str(result.digest.clone()))
        );
        assert_eq!(result.body.len(), body.len() + 3);
    }

    #[test]
    fn test_timing_fields_follow_body() {
        let body = Params::new().with("symbol", "BTCUSDT");
        let result = Signer::new().sign_at(&body, "secret", 7);

        let keys: Vec<&str> = result.body.keys().collect();
        assert_eq!(keys, ["symbol", "timestamp", "recvWindow", "signature"]);
    }

    #[test]
    fn test_without_recv_window() {
        let signer = Signer::new().with_recv_window(None);
        let result = signer.sign_at(&Params::new(), "secret", 7);

        assert!(!result.body.contains_key("recvWindow"));
        let keys: Vec<&str> = result.body.keys().collect();
        assert_eq!(keys, ["timestamp", "signature"]);
    }

    #[test]
    fn test_frozen_clock_is_deterministic() {
        let signer = Signer::new().with_clock(FixedClock::new(1_700_000_000_000));
        let body = Params::new().with("symbol", "ETHBTC").with("limit", 10u32);

        let first = signer.sign(&body, "secret");
        let second = signer.sign(&body, "secret");
        assert_eq!(first, second);
    }

    #[test]
    fn test_different_secret_changes_digest() {
        let body = Params::new().with("symbol", "ETHBTC");
        let signer = Signer::new();

        let a = signer.sign_at(&body, "secret-a", 1);
        let b = signer.sign_at(&body, "secret-b", 1);
        assert_ne!(a.digest, b.digest);
    }

    #[test]
    fn test_caller_signing_fields_are_overwritten() {
        let body = Params::new()
            .with("signature", "forged")
            .with("timestamp", 1u64)
            .with("symbol", "BNBBTC")
            .with("recvWindow", 60_000u64);
        let result = Signer::new().sign_at(&body, "secret", 99);

        assert_eq!(result.body.get("timestamp"), Some(&ParamValue::UInt(99)));
        assert_eq!(result.body.get("recvWindow"), Some(&ParamValue::UInt(5000)));
        assert_ne!(
            result.body.get("signature"),
            Some(&ParamValue::Str("forged".to_string()))
        );

        let keys: Vec<&str> = result.body.keys().collect();
        assert_eq!(keys, ["timestamp", "symbol", "recvWindow", "signature"]);
    }

    #[test]
    fn test_empty_secret_is_not_an_error() {
        let body = Params::new().with("symbol", "BNBBTC");
        let a = Signer::new().sign_at(&body, "", 5);
        let b = Signer::new().sign_at(&body, "", 5);
        assert_eq!(a.digest, b.digest);
        assert_eq!(a.digest.len(), 64);
    }

    #[test]
    fn test_signed_bytes_are_prefix_of_sent_bytes() {
        let body = Params::new().with("symbol", "BTC USDT").with("note", "a&b=c");
        let result = Signer::new().sign_at(&body, "secret", 3);

        let mut unsigned = result.body.clone();
        unsigned.remove("signature");
        let signed_bytes = query_string(&unsigned);

        assert_eq!(
            result.query_string(),
            format!("{}&signature={}", signed_bytes, result.digest)
        );
        assert_eq!(result.digest, hmac_sha256_hex("secret", &signed_bytes));
    }

    #[test]
    fn test_sign_message_uses_system_clock() {
        let before = SystemClock.now_millis();
        let result = sign_message(&Params::new(), "secret");

        match result.body.get("timestamp") {
            Some(ParamValue::UInt(ts)) => assert!(*ts >= before),
            other => panic!("unexpected timestamp: {:?}", other),
        }
        assert!(result.body.contains_key("recvWindow"));
    }

    #[test]
    fn test_query_string_empty() {
        assert_eq!(query_string(&Params::new()), "");
    }
}
