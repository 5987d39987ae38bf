//! Credentials and request signing for the Binance API
//!
//! Private Binance endpoints are authenticated with an `X-MBX-APIKEY` header
//! and a `signature` parameter: the lowercase hex HMAC-SHA256 of the
//! url-encoded parameters, keyed by the secret key.
//!
//! # Example
//!
//! ```
//! use binance_auth::{sign_message, Credentials};
//! use binance_types::Params;
//!
//! let creds = Credentials::new("my_api_key", "my_secret_key");
//! let body = Params::new().with("symbol", "BTCUSDT");
//!
//! let signed = sign_message(&body, "my_secret_key");
//! assert!(signed.body.contains_key("timestamp"));
//! assert_eq!(signed.digest.len(), 64);
//! # let _ = creds;
//! ```

mod credentials;
mod error;
mod signer;

pub use credentials::Credentials;
pub use error::{AuthError, AuthResult};
pub use signer::{
    hmac_sha256_hex, query_string, sign_message, Clock, FixedClock, SignatureResult, Signer,
    SystemClock, DEFAULT_RECV_WINDOW_MS,
};
