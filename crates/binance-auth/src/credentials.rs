//! API credentials for Binance private endpoints
//!
//! # Security
//!
//! Secret keys are stored using the `secrecy` crate which:
//! - Zeroizes memory on drop (prevents memory scanning)
//! - Prevents accidental logging via Debug impl
//! - Provides explicit access via `expose_secret()`

use binance_types::Params;
use secrecy::{ExposeSecret, SecretString};

use crate::error::{AuthError, AuthResult};
use crate::signer::{SignatureResult, Signer};

const API_KEY_VAR: &str = "BINANCE_API_KEY";
const SECRET_KEY_VAR: &str = "BINANCE_API_SECRET";

/// API key / secret key pair
///
/// Key formats are not validated; a bad pair is rejected by the exchange,
/// not here.
pub struct Credentials {
    /// API key (sent in the `X-MBX-APIKEY` header)
    api_key: String,
    /// Secret key (HMAC key, zeroized on drop)
    secret_key: SecretString,
}

impl Credentials {
    /// Create credentials from an API key and a secret key
    pub fn new(api_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            secret_key: SecretString::from(secret_key.into()),
        }
    }

    /// Create credentials from environment variables
    ///
    /// Reads `BINANCE_API_KEY` and `BINANCE_API_SECRET` from the environment.
    pub fn from_env() -> AuthResult<Self> {
        Self::from_env_vars(API_KEY_VAR, SECRET_KEY_VAR)
    }

    /// Create credentials from custom environment variable names
    pub fn from_env_vars(api_key_var: &str, secret_key_var: &str) -> AuthResult<Self> {
        let api_key = read_env(api_key_var)?;
        let secret_key = read_env(secret_key_var)?;

        Ok(Self::new(api_key, secret_key))
    }

    /// Get the API key
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Sign a request body with this pair's secret key
    pub fn sign(&self, signer: &Signer, body: &Params) -> SignatureResult {
        signer.sign(body, self.secret_key.expose_secret())
    }
}

fn read_env(name: &str) -> AuthResult<String> {
    let value = std::env::var(name).map_err(|_| AuthError::EnvVarNotSet(name.to_string()))?;
    if value.is_empty() {
        return Err(AuthError::EnvVarEmpty(name.to_string()));
    }
    Ok(value)
}

impl Clone for Credentials {
    fn clone(&self) -> Self {
        Self {
            api_key: self.api_key.clone(),
            secret_key: SecretString::from(self.secret_key.expose_secret().to_string()),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let visible = self
            .api_key
            .char_indices()
            .nth(8)
            .map_or(self.api_key.as_str(), |(idx, _)| &self.api_key[..idx]);

        f.debug_struct("Credentials")
            .field("api_key", &format!("{}...", visible))
            .field("secret_key", &"[REDACTED]")
            .finish()
    }
}
