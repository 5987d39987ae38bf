//! Error types for authentication operations

/// Errors that can occur while loading credentials
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Environment variable not set
    #[error("Environment variable not set: {0}")]
    EnvVarNotSet(String),

    /// Environment variable set but empty
    #[error("Environment variable is empty: {0}")]
    EnvVarEmpty(String),
}

/// Result type for authentication operations
pub type AuthResult<T> = Result<T, AuthError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AuthError::EnvVarNotSet("BINANCE_API_KEY".to_string());
        assert!(err.to_string().contains("BINANCE_API_KEY"));
    }
}
