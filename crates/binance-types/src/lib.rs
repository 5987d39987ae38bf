//! Shared types for the Binance REST API
//!
//! This crate provides the core type definitions used across the workspace.
//! It has minimal dependencies and can be used independently.
//!
//! # Key Types
//!
//! - [`Params`] - Insertion-ordered request parameters (query string or form body)
//! - [`ParamValue`] - Scalar parameter value with decimal precision support
//! - [`BinanceErrorCode`] - Documented Binance API error codes

pub mod error_codes;
pub mod params;

// Re-export commonly used types
pub use error_codes::*;
pub use params::*;

// Re-export rust_decimal for users
pub use rust_decimal::Decimal;
