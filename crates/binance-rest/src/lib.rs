//! REST API client for the Binance cryptocurrency exchange
//!
//! This crate provides a REST API client covering market data, trading,
//! account and funding endpoints.
//!
//! # Features
//!
//! - **Market Data**: Ping, server time, order book, trades, candles, tickers
//! - **Trading**: Place, test, query and cancel orders
//! - **Account**: Balances and trade history
//! - **Funding**: Withdrawals, deposit/withdrawal history, deposit address
//!
//! # Authentication
//!
//! Private endpoints require API credentials. Requests carry the API key in
//! the `X-MBX-APIKEY` header and an HMAC-SHA256 `signature` over the
//! url-encoded parameters. Credentials can be installed at any time with
//! [`BinanceRestClient::upgrade`].
//!
//! # Example
//!
//! ```no_run
//! use binance_rest::{BinanceRestClient, Credentials, Params};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Public endpoints (no auth required)
//!     let client = BinanceRestClient::new()?;
//!     let prices = client.market().all_prices().await?;
//!     println!("Prices: {}", prices.data);
//!
//!     // Private endpoints (auth required)
//!     let auth_client = BinanceRestClient::with_credentials(Credentials::from_env()?)?;
//!     let orders = auth_client
//!         .trading()
//!         .open_orders(Some(&Params::new().with("symbol", "BTCUSDT")))
//!         .await?;
//!     println!("Open orders: {}", orders.data);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Errors
//!
//! Failed private calls are normalized to the most specific payload the
//! exchange returned; see [`RestError::from_transport`]. Nothing is retried
//! or rate limited by this crate.

pub mod agent;
pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod transport;
pub mod types;

// Re-export main types
pub use agent::Agent;
pub use client::BinanceRestClient;
pub use config::{AgentConfig, ConfigError, ConfigOverride, RequestDescriptor, StatusPolicy};
pub use error::{RestError, RestResult};
pub use transport::{Response, Transport, TransportError, TransportErrorKind};

// Re-export signing and parameter types
pub use binance_auth::{sign_message, Credentials, SignatureResult};
pub use binance_types::{BinanceErrorCode, ParamValue, Params};
pub use reqwest::Method;

// Re-export endpoint-specific types
pub use types::{BookTicker, KlineInterval, OrderSide, OrderType, PriceTicker, ServerTime, TimeInForce};
