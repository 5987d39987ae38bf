//! API endpoint implementations
//!
//! Each method maps to one fixed path and verb and passes its parameters
//! through unchanged.

pub mod account;
pub mod funding;
pub mod market;
pub mod trading;

pub use account::AccountEndpoints;
pub use funding::FundingEndpoints;
pub use market::MarketEndpoints;
pub use trading::TradingEndpoints;
