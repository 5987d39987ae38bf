//! Public market data endpoints
//!
//! These endpoints don't require authentication.

use crate::agent::Agent;
use crate::error::RestResult;
use crate::transport::Response;
use binance_types::Params;
use tracing::instrument;

const PING: &str = "ping";
const TIME: &str = "time";
const DEPTH: &str = "depth";
const AGG_TRADES: &str = "aggTrades";
const KLINES: &str = "klines";
const TICKER_24HR: &str = "ticker/24hr";
const TICKER_PRICE: &str = "ticker/price";
const TICKER_BOOK: &str = "ticker/bookTicker";

/// Public market data endpoints
pub struct MarketEndpoints<'a> {
    agent: &'a Agent,
}

impl<'a> MarketEndpoints<'a> {
    pub fn new(agent: &'a Agent) -> Self {
        Self { agent }
    }

    /// Test connectivity
    #[instrument(skip(self))]
    pub async fn ping(&self) -> RestResult<Response> {
        self.agent.public_request(PING, None, None).await
    }

    /// Get server time
    #[instrument(skip(self))]
    pub async fn time(&self) -> RestResult<Response> {
        self.agent.public_request(TIME, None, None).await
    }

    /// Get order book depth
    ///
    /// # Arguments
    /// * `params` - `symbol` (required), `limit`
    #[instrument(skip(self, params))]
    pub async fn order_book(&self, params: &Params) -> RestResult<Response> {
        self.agent.public_request(DEPTH, Some(params), None).await
    }

    /// Get compressed, aggregate trades
    ///
    /// # Arguments
    /// * `params` - `symbol` (required), `fromId`, `startTime`, `endTime`, `limit`
    #[instrument(skip(self, params))]
    pub async fn agg_trades(&self, params: &Params) -> RestResult<Response> {
        self.agent.public_request(AGG_TRADES, Some(params), None).await
    }

    /// Get candlesticks
    ///
    /// # Arguments
    /// * `params` - `symbol`, `interval` (required), `limit`, `startTime`, `endTime`
    #[instrument(skip(self, params))]
    pub async fn candles(&self, params: &Params) -> RestResult<Response> {
        self.agent.public_request(KLINES, Some(params), None).await
    }

    /// Get 24 hour price change statistics
    ///
    /// # Arguments
    /// * `params` - `symbol` (omit for all symbols)
    #[instrument(skip(self, params))]
    pub async fn daily_stats(&self, params: Option<&Params>) -> RestResult<Response> {
        self.agent.public_request(TICKER_24HR, params, None).await
    }

    /// Get latest price for all symbols
    #[instrument(skip(self))]
    pub async fn all_prices(&self) -> RestResult<Response> {
        self.agent.public_request(TICKER_PRICE, None, None).await
    }

    /// Get best bid/ask for all symbols
    #[instrument(skip(self))]
    pub async fn all_book_tickers(&self) -> RestResult<Response> {
        self.agent.public_request(TICKER_BOOK, None, None).await
    }
}
