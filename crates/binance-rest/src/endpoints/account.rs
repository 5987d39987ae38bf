//! Private account endpoints
//!
//! These endpoints require authentication.

use crate::agent::Agent;
use crate::error::RestResult;
use crate::transport::Response;
use binance_types::Params;
use reqwest::Method;
use tracing::instrument;

const ACCOUNT: &str = "account";
const MY_TRADES: &str = "myTrades";

/// Private account endpoints
pub struct AccountEndpoints<'a> {
    agent: &'a Agent,
}

impl<'a> AccountEndpoints<'a> {
    pub fn new(agent: &'a Agent) -> Self {
        Self { agent }
    }

    /// Get account information and balances
    #[instrument(skip(self, params))]
    pub async fn account_info(&self, params: Option<&Params>) -> RestResult<Response> {
        self.agent
            .private_request(ACCOUNT, Method::GET, params, None)
            .await
    }

    /// Get trades for a specific symbol
    ///
    /// # Arguments
    /// * `params` - `symbol` (required), `limit`, `fromId`
    #[instrument(skip(self, params))]
    pub async fn my_trades(&self, params: &Params) -> RestResult<Response> {
        self.agent
            .private_request(MY_TRADES, Method::GET, Some(params), None)
            .await
    }
}
