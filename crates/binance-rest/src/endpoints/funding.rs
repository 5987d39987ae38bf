//! Funding endpoints for deposits and withdrawals
//!
//! These live under `/wapi` rather than `/api`, so every call carries a
//! base URL override.

use crate::agent::Agent;
use crate::config::ConfigOverride;
use crate::error::RestResult;
use crate::transport::Response;
use binance_types::Params;
use reqwest::Method;
use tracing::{debug, instrument};

const WITHDRAW: &str = "withdraw.html";
const DEPOSIT_HISTORY: &str = "depositHistory.html";
const WITHDRAW_HISTORY: &str = "withdrawHistory.html";
const DEPOSIT_ADDRESS: &str = "depositAddress.html";

/// Funding endpoints for deposits and withdrawals
pub struct FundingEndpoints<'a> {
    agent: &'a Agent,
    overrides: ConfigOverride,
}

impl<'a> FundingEndpoints<'a> {
    pub fn new(agent: &'a Agent) -> Self {
        let overrides = ConfigOverride::new().with_base_url(agent.config().wapi_base_url());
        Self { agent, overrides }
    }

    async fn request(
        &self,
        path: &str,
        method: Method,
        params: Option<&Params>,
    ) -> RestResult<Response> {
        self.agent
            .private_request(path, method, params, Some(&self.overrides))
            .await
    }

    /// Submit a withdrawal request
    ///
    /// # Arguments
    /// * `params` - `asset`, `address`, `amount` (required), `name`
    #[instrument(skip(self, params))]
    pub async fn withdraw(&self, params: &Params) -> RestResult<Response> {
        debug!("Submitting withdrawal");
        self.request(WITHDRAW, Method::POST, Some(params)).await
    }

    /// Get deposit history
    ///
    /// # Arguments
    /// * `params` - `asset`, `status`, `startTime`, `endTime`
    #[instrument(skip(self, params))]
    pub async fn deposit_history(&self, params: Option<&Params>) -> RestResult<Response> {
        self.request(DEPOSIT_HISTORY, Method::GET, params).await
    }

    /// Get withdrawal history
    ///
    /// # Arguments
    /// * `params` - `asset`, `status`, `startTime`, `endTime`
    #[instrument(skip(self, params))]
    pub async fn withdraw_history(&self, params: Option<&Params>) -> RestResult<Response> {
        self.request(WITHDRAW_HISTORY, Method::GET, params).await
    }

    /// Get the deposit address for an asset
    ///
    /// # Arguments
    /// * `params` - `asset` (required)
    #[instrument(skip(self, params))]
    pub async fn deposit_address(&self, params: &Params) -> RestResult<Response> {
        self.request(DEPOSIT_ADDRESS, Method::GET, Some(params)).await
    }
}
