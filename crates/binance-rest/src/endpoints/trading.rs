//! Trading endpoints for order management
//!
//! These endpoints require authentication.

use crate::agent::Agent;
use crate::error::RestResult;
use crate::transport::Response;
use binance_types::Params;
use reqwest::Method;
use tracing::{debug, instrument};

const ORDER: &str = "order";
const ORDER_TEST: &str = "order/test";
const OPEN_ORDERS: &str = "openOrders";
const ALL_ORDERS: &str = "allOrders";

/// Trading endpoints for order management
pub struct TradingEndpoints<'a> {
    agent: &'a Agent,
}

impl<'a> TradingEndpoints<'a> {
    pub fn new(agent: &'a Agent) -> Self {
        Self { agent }
    }

    /// Place a new order
    ///
    /// # Arguments
    /// * `params` - `symbol`, `side`, `type`, `quantity` (required), `price`,
    ///   `timeInForce`, `newClientOrderId`, `stopPrice`, `icebergQty`
    #[instrument(skip(self, params))]
    pub async fn new_order(&self, params: &Params) -> RestResult<Response> {
        debug!("Placing order");
        self.agent
            .private_request(ORDER, Method::POST, Some(params), None)
            .await
    }

    /// Validate an order without sending it to the matching engine
    #[instrument(skip(self, params))]
    pub async fn test_order(&self, params: &Params) -> RestResult<Response> {
        self.agent
            .private_request(ORDER_TEST, Method::POST, Some(params), None)
            .await
    }

    /// Query an order's status
    ///
    /// # Arguments
    /// * `params` - `symbol` (required), `orderId` or `origClientOrderId`
    #[instrument(skip(self, params))]
    pub async fn query_order(&self, params: &Params) -> RestResult<Response> {
        self.agent
            .private_request(ORDER, Method::GET, Some(params), None)
            .await
    }

    /// Cancel an active order
    ///
    /// # Arguments
    /// * `params` - `symbol` (required), `orderId` or `origClientOrderId`
    #[instrument(skip(self, params))]
    pub async fn cancel_order(&self, params: &Params) -> RestResult<Response> {
        debug!("Cancelling order");
        self.agent
            .private_request(ORDER, Method::DELETE, Some(params), None)
            .await
    }

    /// Get open orders
    ///
    /// # Arguments
    /// * `params` - `symbol` (omit for all symbols)
    #[instrument(skip(self, params))]
    pub async fn open_orders(&self, params: Option<&Params>) -> RestResult<Response> {
        self.agent
            .private_request(OPEN_ORDERS, Method::GET, params, None)
            .await
    }

    /// Get all orders: active, cancelled or filled
    ///
    /// # Arguments
    /// * `params` - `symbol` (required), `orderId`, `limit`
    #[instrument(skip(self, params))]
    pub async fn all_orders(&self, params: &Params) -> RestResult<Response> {
        self.agent
            .private_request(ALL_ORDERS, Method::GET, Some(params), None)
            .await
    }
}
