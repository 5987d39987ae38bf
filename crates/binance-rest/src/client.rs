//! Main REST client implementation

use crate::agent::Agent;
use crate::config::AgentConfig;
use crate::endpoints::{AccountEndpoints, FundingEndpoints, MarketEndpoints, TradingEndpoints};
use crate::error::RestResult;
use crate::transport::{Response, Transport};
use crate::types::ServerTime;
use binance_auth::{Credentials, SignatureResult};
use binance_types::Params;
use std::sync::Arc;
use tracing::info;

/// Binance REST API client
///
/// Provides access to both public and private endpoints. Cloning is cheap and
/// clones share the same credentials.
///
/// # Example
///
/// ```no_run
/// use binance_rest::{BinanceRestClient, Credentials, Params};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     // Public endpoints only
///     let client = BinanceRestClient::new()?;
///     let book = client
///         .market()
///         .order_book(&Params::new().with("symbol", "BTCUSDT").with("limit", 5u32))
///         .await?;
///     println!("{}", book.data);
///
///     // Install credentials later for private endpoints
///     client.upgrade(Credentials::from_env()?);
///     let account = client.account_info().await?;
///     println!("{}", account.data);
///
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct BinanceRestClient {
    agent: Arc<Agent>,
}

impl BinanceRestClient {
    /// Create a new client without authentication
    ///
    /// Only public endpoints will be available until [`upgrade`](Self::upgrade).
    pub fn new() -> RestResult<Self> {
        Self::with_config(AgentConfig::default())
    }

    /// Create a new client with credentials
    pub fn with_credentials(credentials: Credentials) -> RestResult<Self> {
        let client = Self::new()?;
        client.upgrade(credentials);
        Ok(client)
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: AgentConfig) -> RestResult<Self> {
        let agent = Agent::new(config)?;
        info!("Created Binance REST client");
        Ok(Self::from_agent(agent))
    }

    /// Create a client on a custom transport
    pub fn with_transport(config: AgentConfig, transport: Arc<dyn Transport>) -> RestResult<Self> {
        Ok(Self::from_agent(Agent::with_transport(config, transport)?))
    }

    /// Wrap an existing agent
    pub fn from_agent(agent: Agent) -> Self {
        Self {
            agent: Arc::new(agent),
        }
    }

    /// Underlying agent
    pub fn agent(&self) -> &Agent {
        &self.agent
    }

    /// Install or replace credentials
    pub fn upgrade(&self, credentials: Credentials) {
        self.agent.upgrade(credentials);
    }

    /// Check if the client has credentials for private endpoints
    pub fn is_upgraded(&self) -> bool {
        self.agent.is_upgraded()
    }

    /// Sign a body the way private requests are signed
    pub fn sign_message(&self, body: &Params, secret: &str) -> SignatureResult {
        self.agent.sign_message(body, secret)
    }

    // ========================================================================
    // Endpoint Groups
    // ========================================================================

    /// Get market endpoints
    pub fn market(&self) -> MarketEndpoints<'_> {
        MarketEndpoints::new(&self.agent)
    }

    /// Get trading endpoints (requires credentials)
    pub fn trading(&self) -> TradingEndpoints<'_> {
        TradingEndpoints::new(&self.agent)
    }

    /// Get account endpoints (requires credentials)
    pub fn account(&self) -> AccountEndpoints<'_> {
        AccountEndpoints::new(&self.agent)
    }

    /// Get funding endpoints (requires credentials)
    pub fn funding(&self) -> FundingEndpoints<'_> {
        FundingEndpoints::new(&self.agent)
    }

    // ========================================================================
    // Shortcuts
    // ========================================================================

    /// Test connectivity
    pub async fn ping(&self) -> RestResult<Response> {
        self.market().ping().await
    }

    /// Get server time
    pub async fn server_time(&self) -> RestResult<ServerTime> {
        self.market().time().await?.json()
    }

    /// Place a new order
    pub async fn new_order(&self, params: &Params) -> RestResult<Response> {
        self.trading().new_order(params).await
    }

    /// Cancel an order
    pub async fn cancel_order(&self, params: &Params) -> RestResult<Response> {
        self.trading().cancel_order(params).await
    }

    /// Get account information and balances
    pub async fn account_info(&self) -> RestResult<Response> {
        self.account().account_info(None).await
    }
}

impl std::fmt::Debug for BinanceRestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BinanceRestClient")
            .field("is_upgraded", &self.is_upgraded())
            .finish()
    }
}
