//! Request agent
//!
//! The agent is the only component that talks to the network. It composes
//! descriptors, signs private bodies, runs the transport and normalizes
//! failures.
//!
//! # Credential lifecycle
//!
//! An agent starts unauthenticated unless built with credentials.
//! [`Agent::upgrade`] installs or replaces the pair; there is no way back to
//! unauthenticated. Each private call snapshots the pair once before signing,
//! so an upgrade never affects a call that has already started.
//!
//! # Data placement
//!
//! Signed parameters go in the query string for `GET` and in the form body
//! for every other verb.

use crate::config::{
    compose, AgentConfig, ConfigOverride, RequestDescriptor, RequestKind, API_KEY_HEADER,
};
use crate::error::{RestError, RestResult};
use crate::transport::{ReqwestTransport, Response, Transport};
use binance_auth::{query_string, Clock, Credentials, SignatureResult, Signer};
use binance_types::Params;
use parking_lot::RwLock;
use reqwest::Method;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Issues public and signed requests
pub struct Agent {
    config: AgentConfig,
    signer: Signer,
    transport: Arc<dyn Transport>,
    credentials: RwLock<Option<Arc<Credentials>>>,
}

impl Agent {
    /// Create an unauthenticated agent on the reqwest transport
    pub fn new(config: AgentConfig) -> RestResult<Self> {
        let transport = ReqwestTransport::new()?;
        Self::with_transport(config, Arc::new(transport))
    }

    /// Create an unauthenticated agent on a custom transport
    pub fn with_transport(config: AgentConfig, transport: Arc<dyn Transport>) -> RestResult<Self> {
        config.validate()?;
        let signer = Signer::new().with_recv_window(config.recv_window);

        Ok(Self {
            config,
            signer,
            transport,
            credentials: RwLock::new(None),
        })
    }

    /// Install credentials at construction
    pub fn with_credentials(self, credentials: Credentials) -> Self {
        *self.credentials.write() = Some(Arc::new(credentials));
        self
    }

    /// Replace the signer's clock
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.signer = self.signer.with_clock(clock);
        self
    }

    /// Process-level configuration
    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    /// Signer used for private calls
    pub fn signer(&self) -> &Signer {
        &self.signer
    }

    /// Install or replace the credential pair
    pub fn upgrade(&self, credentials: Credentials) {
        info!(credentials = ?credentials, "Installing API credentials");
        *self.credentials.write() = Some(Arc::new(credentials));
    }

    /// Check if credentials are installed
    pub fn is_upgraded(&self) -> bool {
        self.credentials.read().is_some()
    }

    /// Sign a body with an explicit secret using this agent's signer
    pub fn sign_message(&self, body: &Params, secret: &str) -> SignatureResult {
        self.signer.sign(body, secret)
    }

    fn credentials_snapshot(&self) -> Option<Arc<Credentials>> {
        self.credentials.read().clone()
    }

    /// Build the descriptor for a public call
    ///
    /// The query is always serialized, so a call without parameters ends in
    /// a bare `?`.
    pub fn public_descriptor(
        &self,
        path: &str,
        query: Option<&Params>,
        overrides: Option<&ConfigOverride>,
    ) -> RequestDescriptor {
        let mut descriptor = compose(RequestKind::Public, &self.config, overrides);
        let query = query.map(query_string).unwrap_or_default();
        descriptor.url = format!("{}?{}", endpoint_path(path), query);
        descriptor
    }

    /// Build the descriptor for a signed call
    ///
    /// The API key header, verb, url and body are applied after every
    /// configuration layer.
    pub fn private_descriptor(
        &self,
        credentials: &Credentials,
        path: &str,
        method: Method,
        body: Option<&Params>,
        overrides: Option<&ConfigOverride>,
    ) -> RequestDescriptor {
        let empty = Params::new();
        let signed = credentials.sign(&self.signer, body.unwrap_or(&empty));
        let data = signed.query_string();

        let mut descriptor = compose(RequestKind::Private, &self.config, overrides);
        descriptor.set_header(API_KEY_HEADER, credentials.api_key());

        if method == Method::GET {
            descriptor.url = format!("{}?{}", endpoint_path(path), data);
            descriptor.data = None;
        } else {
            descriptor.url = endpoint_path(path);
            descriptor.data = Some(data);
        }
        descriptor.method = method;

        descriptor
    }

    /// Issue an unauthenticated request
    ///
    /// Transport failures are returned as [`RestError::Transport`] without
    /// normalization.
    #[instrument(skip(self, query, overrides))]
    pub async fn public_request(
        &self,
        path: &str,
        query: Option<&Params>,
        overrides: Option<&ConfigOverride>,
    ) -> RestResult<Response> {
        let descriptor = self.public_descriptor(path, query, overrides);
        debug!(url = %descriptor.url, "Making public request");

        self.transport
            .execute(&descriptor)
            .await
            .map_err(RestError::Transport)
    }

    /// Issue a signed request
    ///
    /// Fails with [`RestError::AuthRequired`] before touching the transport
    /// when no credentials are installed.
    #[instrument(skip(self, body, overrides))]
    pub async fn private_request(
        &self,
        path: &str,
        method: Method,
        body: Option<&Params>,
        overrides: Option<&ConfigOverride>,
    ) -> RestResult<Response> {
        let credentials = self.credentials_snapshot().ok_or(RestError::AuthRequired)?;
        let descriptor = self.private_descriptor(&credentials, path, method, body, overrides);

        debug!(method = %descriptor.method, path = %path, "Making authenticated request");

        self.transport
            .execute(&descriptor)
            .await
            .map_err(RestError::from_transport)
    }
}

fn endpoint_path(path: &str) -> String {
    format!("/{}", path.trim_start_matches('/'))
}

impl std::fmt::Debug for Agent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Agent")
            .field("config", &self.config)
            .field("is_upgraded", &self.is_upgraded())
            .finish()
    }
}
