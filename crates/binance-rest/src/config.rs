//! Layered request configuration
//!
//! Every request descriptor is built from three layers, lowest precedence
//! first:
//!
//! 1. the method-kind base ([`RequestKind`]): verb and base headers
//! 2. the agent's process-level defaults ([`AgentConfig`])
//! 3. an optional per-call [`ConfigOverride`]
//!
//! Later layers overwrite earlier ones field by field. Headers are merged key
//! by key instead of being replaced wholesale. Private requests get a final
//! injection step in the agent (API key header, verb, url, data) that no
//! layer here can clobber.

use binance_auth::DEFAULT_RECV_WINDOW_MS;
use reqwest::Method;
use std::collections::BTreeMap;
use std::time::Duration;

/// Exchange root URL
pub const DEFAULT_ROOT_URL: &str = "https://api.binance.com";

/// REST API version segment
pub const DEFAULT_VERSION: &str = "v3";

/// Header carrying the API key on private requests
pub const API_KEY_HEADER: &str = "X-MBX-APIKEY";

/// Default request timeout
const DEFAULT_TIMEOUT_SECS: u64 = 30;

const DEFAULT_USER_AGENT: &str = concat!("binance-rest/", env!("CARGO_PKG_VERSION"));

const PUBLIC_CONTENT_TYPE: &str = "application/json";
const PRIVATE_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Which HTTP statuses the transport reports as success
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusPolicy {
    /// 2xx is success; anything else fails with the response attached
    #[default]
    SuccessOnly,
    /// Every status is returned as a response for the caller to inspect
    AcceptAll,
}

impl StatusPolicy {
    /// Check whether `status` counts as success under this policy
    pub fn accepts(&self, status: u16) -> bool {
        match self {
            Self::SuccessOnly => (200..300).contains(&status),
            Self::AcceptAll => true,
        }
    }
}

/// Public (market data) or private (signed) request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    /// Unauthenticated GET
    Public,
    /// Signed request carrying the API key header
    Private,
}

impl RequestKind {
    /// Base HTTP verb for this kind
    pub fn base_method(&self) -> Method {
        match self {
            Self::Public => Method::GET,
            Self::Private => Method::POST,
        }
    }

    /// Base headers for this kind
    pub fn base_headers(&self) -> BTreeMap<String, String> {
        let content_type = match self {
            Self::Public => PUBLIC_CONTENT_TYPE,
            Self::Private => PRIVATE_CONTENT_TYPE,
        };

        BTreeMap::from([
            ("Cache-Control".to_string(), "no-cache".to_string()),
            ("Content-Type".to_string(), content_type.to_string()),
            ("User-Agent".to_string(), DEFAULT_USER_AGENT.to_string()),
        ])
    }
}

/// Configuration validation error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Root URL is empty
    #[error("root URL must not be empty")]
    EmptyRootUrl,

    /// Root URL is not http(s)
    #[error("root URL must start with http:// or https://: {url}")]
    InvalidRootUrl { url: String },

    /// Timeout is zero
    #[error("request timeout must be greater than zero")]
    ZeroTimeout,
}

/// Process-level agent configuration
#[derive(Debug, Clone, PartialEq)]
pub struct AgentConfig {
    /// Exchange root URL (without the `/api/...` prefix)
    pub root_url: String,
    /// API version segment (e.g. "v3")
    pub version: String,
    /// Request timeout, passed to the transport as a hint
    pub timeout: Duration,
    /// Receive window injected into signed bodies; `None` omits it
    pub recv_window: Option<u64>,
    /// Extra default headers, merged over the base headers
    pub headers: BTreeMap<String, String>,
    /// Status acceptance policy
    pub status_policy: StatusPolicy,
    /// Custom user agent
    pub user_agent: Option<String>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            root_url: DEFAULT_ROOT_URL.to_string(),
            version: DEFAULT_VERSION.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            recv_window: Some(DEFAULT_RECV_WINDOW_MS),
            headers: BTreeMap::new(),
            status_policy: StatusPolicy::default(),
            user_agent: None,
        }
    }
}

impl AgentConfig {
    /// Create a configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the root URL
    pub fn with_root_url(mut self, root_url: impl Into<String>) -> Self {
        self.root_url = root_url.into();
        self
    }

    /// Set the API version segment
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the receive window in milliseconds
    pub fn with_recv_window(mut self, millis: u64) -> Self {
        self.recv_window = Some(millis);
        self
    }

    /// Stop injecting `recvWindow` into signed bodies
    pub fn without_recv_window(mut self) -> Self {
        self.recv_window = None;
        self
    }

    /// Add a default header
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Set the status acceptance policy
    pub fn with_status_policy(mut self, policy: StatusPolicy) -> Self {
        self.status_policy = policy;
        self
    }

    /// Set user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Base URL for `/api` endpoints
    pub fn api_base_url(&self) -> String {
        format!("{}/api/{}", self.root_url.trim_end_matches('/'), self.version)
    }

    /// Base URL for `/wapi` (wallet) endpoints
    pub fn wapi_base_url(&self) -> String {
        format!("{}/wapi/{}", self.root_url.trim_end_matches('/'), self.version)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.root_url.is_empty() {
            return Err(ConfigError::EmptyRootUrl);
        }
        if !self.root_url.starts_with("http://") && !self.root_url.starts_with("https://") {
            return Err(ConfigError::InvalidRootUrl {
                url: self.root_url.clone(),
            });
        }
        if self.timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(())
    }
}

/// Per-call configuration override
///
/// Unset fields leave the lower layers untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverride {
    /// Replace the base URL
    pub base_url: Option<String>,
    /// Replace the HTTP verb (ignored for private requests)
    pub method: Option<Method>,
    /// Replace the timeout
    pub timeout: Option<Duration>,
    /// Headers merged over the composed headers
    pub headers: BTreeMap<String, String>,
    /// Replace the status policy
    pub status_policy: Option<StatusPolicy>,
}

impl ConfigOverride {
    /// Create an empty override
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Override the HTTP verb
    pub fn with_method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    /// Override the timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Add or replace a header
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Override the status policy
    pub fn with_status_policy(mut self, policy: StatusPolicy) -> Self {
        self.status_policy = Some(policy);
        self
    }
}

/// Fully composed transport options for one call
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    /// Base URL (scheme, host, API prefix)
    pub base_url: String,
    /// Path plus query string, relative to `base_url`
    pub url: String,
    /// HTTP verb
    pub method: Method,
    /// Request headers
    pub headers: BTreeMap<String, String>,
    /// Form body, if any
    pub data: Option<String>,
    /// Timeout hint for the transport
    pub timeout: Duration,
    /// Status acceptance policy
    pub status_policy: StatusPolicy,
}

impl RequestDescriptor {
    /// Absolute request URL
    pub fn full_url(&self) -> String {
        format!("{}{}", self.base_url, self.url)
    }

    /// Case-insensitive header lookup
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Set a header, replacing any existing one with the same name in any case
    pub fn set_header(&mut self, name: &str, value: impl Into<String>) {
        self.headers.retain(|key, _| !key.eq_ignore_ascii_case(name));
        self.headers.insert(name.to_string(), value.into());
    }
}

/// Merge the three configuration layers into a descriptor
///
/// The returned descriptor has an empty `url` and no `data`; the agent fills
/// those in from the call's path and parameters.
pub fn compose(
    kind: RequestKind,
    defaults: &AgentConfig,
    overrides: Option<&ConfigOverride>,
) -> RequestDescriptor {
    let mut headers = kind.base_headers();
    if let Some(user_agent) = &defaults.user_agent {
        headers.insert("User-Agent".to_string(), user_agent.clone());
    }
    merge_headers(&mut headers, &defaults.headers);

    let mut descriptor = RequestDescriptor {
        base_url: defaults.api_base_url(),
        url: String::new(),
        method: kind.base_method(),
        headers,
        data: None,
        timeout: defaults.timeout,
        status_policy: defaults.status_policy,
    };

    let Some(overrides) = overrides else {
        return descriptor;
    };

    if let Some(base_url) = &overrides.base_url {
        descriptor.base_url = base_url.clone();
    }
    if let Some(method) = &overrides.method {
        descriptor.method = method.clone();
    }
    if let Some(timeout) = overrides.timeout {
        descriptor.timeout = timeout;
    }
    if let Some(policy) = overrides.status_policy {
        descriptor.status_policy = policy;
    }
    merge_headers(&mut descriptor.headers, &overrides.headers);

    descriptor
}

fn merge_headers(target: &mut BTreeMap<String, String>, layer: &BTreeMap<String, String>) {
    for (name, value) in layer {
        target.retain(|key, _| !key.eq_ignore_ascii_case(name));
        target.insert(name.clone(), value.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_defaults() {
        let descriptor = compose(RequestKind::Public, &AgentConfig::default(), None);

        assert_eq!(descriptor.method, Method::GET);
        assert_eq!(descriptor.base_url, "https://api.binance.com/api/v3");
        assert_eq!(descriptor.header("cache-control"), Some("no-cache"));
        assert_eq!(descriptor.header("Content-Type"), Some("application/json"));
        assert!(descriptor.header("User-Agent").unwrap().starts_with("binance-rest/"));
        assert_eq!(descriptor.timeout, Duration::from_secs(30));
        assert_eq!(descriptor.status_policy, StatusPolicy::SuccessOnly);
        assert!(descriptor.data.is_none());
    }

    #[test]
    fn test_private_base() {
        let descriptor = compose(RequestKind::Private, &AgentConfig::default(), None);

        assert_eq!(descriptor.method, Method::POST);
        assert_eq!(
            descriptor.header("Content-Type"),
            Some("application/x-www-form-urlencoded")
        );
        assert_eq!(descriptor.header("Cache-Control"), Some("no-cache"));
    }

    #[test]
    fn test_agent_layer_over_base() {
        let config = AgentConfig::new()
            .with_root_url("https://testnet.binance.vision/")
            .with_version("v1")
            .with_timeout(Duration::from_millis(2500))
            .with_user_agent("my-bot/1.0")
            .with_header("Cache-Control", "max-age=0")
            .with_status_policy(StatusPolicy::AcceptAll);

        let descriptor = compose(RequestKind::Public, &config, None);

        assert_eq!(descriptor.base_url, "https://testnet.binance.vision/api/v1");
        assert_eq!(descriptor.timeout, Duration::from_millis(2500));
        assert_eq!(descriptor.header("User-Agent"), Some("my-bot/1.0"));
        assert_eq!(descriptor.header("Cache-Control"), Some("max-age=0"));
        assert_eq!(descriptor.status_policy, StatusPolicy::AcceptAll);
    }

    #[test]
    fn test_override_headers_merge() {
        let overrides = ConfigOverride::new().with_header("X-Test", "1");
        let descriptor = compose(RequestKind::Public, &AgentConfig::default(), Some(&overrides));

        assert_eq!(descriptor.header("X-Test"), Some("1"));
        assert_eq!(descriptor.header("Cache-Control"), Some("no-cache"));
        assert_eq!(descriptor.header("Content-Type"), Some("application/json"));
    }

    #[test]
    fn test_override_replaces_header_case_insensitively() {
        let overrides = ConfigOverride::new().with_header("content-type", "text/plain");
        let descriptor = compose(RequestKind::Public, &AgentConfig::default(), Some(&overrides));

        assert_eq!(descriptor.header("Content-Type"), Some("text/plain"));
        let matching = descriptor
            .headers
            .keys()
            .filter(|k| k.eq_ignore_ascii_case("content-type"))
            .count();
        assert_eq!(matching, 1);
    }

    #[test]
    fn test_override_beats_agent_layer() {
        let config = AgentConfig::new().with_timeout(Duration::from_secs(5));
        let overrides = ConfigOverride::new()
            .with_base_url("https://api.binance.com/wapi/v3")
            .with_method(Method::DELETE)
            .with_timeout(Duration::from_secs(1))
            .with_status_policy(StatusPolicy::AcceptAll);

        let descriptor = compose(RequestKind::Public, &config, Some(&overrides));

        assert_eq!(descriptor.base_url, "https://api.binance.com/wapi/v3");
        assert_eq!(descriptor.method, Method::DELETE);
        assert_eq!(descriptor.timeout, Duration::from_secs(1));
        assert_eq!(descriptor.status_policy, StatusPolicy::AcceptAll);
    }

    #[test]
    fn test_empty_override_equals_defaults() {
        let config = AgentConfig::default();
        let plain = compose(RequestKind::Private, &config, None);
        let empty = compose(RequestKind::Private, &config, Some(&ConfigOverride::new()));
        assert_eq!(plain, empty);
    }

    #[test]
    fn test_base_urls() {
        let config = AgentConfig::default();
        assert_eq!(config.api_base_url(), "https://api.binance.com/api/v3");
        assert_eq!(config.wapi_base_url(), "https://api.binance.com/wapi/v3");
    }

    #[test]
    fn test_validate() {
        assert!(AgentConfig::default().validate().is_ok());
        assert_eq!(
            AgentConfig::new().with_root_url("").validate(),
            Err(ConfigError::EmptyRootUrl)
        );
        assert!(matches!(
            AgentConfig::new().with_root_url("ftp://x").validate(),
            Err(ConfigError::InvalidRootUrl { .. })
        ));
        assert_eq!(
            AgentConfig::new().with_timeout(Duration::ZERO).validate(),
            Err(ConfigError::ZeroTimeout)
        );
    }

    #[test]
    fn test_recv_window_config() {
        assert_eq!(AgentConfig::default().recv_window, Some(5000));
        assert_eq!(AgentConfig::new().with_recv_window(10_000).recv_window, Some(10_000));
        assert_eq!(AgentConfig::new().without_recv_window().recv_window, None);
    }

    #[test]
    fn test_status_policy() {
        assert!(StatusPolicy::SuccessOnly.accepts(200));
        assert!(StatusPolicy::SuccessOnly.accepts(204));
        assert!(!StatusPolicy::SuccessOnly.accepts(400));
        assert!(!StatusPolicy::SuccessOnly.accepts(503));
        assert!(StatusPolicy::AcceptAll.accepts(418));
    }

    #[test]
    fn test_set_header_replaces_any_case() {
        let mut descriptor = compose(RequestKind::Private, &AgentConfig::default(), None);
        descriptor.headers.insert("x-mbx-apikey".to_string(), "stale".to_string());
        descriptor.set_header(API_KEY_HEADER, "fresh");

        assert_eq!(descriptor.header("X-MBX-APIKEY"), Some("fresh"));
        assert!(!descriptor.headers.contains_key("x-mbx-apikey"));
    }
}
