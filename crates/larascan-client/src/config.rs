//! Transport configuration types.

use std::num::NonZeroU32;
use std::time::Duration;

/// Default per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default User-Agent sent with every request
pub const DEFAULT_USER_AGENT: &str = concat!("larascan/", env!("CARGO_PKG_VERSION"));

/// Settings shared by every transport built for a scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportConfig {
    /// Connect + read timeout for a single request
    pub timeout: Duration,

    /// User-Agent header value
    pub user_agent: String,

    /// Maximum requests per second for one transport (`None` = unlimited)
    pub requests_per_second: Option<NonZeroU32>,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl TransportConfig {
    /// Create a configuration with the default timeout and no rate limit
    #[must_use]
    pub fn new() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            requests_per_second: None,
        }
    }

    /// Set the request timeout
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the User-Agent header
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    /// Limit each transport to `rps` requests per second
    #[must_use]
    pub const fn requests_per_second(mut self, rps: Option<NonZeroU32>) -> Self {
        self.requests_per_second = rps;
        self
    }
}
