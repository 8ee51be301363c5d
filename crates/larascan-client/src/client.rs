//! reqwest-backed HTTP transport.

use crate::config::TransportConfig;
use crate::transport::{HttpResponse, Transport};
use async_trait::async_trait;
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use larascan_core::{Result, ScanError};
use reqwest::header::{HeaderName, HeaderValue};
use reqwest::Client as HttpClient;
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// HTTP transport used by the built-in checks
#[derive(Clone)]
pub struct HttpTransport {
    inner: Arc<TransportInner>,
}

struct TransportInner {
    http: HttpClient,
    timeout: Duration,
    limiter: Option<DefaultDirectRateLimiter>,
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("timeout", &self.inner.timeout)
            .field("rate_limited", &self.inner.limiter.is_some())
            .finish_non_exhaustive()
    }
}

impl HttpTransport {
    /// Create a transport with default settings
    pub fn new() -> Result<Self> {
        HttpTransportBuilder::new().build()
    }

    /// Create a builder for custom configuration
    #[must_use]
    pub fn builder() -> HttpTransportBuilder {
        HttpTransportBuilder::new()
    }

    /// Create a transport from shared scan settings
    pub fn from_config(config: &TransportConfig) -> Result<Self> {
        HttpTransportBuilder::new()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .rate_limit(config.requests_per_second)
            .build()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str, headers: &[(&str, &str)]) -> Result<HttpResponse> {
        if let Some(limiter) = &self.inner.limiter {
            limiter.until_ready().await;
        }

        debug!(url = %url, "GET request");

        let mut request = self.inner.http.get(url);
        for (name, value) in headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| ScanError::InvalidHeader(format!("{name}: {e}")))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| ScanError::InvalidHeader(format!("{name}: {e}")))?;
            request = request.header(name, value);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                ScanError::Timeout(self.inner.timeout.as_secs())
            } else {
                ScanError::Http(e.to_string())
            }
        })?;

        debug!(url = %url, status = response.status().as_u16(), "response received");
        Ok(HttpResponse::streaming(response))
    }
}

/// Builder for configuring an [`HttpTransport`]
pub struct HttpTransportBuilder {
    timeout: Duration,
    user_agent: String,
    requests_per_second: Option<NonZeroU32>,
}

impl Default for HttpTransportBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpTransportBuilder {
    /// Create a builder with the default timeout and User-Agent
    #[must_use]
    pub fn new() -> Self {
        let defaults = TransportConfig::default();
        Self {
            timeout: defaults.timeout,
            user_agent: defaults.user_agent,
            requests_per_second: defaults.requests_per_second,
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

    /// Limit this transport to `rps` requests per second
    #[must_use]
    pub const fn rate_limit(mut self, rps: Option<NonZeroU32>) -> Self {
        self.requests_per_second = rps;
        self
    }

    /// Build the transport
    pub fn build(self) -> Result<HttpTransport> {
        let http = HttpClient::builder()
            .timeout(self.timeout)
            .user_agent(&self.user_agent)
            .gzip(true)
            .build()
            .map_err(|e| ScanError::Config(format!("failed to build HTTP client: {e}")))?;

        let limiter = self
            .requests_per_second
            .map(|rps| RateLimiter::direct(Quota::per_second(rps)));

        Ok(HttpTransport {
            inner: Arc::new(TransportInner {
                http,
                timeout: self.timeout,
                limiter,
            }),
        })
    }
}
