//! Host name resolution.

use async_trait::async_trait;
use hickory_resolver::config::ResolverConfig;
use hickory_resolver::name_server::TokioConnectionProvider;
use hickory_resolver::TokioResolver;
use larascan_core::{Result, ScanError};
use std::net::IpAddr;
use tracing::{debug, warn};

/// Resolves host names on behalf of a check
#[async_trait]
pub trait Resolver: Send + Sync {
    /// Addresses `host` resolves to; an error when it does not resolve
    async fn lookup(&self, host: &str) -> Result<Vec<IpAddr>>;
}

/// System resolver backed by hickory
#[derive(Clone)]
pub struct DnsResolver {
    inner: TokioResolver,
}

impl Default for DnsResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for DnsResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DnsResolver").finish_non_exhaustive()
    }
}

impl DnsResolver {
    /// Create a resolver from the system configuration.
    ///
    /// Falls back to hickory's default upstream servers when the system
    /// configuration cannot be read.
    pub fn new() -> Self {
        let builder = TokioResolver::builder_tokio().unwrap_or_else(|e| {
            warn!(error = %e, "system resolver configuration unavailable, using defaults");
            TokioResolver::builder_with_config(
                ResolverConfig::default(),
                TokioConnectionProvider::default(),
            )
        });
        Self {
            inner: builder.build(),
        }
    }
}

#[async_trait]
impl Resolver for DnsResolver {
    async fn lookup(&self, host: &str) -> Result<Vec<IpAddr>> {
        debug!(host, "resolving");
        let lookup = self
            .inner
            .lookup_ip(host)
            .await
            .map_err(|e| ScanError::Dns(e.to_string()))?;
        Ok(lookup.iter().collect())
    }
}
