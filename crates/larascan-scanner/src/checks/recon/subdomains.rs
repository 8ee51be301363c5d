use std::time::Duration;

use async_trait::async_trait;
use larascan_client::{DnsResolver, Resolver};
use larascan_core::{Category, Check, Finding};
use tracing::debug;

const NAME: &str = "Subdomain Enumeration";

const COMMON_SUBDOMAINS: [&str; 5] = ["www", "api", "admin", "dev", "test"];

/// Pause between lookups so the target's resolvers are not hammered
pub const DEFAULT_LOOKUP_DELAY: Duration = Duration::from_millis(500);

/// Resolves a handful of common subdomains of the target host
pub struct SubdomainEnumeration<R = DnsResolver> {
    resolver: R,
    delay: Duration,
}

impl<R: Resolver> SubdomainEnumeration<R> {
    /// Create the check over `resolver`
    pub const fn new(resolver: R) -> Self {
        Self {
            resolver,
            delay: DEFAULT_LOOKUP_DELAY,
        }
    }

    /// Change the pause between lookups
    #[must_use]
    pub const fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

/// Host part of a target URL, tolerating bare host names
fn extract_domain(target: &str) -> String {
    if let Some(host) = url::Url::parse(target)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
    {
        return host;
    }

    let rest = target.split_once("//").map_or(target, |(_, rest)| rest);
    rest.split(['/', ':']).next().unwrap_or(rest).to_string()
}

#[async_trait]
impl<R: Resolver + 'static> Check for SubdomainEnumeration<R> {
    fn name(&self) -> &str {
        NAME
    }

    fn category(&self) -> Category {
        Category::Recon
    }

    async fn run(&self, target: &str) -> Vec<Finding> {
        let domain = extract_domain(target);
        let mut found = Vec::new();

        for (i, sub) in COMMON_SUBDOMAINS.iter().enumerate() {
            if i > 0 && !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }

            let host = format!("{sub}.{domain}");
            match self.resolver.lookup(&host).await {
                Ok(addrs) if !addrs.is_empty() => found.push(host),
                Ok(_) => {}
                Err(e) => debug!(host = %host, error = %e, "subdomain did not resolve"),
            }
        }

        let finding = if found.is_empty() {
            Finding::new(Category::Recon, NAME, "No common subdomains found", target)
        } else {
            Finding::new(Category::Recon, NAME, "Found subdomains", target).detail(found.join(", "))
        };

        vec![finding]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_domain() {
        assert_eq!(extract_domain("https://example.com/app"), "example.com");
        assert_eq!(extract_domain("http://example.com:8080"), "example.com");
        assert_eq!(extract_domain("example.com/path"), "example.com");
        assert_eq!(extract_domain("example.com"), "example.com");
    }
}
