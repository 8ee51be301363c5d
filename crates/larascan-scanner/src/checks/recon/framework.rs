use async_trait::async_trait;
use larascan_client::{HttpTransport, Transport};
use larascan_core::{Category, Check, Finding};

use crate::checks::failure;

const NAME: &str = "Framework Detection";

/// Looks for Laravel fingerprints in the landing page headers and cookies
pub struct FrameworkDetection<T = HttpTransport> {
    transport: T,
}

impl<T: Transport> FrameworkDetection<T> {
    /// Create the check over `transport`
    pub const fn new(transport: T) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl<T: Transport + 'static> Check for FrameworkDetection<T> {
    fn name(&self) -> &str {
        NAME
    }

    fn category(&self) -> Category {
        Category::Recon
    }

    async fn run(&self, target: &str) -> Vec<Finding> {
        let resp = match self.transport.get(target, &[]).await {
            Ok(resp) => resp,
            Err(e) => {
                return vec![failure(
                    Category::Recon,
                    NAME,
                    "Failed to make request",
                    target,
                    &e,
                )]
            }
        };

        let mut findings = Vec::new();

        if let Some(powered_by) = resp.header("x-powered-by").filter(|v| v.contains("PHP")) {
            findings.push(
                Finding::new(
                    Category::Recon,
                    NAME,
                    "Possible Laravel framework detected via X-Powered-By header",
                    target,
                )
                .status(resp.status)
                .detail(powered_by),
            );
        }

        for cookie in resp.cookie_names() {
            if cookie.contains("laravel") {
                findings.push(
                    Finding::new(
                        Category::Recon,
                        NAME,
                        "Laravel framework detected via cookie name",
                        target,
                    )
                    .status(resp.status)
                    .detail(cookie),
                );
            }
        }

        if findings.is_empty() {
            findings.push(
                Finding::new(Category::Recon, NAME, "Laravel framework not detected", target)
                    .status(resp.status),
            );
        }

        findings
    }
}
