use async_trait::async_trait;
use larascan_client::{HttpTransport, Transport};
use larascan_core::{Category, Check, Finding};

use crate::checks::{failure, join_url};

const NAME: &str = "CSRF Token";

const FORM_PATHS: [&str; 3] = ["/", "/login", "/register"];

const TOKEN_MARKERS: [&str; 2] = ["csrf_token", "_token"];

/// Checks whether form pages embed a CSRF token
pub struct CsrfToken<T = HttpTransport> {
    transport: T,
}

impl<T: Transport> CsrfToken<T> {
    /// Create the check over `transport`
    pub const fn new(transport: T) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl<T: Transport + 'static> Check for CsrfToken<T> {
    fn name(&self) -> &str {
        NAME
    }

    fn category(&self) -> Category {
        Category::Vulnerabilities
    }

    async fn run(&self, target: &str) -> Vec<Finding> {
        let mut findings = Vec::with_capacity(FORM_PATHS.len());

        for path in FORM_PATHS {
            let url = join_url(target, path);
            let resp = match self.transport.get(&url, &[]).await {
                Ok(resp) => resp,
                Err(e) => {
                    findings.push(failure(
                        Category::Vulnerabilities,
                        NAME,
                        format!("Failed to make request to {url}"),
                        path,
                        &e,
                    ));
                    continue;
                }
            };
            let status = resp.status;

            let finding = match resp.text().await {
                Ok(body) if TOKEN_MARKERS.iter().any(|m| body.contains(m)) => {
                    Finding::new(Category::Vulnerabilities, NAME, "CSRF token found", path)
                        .status(status)
                        .detail(format!("CSRF token found on {url}"))
                }
                Ok(_) => {
                    Finding::new(Category::Vulnerabilities, NAME, "CSRF token not found", path)
                        .status(status)
                }
                Err(e) => failure(
                    Category::Vulnerabilities,
                    NAME,
                    format!("Failed to read response body from {url}"),
                    path,
                    &e,
                ),
            };
            findings.push(finding);
        }

        findings
    }
}
