use async_trait::async_trait;
use larascan_client::{HttpTransport, Transport};
use larascan_core::{Category, Check, Finding};

use crate::checks::{failure, join_url};

const NAME: &str = "Host Header Injection Scan";

/// Host value sent in place of the real one
const INJECTED_HOST: &str = "malicious.com";

const PASSWORD_RECOVERY_PATHS: [&str; 2] = ["/forgot-password", "/auth/forgot-password"];

/// Sends a forged `Host` header and looks for it in the response.
///
/// When the value is reflected, a reachable password recovery page raises a
/// second finding: reset links built from the forged host lead to account
/// takeover.
pub struct HostHeaderInjection<T = HttpTransport> {
    transport: T,
}

impl<T: Transport> HostHeaderInjection<T> {
    /// Create the check over `transport`
    pub const fn new(transport: T) -> Self {
        Self { transport }
    }

    async fn has_password_recovery(&self, target: &str) -> bool {
        for path in PASSWORD_RECOVERY_PATHS {
            if let Ok(resp) = self.transport.get(&join_url(target, path), &[]).await {
                if resp.is_ok() {
                    return true;
                }
            }
        }
        false
    }
}

#[async_trait]
impl<T: Transport + 'static> Check for HostHeaderInjection<T> {
    fn name(&self) -> &str {
        NAME
    }

    fn category(&self) -> Category {
        Category::Recon
    }

    async fn run(&self, target: &str) -> Vec<Finding> {
        let resp = match self.transport.get(target, &[("Host", INJECTED_HOST)]).await {
            Ok(resp) => resp,
            Err(e) => {
                return vec![failure(
                    Category::Recon,
                    NAME,
                    format!("Failed to send request to {target}"),
                    target,
                    &e,
                )];
            }
        };
        let status = resp.status;

        let body = match resp.text().await {
            Ok(body) => body,
            Err(e) => {
                return vec![failure(
                    Category::Recon,
                    NAME,
                    "Failed to read response body",
                    target,
                    &e,
                )];
            }
        };

        if !body.contains(INJECTED_HOST) {
            return vec![Finding::new(
                Category::Recon,
                NAME,
                "No Host Header Injection detected",
                target,
            )
            .status(status)];
        }

        let mut findings = vec![Finding::new(
            Category::Recon,
            NAME,
            "Host Header Injection detected",
            target,
        )
        .status(status)
        .detail("The response contains the injected Host header value.")];

        if self.has_password_recovery(target).await {
            findings.push(
                Finding::new(
                    Category::Recon,
                    NAME,
                    "Password recovery functionality detected, potential account takeover \
                     vulnerability due to Host Header Injection",
                    target,
                )
                .status(status)
                .detail(
                    "If the application sends password reset links using the injected Host \
                     header, it could lead to an account takeover vulnerability.",
                ),
            );
        }

        findings
    }
}
