use async_trait::async_trait;
use larascan_client::{HttpTransport, Transport};
use larascan_core::{Category, Check, Finding};

use crate::checks::{failure, join_url};

const NAME: &str = "Livewire Scan";

const SCRIPT_PATHS: [&str; 4] = [
    "/vendor/livewire/livewire.js",
    "/vendor/livewire/livewire.min.js",
    "/livewire/livewire.js",
    "/livewire/livewire.min.js",
];

const V2_MARKER: &str = "window.livewire_token";
const V3_MARKER: &str = "window.livewireScriptConfig";

const V2_ADVISORIES: &[&str] = &[
    "Improper Input Validation >=2.2.4, <2.2.6: https://github.com/livewire/livewire/pull/1659",
];

const V3_ADVISORIES: &[&str] = &[
    "Cross-site Scripting (XSS) >=3.3.5, <3.4.9: https://www.cve.org/CVERecord?id=CVE-2024-21504",
];

/// Detects the Livewire companion package and its major version
pub struct Livewire<T = HttpTransport> {
    transport: T,
}

impl<T: Transport> Livewire<T> {
    /// Create the check over `transport`
    pub const fn new(transport: T) -> Self {
        Self { transport }
    }
}

fn advisories(list: &[&str]) -> String {
    list.iter()
        .map(|a| format!("- {a}"))
        .collect::<Vec<_>>()
        .join("; ")
}

#[async_trait]
impl<T: Transport + 'static> Check for Livewire<T> {
    fn name(&self) -> &str {
        NAME
    }

    fn category(&self) -> Category {
        Category::Recon
    }

    async fn run(&self, target: &str) -> Vec<Finding> {
        let mut findings = Vec::new();

        for path in SCRIPT_PATHS {
            let url = join_url(target, path);
            let resp = match self.transport.get(&url, &[]).await {
                Ok(resp) if resp.is_ok() => resp,
                _ => continue,
            };
            let status = resp.status;

            let body = match resp.text().await {
                Ok(body) => body,
                Err(e) => {
                    findings.push(failure(
                        Category::Recon,
                        NAME,
                        format!("Failed to read Livewire file content from {url}"),
                        path,
                        &e,
                    ));
                    continue;
                }
            };

            let finding = if body.contains(V2_MARKER) {
                Finding::new(
                    Category::Recon,
                    NAME,
                    format!("Livewire detected: Version 2.x at {url}"),
                    path,
                )
                .detail(advisories(V2_ADVISORIES))
            } else if body.contains(V3_MARKER) {
                Finding::new(
                    Category::Recon,
                    NAME,
                    format!("Livewire detected: Version 3.x at {url}"),
                    path,
                )
                .detail(advisories(V3_ADVISORIES))
            } else {
                Finding::new(
                    Category::Recon,
                    NAME,
                    format!("Livewire detected at {url}, but unable to determine version"),
                    path,
                )
            };
            findings.push(finding.status(status));
        }

        if findings.is_empty() {
            findings.push(Finding::new(
                Category::Recon,
                NAME,
                "Livewire not detected",
                target,
            ));
        }

        findings
    }
}
