use async_trait::async_trait;
use larascan_client::{HttpTransport, Transport};
use larascan_core::{Category, Check, Finding};

use crate::checks::join_url;

const NAME: &str = "Laravel Tools";

/// Debugging tools and admin panels commonly shipped with Laravel apps
pub const TOOL_PATHS: [&str; 8] = [
    "/_debugbar",
    "/telescope",
    "/horizon",
    "/nova",
    "/admin",
    "/phpmyadmin",
    "/_ignition/execute-solution",
    "/_ignition/health-check",
];

const TOOL_MARKERS: [&str; 8] = [
    "Debugbar",
    "Telescope",
    "Horizon",
    "Nova",
    "phpMyAdmin",
    "Ignition",
    "Laravel",
    "Admin",
];

/// Only the head of the page is read
const BODY_SNIFF_LIMIT: usize = 512;

/// Distinguishes publicly reachable tools from ones behind access control
pub struct ToolsDetection<T = HttpTransport> {
    transport: T,
}

impl<T: Transport> ToolsDetection<T> {
    /// Create the check over `transport`
    pub const fn new(transport: T) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl<T: Transport + 'static> Check for ToolsDetection<T> {
    fn name(&self) -> &str {
        NAME
    }

    fn category(&self) -> Category {
        Category::Vulnerabilities
    }

    async fn run(&self, target: &str) -> Vec<Finding> {
        let mut exposed = Vec::new();
        let mut restricted = Vec::new();

        for path in TOOL_PATHS {
            let Ok(resp) = self.transport.get(&join_url(target, path), &[]).await else {
                continue;
            };

            let status = resp.status;
            match status {
                401 | 403 => restricted.push(format!("{path} (Status: {status})")),
                200 => {
                    let Ok(head) = resp.text_prefix(BODY_SNIFF_LIMIT).await else {
                        continue;
                    };
                    if TOOL_MARKERS.iter().any(|m| head.contains(m)) {
                        exposed.push(path.to_string());
                    }
                }
                _ => {}
            }
        }

        let mut findings = Vec::with_capacity(2);

        if exposed.is_empty() {
            findings.push(Finding::new(
                Category::Vulnerabilities,
                NAME,
                "No publicly exposed tools or admin interfaces detected",
                "",
            ));
        } else {
            findings.push(
                Finding::new(
                    Category::Vulnerabilities,
                    NAME,
                    "Publicly exposed tools and admin interfaces detected",
                    exposed.join(", "),
                )
                .status(200),
            );
        }

        if !restricted.is_empty() {
            findings.push(
                Finding::new(
                    Category::Recon,
                    NAME,
                    "Tools and admin interfaces exist but are access-restricted",
                    restricted.join(", "),
                )
                .status(403),
            );
        }

        findings
    }
}
