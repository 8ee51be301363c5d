use async_trait::async_trait;
use larascan_client::{HttpTransport, Transport};
use larascan_core::{Category, Check, Finding};
use tracing::debug;

use crate::checks::join_url;

const NAME: &str = "Sensitive Files";

/// Files and directories that must never be served
pub const SENSITIVE_PATHS: [&str; 21] = [
    "/.env",
    "/.env.local",
    "/.env.production",
    "/.env.staging",
    "/.env.backup",
    "/.env.old",
    "/.env.bak",
    "/.env.save",
    "/.git/config",
    "/.svn/wc.db",
    "/.DS_Store",
    "/.htaccess",
    "/.bash_history",
    "/.bashrc",
    "/.ssh/id_rsa",
    "/.ssh/known_hosts",
    "/composer.json",
    "/composer.lock",
    "/storage/logs/laravel.log",
    "/vendor/",
    "/node_modules/",
];

/// Requests a fixed list of secrets, VCS metadata and dependency folders
pub struct SensitiveFiles<T = HttpTransport> {
    transport: T,
}

impl<T: Transport> SensitiveFiles<T> {
    /// Create the check over `transport`
    pub const fn new(transport: T) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl<T: Transport + 'static> Check for SensitiveFiles<T> {
    fn name(&self) -> &str {
        NAME
    }

    fn category(&self) -> Category {
        Category::Vulnerabilities
    }

    async fn run(&self, target: &str) -> Vec<Finding> {
        let mut findings = Vec::new();

        for path in SENSITIVE_PATHS {
            let body = match self.transport.get(&join_url(target, path), &[]).await {
                Ok(resp) if resp.is_ok() => resp.text().await,
                Ok(_) => continue,
                Err(e) => Err(e),
            };

            match body {
                Ok(body) if !body.is_empty() => findings.push(
                    Finding::new(
                        Category::Vulnerabilities,
                        NAME,
                        "Sensitive file or directory exposed",
                        path,
                    )
                    .status(200)
                    .detail(format!("Exposed path: {path}")),
                ),
                Ok(_) => {}
                Err(e) => debug!(path, error = %e, "sensitive path request failed"),
            }
        }

        if findings.is_empty() {
            findings.push(Finding::new(
                Category::Vulnerabilities,
                NAME,
                "No sensitive files or directories detected",
                target,
            ));
        }

        findings
    }
}
