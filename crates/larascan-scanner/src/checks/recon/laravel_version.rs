use async_trait::async_trait;
use larascan_client::{HttpTransport, Transport};
use larascan_core::{Category, Check, Finding, Result, ScanError};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::checks::{failure, join_url};

const NAME: &str = "Laravel Version Detection";

const FRAMEWORK_PACKAGE: &str = "laravel/framework";

static PHP_VERSION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"PHP/([\d.]+)").expect("PHP version pattern is valid"));

/// PHP version prefix to the Laravel releases that support it
const PHP_TO_LARAVEL: [(&str, &str); 6] = [
    ("7.2", "Laravel 5.6.x - 6.x"),
    ("7.3", "Laravel 6.x - 7.x"),
    ("7.4", "Laravel 7.x - 8.x"),
    ("8.0", "Laravel 8.x - 9.x"),
    ("8.1", "Laravel 9.x - 11.x"),
    ("8.2", "Laravel 10.x - 11.x"),
];

#[derive(Deserialize)]
struct ComposerJson {
    #[serde(default)]
    require: Value,
}

#[derive(Deserialize)]
struct ComposerLock {
    #[serde(default)]
    packages: Value,
}

enum Manifest {
    Version(String),
    Absent,
    Unreadable { status: u16, error: ScanError },
}

/// Framework constraint from the `require` table of a `composer.json`.
///
/// A `require` that is not an object (composer writes `[]` when empty)
/// simply has no framework entry.
fn required_framework(body: &str) -> Result<Option<String>> {
    let manifest: ComposerJson = serde_json::from_str(body)?;
    Ok(manifest
        .require
        .get(FRAMEWORK_PACKAGE)
        .and_then(Value::as_str)
        .map(str::to_string))
}

/// Locked framework version from a `composer.lock`
fn locked_framework(body: &str) -> Result<Option<String>> {
    let lock: ComposerLock = serde_json::from_str(body)?;
    Ok(lock
        .packages
        .as_array()
        .into_iter()
        .flatten()
        .find(|p| p.get("name").and_then(Value::as_str) == Some(FRAMEWORK_PACKAGE))
        .and_then(|p| p.get("version"))
        .and_then(Value::as_str)
        .map(str::to_string))
}

/// Infers the Laravel version from composer manifests, an exposed vendor
/// directory, and the PHP version the server advertises
pub struct LaravelVersion<T = HttpTransport> {
    transport: T,
}

impl<T: Transport> LaravelVersion<T> {
    /// Create the check over `transport`
    pub const fn new(transport: T) -> Self {
        Self { transport }
    }

    async fn manifest(
        &self,
        target: &str,
        path: &str,
        extract: fn(&str) -> Result<Option<String>>,
    ) -> Manifest {
        let resp = match self.transport.get(&join_url(target, path), &[]).await {
            Ok(resp) if resp.is_ok() => resp,
            Ok(_) => return Manifest::Absent,
            Err(e) => {
                debug!(path, error = %e, "manifest request failed");
                return Manifest::Absent;
            }
        };
        let status = resp.status;

        let body = match resp.text().await {
            Ok(body) => body,
            Err(e) => {
                debug!(path, error = %e, "manifest body unreadable");
                return Manifest::Absent;
            }
        };

        match extract(&body) {
            Ok(Some(version)) => Manifest::Version(version),
            Ok(None) => Manifest::Absent,
            Err(error) => Manifest::Unreadable { status, error },
        }
    }

    async fn vendor_exposed(&self, target: &str) -> bool {
        match self.transport.get(&join_url(target, "/vendor/"), &[]).await {
            Ok(resp) if resp.is_ok() => resp
                .text()
                .await
                .is_ok_and(|body| body.contains(FRAMEWORK_PACKAGE) || body.contains("symfony/")),
            _ => false,
        }
    }

    /// Reads only the `X-Powered-By` header; the body is left on the wire
    async fn php_version(&self, target: &str) -> Option<String> {
        let resp = self.transport.get(target, &[]).await.ok()?;
        if !resp.is_ok() {
            return None;
        }
        let powered_by = resp.header("x-powered-by")?;
        PHP_VERSION
            .captures(powered_by)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }
}

/// Laravel release range that supports `php_version`
#[must_use]
pub fn guess_laravel_range(php_version: &str) -> String {
    PHP_TO_LARAVEL
        .iter()
        .find(|(prefix, _)| php_version.starts_with(prefix))
        .map_or_else(
            || format!("Unknown Laravel version (based on PHP version {php_version})"),
            |(_, range)| (*range).to_string(),
        )
}

#[async_trait]
impl<T: Transport + 'static> Check for LaravelVersion<T> {
    fn name(&self) -> &str {
        NAME
    }

    fn category(&self) -> Category {
        Category::Recon
    }

    async fn run(&self, target: &str) -> Vec<Finding> {
        let mut findings = Vec::new();

        let manifests = [
            (
                "/composer.json",
                self.manifest(target, "/composer.json", required_framework).await,
            ),
            (
                "/composer.lock",
                self.manifest(target, "/composer.lock", locked_framework).await,
            ),
        ];
        for (path, manifest) in manifests {
            match manifest {
                Manifest::Version(version) => findings.push(
                    Finding::new(
                        Category::Recon,
                        NAME,
                        format!("Laravel version detected from {path}: {version}"),
                        path,
                    )
                    .status(200)
                    .detail(version),
                ),
                Manifest::Unreadable { status, error } => findings.push(
                    failure(Category::Recon, NAME, format!("Failed to parse {path}"), path, &error)
                        .status(status),
                ),
                Manifest::Absent => {}
            }
        }

        if self.vendor_exposed(target).await {
            findings.push(
                Finding::new(
                    Category::Recon,
                    NAME,
                    "Possible Laravel installation detected via exposed vendor folder",
                    "/vendor/",
                )
                .status(200),
            );
        }

        if let Some(php) = self.php_version(target).await {
            findings.push(
                Finding::new(
                    Category::Recon,
                    NAME,
                    format!("Laravel version range guessed based on PHP version {php}"),
                    target,
                )
                .status(200)
                .detail(guess_laravel_range(&php)),
            );
        }

        if findings.is_empty() {
            findings.push(Finding::new(
                Category::Recon,
                NAME,
                "Laravel version could not be detected",
                target,
            ));
        }

        findings
    }
}
