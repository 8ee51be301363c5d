//! Built-in Laravel checks.
//!
//! Every check issues read-only requests through its own collaborator and maps
//! what it sees to findings. Failures never escape a check; they become
//! findings carrying the error text.

pub mod recon;
pub mod vulnerabilities;

use larascan_core::{Category, Finding, ScanError};

/// `target` with `path` appended, without doubling the slash
pub(crate) fn join_url(target: &str, path: &str) -> String {
    format!("{}{}", target.trim_end_matches('/'), path)
}

/// Finding for a request that failed, marked with [`Finding::as_failure`].
///
/// Transport failures get status 0; body read failures keep the status
/// that was received.
pub(crate) fn failure(
    category: Category,
    name: &str,
    description: impl Into<String>,
    path: impl Into<String>,
    err: &ScanError,
) -> Finding {
    Finding::new(category, name, description, path)
        .status(err.status_code().unwrap_or(0))
        .detail(err.to_string())
        .as_failure()
}
