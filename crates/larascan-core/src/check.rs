//! The capability contract implemented by every check.

use async_trait::async_trait;

use crate::types::{Category, Finding};

/// A single independent check against a target.
///
/// Implementations hold only their collaborators (HTTP transport, DNS
/// resolver) and are shared read-only between runs.
///
/// # Contract
///
/// - [`run`](Check::run) never fails: transport and decode errors are turned
///   into a [`Finding`] with `status_code == 0` (or the real status when one
///   was received) and the error text in `detail`.
/// - [`run`](Check::run) returns at least one finding, including the benign
///   "nothing detected" case.
/// - [`name`](Check::name) is constant for the lifetime of the instance and
///   tags every finding the check produces.
#[async_trait]
pub trait Check: Send + Sync {
    /// Stable, human-readable identifier
    fn name(&self) -> &str;

    /// Default label for findings produced by this check
    fn category(&self) -> Category;

    /// Inspect `target` and report what was observed
    async fn run(&self, target: &str) -> Vec<Finding>;
}
