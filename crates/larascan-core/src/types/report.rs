use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Category, Finding};

/// Findings of one complete run against a target
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    /// Target that was scanned
    pub target: String,

    /// When the run started
    pub started_at: DateTime<Utc>,

    /// When the last check finished
    pub finished_at: DateTime<Utc>,

    /// Every finding, in completion order
    pub findings: Vec<Finding>,
}

impl ScanReport {
    /// Wall-clock duration of the run
    #[must_use]
    pub fn duration(&self) -> chrono::Duration {
        self.finished_at - self.started_at
    }

    /// Number of findings marked as failures
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.findings.iter().filter(|f| f.is_error()).count()
    }

    /// Findings labelled with the given category
    pub fn in_category(&self, category: Category) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(move |f| f.category == category)
    }
}
