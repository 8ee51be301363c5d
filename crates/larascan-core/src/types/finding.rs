use serde::{Deserialize, Serialize};

use super::Category;

/// One observation made by a check.
///
/// A `status_code` of `0` means no HTTP round trip applies: the request
/// failed, or the check does not speak HTTP (DNS lookups).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Finding {
    /// Classification label
    pub category: Category,

    /// Name of the check that produced this finding
    pub scan_name: String,

    /// Human-readable summary
    pub description: String,

    /// Requested URL or path
    pub path: String,

    /// HTTP status, or `0` when not applicable
    #[serde(default)]
    pub status_code: u16,

    /// Supporting evidence or error text
    #[serde(default)]
    pub detail: String,

    /// Set when the finding stands in for a request or check that failed
    #[serde(default)]
    pub failed: bool,
}

impl Finding {
    /// Create a finding with no status and no detail
    #[must_use]
    pub fn new(
        category: Category,
        scan_name: impl Into<String>,
        description: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            category,
            scan_name: scan_name.into(),
            description: description.into(),
            path: path.into(),
            status_code: 0,
            detail: String::new(),
            failed: false,
        }
    }

    /// Set the HTTP status
    #[must_use]
    pub const fn status(mut self, status_code: u16) -> Self {
        self.status_code = status_code;
        self
    }

    /// Set the detail text
    #[must_use]
    pub fn detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = detail.into();
        self
    }

    /// Mark this finding as recording a failure rather than an observation
    #[must_use]
    pub const fn as_failure(mut self) -> Self {
        self.failed = true;
        self
    }

    /// Returns true if this finding records a failed request or an aborted
    /// check rather than an observation about the target.
    ///
    /// Only the explicit marker counts; the description text is never
    /// inspected.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        self.failed
    }

    /// Sort findings by check name, then path, for stable reports.
    ///
    /// The orchestrator returns findings in completion order; callers that
    /// need reproducible output sort with this.
    pub fn sort_for_report(findings: &mut [Self]) {
        findings.sort_by(|a, b| {
            a.scan_name
                .cmp(&b.scan_name)
                .then_with(|| a.path.cmp(&b.path))
                .then_with(|| a.description.cmp(&b.description))
        });
    }
}

impl std::fmt::Display for Finding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "[{}] [{}]", self.category, self.scan_name)?;
        writeln!(f, "Path:{}", self.path)?;
        write!(
            f,
            "Details: {} (Status Code: {}). {}",
            self.description, self.status_code, self.detail
        )
    }
}
