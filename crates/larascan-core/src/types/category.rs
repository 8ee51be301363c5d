use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::ScanError;

/// Classification label for checks and findings
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Information gathering about the target stack
    Recon,
    /// Misconfigurations and exposures
    Vulnerabilities,
}

impl Category {
    /// All categories, in registry order
    pub const ALL: [Self; 2] = [Self::Recon, Self::Vulnerabilities];

    /// Returns the display label
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recon => "Recon",
            Self::Vulnerabilities => "Vulnerabilities",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ScanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "recon" => Ok(Self::Recon),
            "vulnerabilities" | "vulns" | "vuln" => Ok(Self::Vulnerabilities),
            other => Err(ScanError::Config(format!(
                "unknown category '{other}', expected 'recon' or 'vulnerabilities'"
            ))),
        }
    }
}
