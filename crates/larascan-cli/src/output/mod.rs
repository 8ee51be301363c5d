//! Output formatting for different formats.

use std::io::Write;
use std::str::FromStr;

use anyhow::Result;
use clap::ValueEnum;
use colored::{ColoredString, Colorize};
use larascan::{Category, Finding, ScanReport};
use serde::{Deserialize, Serialize};

/// Available output formats.
#[derive(Debug, Clone, Copy, Default, ValueEnum, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Findings as text blocks with colors
    #[default]
    Pretty,
    /// JSON output
    Json,
    /// CSV output, one row per finding
    Csv,
    /// YAML output
    Yaml,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            "yaml" | "yml" => Ok(Self::Yaml),
            _ => anyhow::bail!(
                "Unknown output format: {}\n\
                 Valid formats: pretty, json, csv, yaml",
                s
            ),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pretty => write!(f, "pretty"),
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
            Self::Yaml => write!(f, "yaml"),
        }
    }
}

/// Write `report` to `out` in `format`.
pub fn write_report<W: Write>(out: &mut W, report: &ScanReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, report)?;
            writeln!(out)?;
        }
        OutputFormat::Yaml => {
            serde_yaml::to_writer(&mut *out, report)?;
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(&mut *out);
            for finding in &report.findings {
                writer.serialize(finding)?;
            }
            writer.flush()?;
        }
        OutputFormat::Pretty => {
            for finding in &report.findings {
                writeln!(out, "{}", highlight(finding))?;
                writeln!(out)?;
            }
            writeln!(out, "{}", summary(report).dimmed())?;
        }
    }

    Ok(())
}

/// Color a finding by outcome without changing its text
fn highlight(finding: &Finding) -> ColoredString {
    let text = finding.to_string();
    if finding.is_error() {
        text.red()
    } else if finding.category == Category::Vulnerabilities
        && (200..300).contains(&finding.status_code)
    {
        text.yellow()
    } else {
        text.normal()
    }
}

fn summary(report: &ScanReport) -> String {
    let millis = report.duration().num_milliseconds().max(0);
    #[allow(clippy::cast_precision_loss)]
    let secs = millis as f64 / 1000.0;
    format!(
        "Scanned {} in {:.1}s: {} findings ({} recon, {} vulnerabilities, {} failed)",
        report.target,
        secs,
        report.findings.len(),
        report.in_category(Category::Recon).count(),
        report.in_category(Category::Vulnerabilities).count(),
        report.error_count(),
    )
}
