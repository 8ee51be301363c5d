//! Command-line argument definitions using clap.

use std::num::NonZeroU32;
use std::path::PathBuf;

use clap::builder::{NonEmptyStringValueParser, RangedU64ValueParser};
use clap::{Args, Parser, Subcommand};
use larascan::Category;

use crate::output::OutputFormat;

/// Reconnaissance and vulnerability scanner for Laravel applications
///
/// Scans a target for framework fingerprints, exposed files, debug pages
/// and admin tooling. Every check sends plain GET requests.
#[derive(Parser, Debug)]
#[command(name = "larascan")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, global = true, value_enum)]
    pub output: Option<OutputFormat>,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Use this configuration file instead of the default location
    #[arg(long, global = true, env = "LARASCAN_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan a Laravel application
    Scan(ScanArgs),

    /// List the built-in checks by category
    Checks,

    /// Manage CLI configuration
    Config(ConfigArgs),
}

// ============================================================================
// Scan command
// ============================================================================

#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Target URL (e.g., https://app.example.com)
    #[arg(short, long, value_parser = NonEmptyStringValueParser::new())]
    pub url: String,

    /// Maximum number of checks running at once [default: 5]
    #[arg(short, long, value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
    pub threads: Option<usize>,

    /// Only run checks in this category (repeatable)
    #[arg(short, long = "category", value_name = "CATEGORY")]
    pub categories: Vec<Category>,

    /// Per-request timeout in seconds [default: 10]
    #[arg(long, value_name = "SECS", value_parser = RangedU64ValueParser::<u64>::new().range(1..))]
    pub timeout: Option<u64>,

    /// Maximum requests per second for each check
    #[arg(long, value_name = "RPS")]
    pub rate_limit: Option<NonZeroU32>,

    /// Sort findings by check name and path instead of arrival order
    #[arg(long)]
    pub sort: bool,
}

// ============================================================================
// Config command
// ============================================================================

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key (threads, timeout_secs, user_agent, rate_limit, output_format, log_level)
        key: String,

        /// Value to set
        value: String,
    },

    /// Show configuration file path
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_scan_args() {
        let cli = Cli::try_parse_from([
            "larascan",
            "scan",
            "--url",
            "https://app.test",
            "-t",
            "8",
            "-c",
            "recon",
            "--category",
            "vulns",
            "--sort",
        ])
        .unwrap();

        let Commands::Scan(args) = cli.command else {
            panic!("expected scan");
        };
        assert_eq!(args.url, "https://app.test");
        assert_eq!(args.threads, Some(8));
        assert_eq!(args.categories, [Category::Recon, Category::Vulnerabilities]);
        assert!(args.sort);
        assert!(args.timeout.is_none());
    }

    #[test]
    fn test_zero_threads_rejected() {
        let err = Cli::try_parse_from(["larascan", "scan", "--url", "https://a.test", "-t", "0"])
            .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn test_empty_url_rejected() {
        assert!(Cli::try_parse_from(["larascan", "scan", "--url", ""]).is_err());
        assert!(Cli::try_parse_from(["larascan", "scan"]).is_err());
    }

    #[test]
    fn test_unknown_category_rejected() {
        assert!(
            Cli::try_parse_from(["larascan", "scan", "--url", "https://a.test", "-c", "misc"])
                .is_err()
        );
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["larascan", "checks", "-o", "json", "--no-color"]).unwrap();
        assert_eq!(cli.output, Some(OutputFormat::Json));
        assert!(cli.no_color);
    }
}
