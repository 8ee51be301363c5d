//! # larascan-cli
//!
//! Command-line front end for the larascan scanner.
//!
//! ## Features
//!
//! - **Scan**: run the built-in recon and vulnerability checks concurrently
//! - **Checks**: list what would run, grouped by category
//! - **Config**: persistent defaults in a TOML file
//! - **Multiple output formats**: Pretty text, JSON, CSV, YAML

pub mod cli;
pub mod config;
pub mod logging;
pub mod output;

pub use cli::run;
