//! Core types and traits for the larascan scanner.
//!
//! This crate provides the foundational pieces shared across the workspace:
//!
//! - **Types**: [`Finding`], the [`Category`] label and the [`ScanReport`] wrapper
//! - **Contract**: the [`Check`] trait every check implements
//! - **Errors**: [`ScanError`] and the [`Result`] alias
//!
//! # Example
//!
//! ```rust,ignore
//! use larascan_core::{Category, Check, Finding};
//!
//! struct Ping;
//!
//! #[async_trait::async_trait]
//! impl Check for Ping {
//!     fn name(&self) -> &str {
//!         "Ping"
//!     }
//!
//!     fn category(&self) -> Category {
//!         Category::Recon
//!     }
//!
//!     async fn run(&self, target: &str) -> Vec<Finding> {
//!         vec![Finding::new(Category::Recon, self.name(), "Pong", target)]
//!     }
//! }
//! ```

#![doc(html_root_url = "https://docs.rs/larascan-core/1.0.0")]

mod check;
mod error;
pub mod types;

pub use check::Check;
pub use error::{Result, ScanError};
pub use types::*;
