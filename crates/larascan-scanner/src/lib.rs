//! Check registry, bounded-concurrency orchestrator and the built-in checks.
//!
//! ```rust,ignore
//! use larascan_client::TransportConfig;
//! use larascan_scanner::{Orchestrator, Registry};
//!
//! # async fn demo() -> larascan_core::Result<()> {
//! let registry = Registry::builtin(&TransportConfig::default())?;
//! let findings = Orchestrator::new(registry)
//!     .run("https://example.com", 5)
//!     .await?;
//! # Ok(())
//! # }
//! ```

#![doc(html_root_url = "https://docs.rs/larascan-scanner/1.0.0")]

pub mod checks;
mod orchestrator;
mod registry;

pub use orchestrator::{Orchestrator, RESULT_BUFFER};
pub use registry::{Registry, RegistryBuilder};
