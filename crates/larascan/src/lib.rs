//! Concurrent reconnaissance and vulnerability scanner for Laravel applications.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use larascan::{Orchestrator, Registry, TransportConfig};
//!
//! #[tokio::main]
//! async fn main() -> larascan::Result<()> {
//!     let registry = Registry::builtin(&TransportConfig::default())?;
//!     let mut findings = Orchestrator::new(registry)
//!         .run("https://app.example.com", 5)
//!         .await?;
//!
//!     larascan::Finding::sort_for_report(&mut findings);
//!     for finding in &findings {
//!         println!("{finding}\n");
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Features
//!
//! - `default` - Uses rustls for TLS
//! - `rustls` - Use rustls for TLS (recommended)
//! - `native-tls` - Use system native TLS

#![doc(html_root_url = "https://docs.rs/larascan/1.0.0")]

// Re-export core types
pub use larascan_core::*;

// Re-export collaborators
pub use larascan_client::{
    DnsResolver, HttpResponse, HttpTransport, HttpTransportBuilder, Resolver, Transport,
    TransportConfig, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT,
};

// Re-export the engine and built-in checks
pub use larascan_scanner::{checks, Orchestrator, Registry, RegistryBuilder, RESULT_BUFFER};

// Re-export runtime for convenience
pub use serde;
pub use serde_json;
pub use tokio;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reexports_compose() {
        let registry = Registry::builder().build();
        assert!(registry.is_empty());
        assert_eq!(Category::ALL.len(), 2);
        assert_eq!(TransportConfig::default().timeout, DEFAULT_TIMEOUT);
    }
}
