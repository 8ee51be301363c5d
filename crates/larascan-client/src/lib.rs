//! HTTP and DNS collaborators for larascan checks.
//!
//! Checks never talk to the network directly. They go through a
//! [`Transport`] (HTTP GET) or a [`Resolver`] (host lookups), so tests can
//! substitute canned responses and the real implementations stay in one
//! place:
//!
//! - [`HttpTransport`]: reqwest client with a fixed timeout and an optional
//!   request rate limit
//! - [`DnsResolver`]: hickory resolver using the system configuration

#![doc(html_root_url = "https://docs.rs/larascan-client/1.0.0")]

mod client;
mod config;
mod resolver;
mod transport;

pub use client::{HttpTransport, HttpTransportBuilder};
pub use config::*;
pub use larascan_core::{Result, ScanError};
pub use resolver::{DnsResolver, Resolver};
pub use transport::{HttpResponse, Transport};
