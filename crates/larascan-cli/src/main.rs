//! larascan - Laravel reconnaissance and vulnerability scanner
//!
//! Runs every built-in check against one target and prints the findings.

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    larascan_cli::run().await
}
