//! `larascan scan` - Run the checks against one target.

use std::time::Duration;

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use larascan::{Finding, Orchestrator, Registry};
use tracing::info;

use super::Context;
use crate::cli::args::ScanArgs;
use crate::config::DEFAULT_THREADS;
use crate::output::{self, OutputFormat};

pub async fn execute(ctx: Context, args: ScanArgs) -> Result<()> {
    let target = args.url.trim();
    anyhow::ensure!(!target.is_empty(), "A target URL is required (--url <URL>)");

    let threads = args
        .threads
        .or(ctx.config.threads)
        .unwrap_or(DEFAULT_THREADS);
    anyhow::ensure!(threads > 0, "threads must be greater than 0");

    let transport = ctx.config.transport(args.timeout, args.rate_limit);
    let mut registry = Registry::builtin(&transport)?;
    if !args.categories.is_empty() {
        registry = registry.only(&args.categories);
    }

    info!(url = %target, threads, checks = registry.len(), "scan requested");

    let spinner = spinner(&ctx, target);
    let result = Orchestrator::new(registry).scan(target, threads).await;
    spinner.finish_and_clear();
    let mut report = result?;

    if args.sort {
        Finding::sort_for_report(&mut report.findings);
    }

    let mut stdout = std::io::stdout().lock();
    output::write_report(&mut stdout, &report, ctx.output_format)?;

    Ok(())
}

/// Spinner on stderr for pretty output; hidden otherwise
fn spinner(ctx: &Context, target: &str) -> ProgressBar {
    if ctx.output_format != OutputFormat::Pretty || ctx.verbose {
        return ProgressBar::hidden();
    }

    let template = if ctx.no_color {
        "{spinner} {msg} [{elapsed}]"
    } else {
        "{spinner:.cyan} {msg} [{elapsed}]"
    };
    let style = ProgressStyle::default_spinner()
        .template(template)
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ");

    let pb = ProgressBar::new_spinner();
    pb.set_style(style);
    pb.set_message(format!("Scanning {target}"));
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}
