//! Bounded-concurrency execution of every registered check.
//!
//! One task is spawned per (category, check) pair. A counting semaphore
//! bounds how many checks are inside [`Check::run`] at any instant, and every
//! finding is funnelled through one bounded channel that is drained while
//! the tasks are still running. The run returns only after every task has
//! finished.

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use futures_util::future::join_all;
use larascan_core::{Category, Finding, Result, ScanError, ScanReport};
use tokio::sync::{mpsc, Semaphore};
use tokio_stream::wrappers::ReceiverStream;
use tokio_stream::StreamExt;
use tracing::{debug, info, warn};

use crate::registry::Registry;

/// Capacity of the fan-in channel.
///
/// Only affects how long producers wait on a slow consumer.
pub const RESULT_BUFFER: usize = 100;

/// Runs every check of a [`Registry`] against a target
#[derive(Debug, Clone)]
pub struct Orchestrator {
    registry: Registry,
}

impl Orchestrator {
    /// Create an orchestrator over `registry`
    #[must_use]
    pub const fn new(registry: Registry) -> Self {
        Self { registry }
    }

    /// The checks this orchestrator runs
    #[must_use]
    pub const fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Run every check against `target` with at most `concurrency` checks in
    /// flight, returning all findings in no particular order.
    ///
    /// A failing or panicking check never fails the run; it shows up as a
    /// finding with `status_code == 0`.
    ///
    /// # Errors
    ///
    /// Returns `ScanError::InvalidConcurrency` when `concurrency` is zero and
    /// `ScanError::InvalidTarget` when `target` is blank.
    pub async fn run(&self, target: &str, concurrency: usize) -> Result<Vec<Finding>> {
        if concurrency == 0 {
            return Err(ScanError::InvalidConcurrency(concurrency));
        }
        if target.trim().is_empty() {
            return Err(ScanError::InvalidTarget(target.to_string()));
        }
        if self.registry.is_empty() {
            return Ok(Vec::new());
        }

        let start = Instant::now();
        info!(
            url = %target,
            checks = self.registry.len(),
            concurrency,
            "starting scans"
        );

        let gate = Arc::new(Semaphore::new(concurrency));
        let (tx, rx) = mpsc::channel(RESULT_BUFFER);
        let shared_target: Arc<str> = Arc::from(target);

        let mut handles = Vec::with_capacity(self.registry.len());
        for (category, check) in self.registry.iter() {
            let gate = Arc::clone(&gate);
            let tx = tx.clone();
            let check = Arc::clone(check);
            let target = Arc::clone(&shared_target);
            let name = check.name().to_string();

            let handle = tokio::spawn(async move {
                let findings = match gate.acquire_owned().await {
                    Ok(_permit) => {
                        let started = Instant::now();
                        debug!(check = check.name(), %category, "check started");
                        let findings = check.run(&target).await;
                        debug!(
                            check = check.name(),
                            findings = findings.len(),
                            elapsed_ms = elapsed_ms(started),
                            "check finished"
                        );
                        findings
                    }
                    Err(e) => {
                        vec![aborted(check.category(), check.name(), &target, &e.to_string())]
                    }
                };

                let findings = if findings.is_empty() {
                    warn!(check = check.name(), "check produced no findings");
                    vec![Finding::new(
                        check.category(),
                        check.name(),
                        "Check produced no findings",
                        target.as_ref(),
                    )]
                } else {
                    findings
                };

                for finding in findings {
                    if tx.send(finding).await.is_err() {
                        break;
                    }
                }
            });

            handles.push((category, name, handle));
        }
        drop(tx);

        // Drain while tasks are still producing; ends once every sender is gone.
        let mut findings: Vec<Finding> = ReceiverStream::new(rx).collect().await;

        let outcomes = join_all(
            handles
                .into_iter()
                .map(|(category, name, handle)| async move { (category, name, handle.await) }),
        )
        .await;

        for (category, name, outcome) in outcomes {
            if let Err(e) = outcome {
                warn!(check = %name, error = %e, "check task failed");
                findings.push(aborted(category, &name, target, &e.to_string()));
            }
        }

        info!(
            findings = findings.len(),
            elapsed_ms = elapsed_ms(start),
            "all scans completed"
        );

        Ok(findings)
    }

    /// Like [`run`](Self::run), with start and finish timestamps
    pub async fn scan(&self, target: &str, concurrency: usize) -> Result<ScanReport> {
        let started_at = Utc::now();
        let findings = self.run(target, concurrency).await?;

        Ok(ScanReport {
            target: target.to_string(),
            started_at,
            finished_at: Utc::now(),
            findings,
        })
    }
}

fn aborted(category: Category, name: &str, target: &str, reason: &str) -> Finding {
    Finding::new(category, name, "Check aborted unexpectedly", target)
        .detail(reason)
        .as_failure()
}

fn elapsed_ms(since: Instant) -> u64 {
    u64::try_from(since.elapsed().as_millis()).unwrap_or(u64::MAX)
}
