//! Behavioural tests for the bounded-concurrency orchestrator.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use larascan_client::{HttpResponse, Transport};
use larascan_core::{Category, Check, Finding, Result, ScanError};
use larascan_scanner::checks::recon::{FrameworkDetection, PhpVersion};
use larascan_scanner::checks::vulnerabilities::DebugMode;
use larascan_scanner::{Orchestrator, Registry, RESULT_BUFFER};
use tokio_test::{assert_err, assert_ok};

/// Emits `count` findings tagged with their index
struct Fixed {
    name: String,
    count: usize,
}

impl Fixed {
    fn new(name: impl Into<String>, count: usize) -> Self {
        Self {
            name: name.into(),
            count,
        }
    }
}

#[async_trait]
impl Check for Fixed {
    fn name(&self) -> &str {
        &self.name
    }

    fn category(&self) -> Category {
        Category::Recon
    }

    async fn run(&self, target: &str) -> Vec<Finding> {
        (0..self.count)
            .map(|i| {
                Finding::new(Category::Recon, &self.name, "fixed", target).detail(i.to_string())
            })
            .collect()
    }
}

/// Records how many gauges are inside `run` at once
struct Gauge {
    in_flight: Arc<AtomicUsize>,
    peak: Arc<AtomicUsize>,
    hold: Duration,
}

#[async_trait]
impl Check for Gauge {
    fn name(&self) -> &str {
        "Gauge"
    }

    fn category(&self) -> Category {
        Category::Vulnerabilities
    }

    async fn run(&self, target: &str) -> Vec<Finding> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        tokio::time::sleep(self.hold).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        vec![Finding::new(Category::Vulnerabilities, "Gauge", "held", target)]
    }
}

struct Panicking;

#[async_trait]
impl Check for Panicking {
    fn name(&self) -> &str {
        "Panicking"
    }

    fn category(&self) -> Category {
        Category::Vulnerabilities
    }

    async fn run(&self, _target: &str) -> Vec<Finding> {
        panic!("check exploded");
    }
}

struct Silent;

#[async_trait]
impl Check for Silent {
    fn name(&self) -> &str {
        "Silent"
    }

    fn category(&self) -> Category {
        Category::Recon
    }

    async fn run(&self, _target: &str) -> Vec<Finding> {
        Vec::new()
    }
}

/// Every request fails before a response arrives
struct Unreachable;

#[async_trait]
impl Transport for Unreachable {
    async fn get(&self, url: &str, _headers: &[(&str, &str)]) -> Result<HttpResponse> {
        Err(ScanError::Http(format!("error sending request for url ({url})")))
    }
}

/// A response the canned transport rebuilds on every request
struct Page {
    status: u16,
    headers: Vec<(&'static str, &'static str)>,
    body: &'static str,
}

impl Page {
    fn new(status: u16, body: &'static str) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body,
        }
    }

    fn header(mut self, name: &'static str, value: &'static str) -> Self {
        self.headers.push((name, value));
        self
    }

    fn response(&self) -> HttpResponse {
        self.headers
            .iter()
            .fold(HttpResponse::new(self.status, self.body), |resp, (name, value)| {
                resp.with_header(name, *value)
            })
    }
}

/// Serves canned responses keyed by URL; anything else is a 404
#[derive(Clone, Default)]
struct Canned {
    pages: Arc<HashMap<String, Page>>,
}

impl Canned {
    fn new(pages: impl IntoIterator<Item = (String, Page)>) -> Self {
        Self {
            pages: Arc::new(pages.into_iter().collect()),
        }
    }
}

#[async_trait]
impl Transport for Canned {
    async fn get(&self, url: &str, _headers: &[(&str, &str)]) -> Result<HttpResponse> {
        Ok(self
            .pages
            .get(url)
            .map_or_else(|| HttpResponse::new(404, ""), Page::response))
    }
}

const TARGET: &str = "http://app.test";

#[tokio::test]
async fn test_every_check_contributes_at_least_one_finding() {
    let registry = Registry::builder()
        .register(Category::Recon, Fixed::new("one", 1))
        .register(Category::Recon, Fixed::new("three", 3))
        .register(Category::Vulnerabilities, Fixed::new("two", 2))
        .build();
    let total = registry.len();

    let findings = Orchestrator::new(registry).run(TARGET, 2).await.unwrap();

    assert!(findings.len() >= total);
    assert_eq!(findings.len(), 6);
    let names: HashSet<_> = findings.iter().map(|f| f.scan_name.as_str()).collect();
    assert_eq!(names, HashSet::from(["one", "two", "three"]));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_in_flight_checks_never_exceed_concurrency() {
    let in_flight = Arc::new(AtomicUsize::new(0));
    let peak = Arc::new(AtomicUsize::new(0));

    let mut builder = Registry::builder();
    for _ in 0..12 {
        builder = builder.register(
            Category::Vulnerabilities,
            Gauge {
                in_flight: Arc::clone(&in_flight),
                peak: Arc::clone(&peak),
                hold: Duration::from_millis(25),
            },
        );
    }

    let findings = Orchestrator::new(builder.build())
        .run(TARGET, 3)
        .await
        .unwrap();

    assert_eq!(findings.len(), 12);
    assert!(peak.load(Ordering::SeqCst) <= 3);
    assert!(peak.load(Ordering::SeqCst) >= 1);
    assert_eq!(in_flight.load(Ordering::SeqCst), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrency_of_one_serializes_checks() {
    let in_flight = Arc::new(AtomicUsize::new(0));
    let peak = Arc::new(AtomicUsize::new(0));

    let mut builder = Registry::builder();
    for _ in 0..5 {
        builder = builder.register(
            Category::Vulnerabilities,
            Gauge {
                in_flight: Arc::clone(&in_flight),
                peak: Arc::clone(&peak),
                hold: Duration::from_millis(10),
            },
        );
    }

    Orchestrator::new(builder.build())
        .run(TARGET, 1)
        .await
        .unwrap();

    assert_eq!(peak.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_failing_transport_is_isolated() {
    let registry = Registry::builder()
        .register(Category::Recon, FrameworkDetection::new(Unreachable))
        .register(Category::Recon, Fixed::new("healthy", 2))
        .register(Category::Vulnerabilities, Fixed::new("also-healthy", 1))
        .build();

    let findings = Orchestrator::new(registry).run(TARGET, 2).await.unwrap();

    let failed: Vec<_> = findings
        .iter()
        .filter(|f| f.scan_name == "Framework Detection")
        .collect();
    assert_eq!(failed.len(), 1);
    assert_eq!(failed[0].status_code, 0);
    assert_eq!(failed[0].description, "Failed to make request");
    assert!(failed[0].detail.contains("error sending request"));
    assert!(failed[0].is_error());

    assert_eq!(findings.iter().filter(|f| f.scan_name == "healthy").count(), 2);
    assert_eq!(
        findings.iter().filter(|f| f.scan_name == "also-healthy").count(),
        1
    );
}

#[tokio::test]
async fn test_panicking_check_does_not_abort_run() {
    let registry = Registry::builder()
        .register(Category::Vulnerabilities, Panicking)
        .register(Category::Recon, Fixed::new("survivor", 1))
        .build();

    let findings = Orchestrator::new(registry).run(TARGET, 1).await.unwrap();

    assert_eq!(findings.len(), 2);
    let aborted = findings.iter().find(|f| f.scan_name == "Panicking").unwrap();
    assert_eq!(aborted.status_code, 0);
    assert_eq!(aborted.category, Category::Vulnerabilities);
    assert_eq!(aborted.description, "Check aborted unexpectedly");
    assert!(aborted.is_error());
    assert!(findings.iter().any(|f| f.scan_name == "survivor"));
}

#[tokio::test]
async fn test_check_without_findings_still_reported() {
    let registry = Registry::builder()
        .register(Category::Recon, Silent)
        .build();

    let findings = Orchestrator::new(registry).run(TARGET, 1).await.unwrap();

    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].scan_name, "Silent");
    assert_eq!(findings[0].description, "Check produced no findings");
    assert!(!findings[0].is_error());
}

#[tokio::test]
async fn test_no_loss_under_backlog() {
    let flood = RESULT_BUFFER * 10;
    let mut builder = Registry::builder().register(Category::Recon, Fixed::new("flood", flood));
    for i in 0..20 {
        builder = builder.register(Category::Vulnerabilities, Fixed::new(format!("small-{i}"), 1));
    }

    let findings = Orchestrator::new(builder.build())
        .run(TARGET, 2)
        .await
        .unwrap();

    assert_eq!(findings.len(), flood + 20);

    let flood_details: HashSet<_> = findings
        .iter()
        .filter(|f| f.scan_name == "flood")
        .map(|f| f.detail.clone())
        .collect();
    assert_eq!(flood_details.len(), flood);
    for i in 0..flood {
        assert!(flood_details.contains(&i.to_string()));
    }
}

#[tokio::test]
async fn test_empty_registry_returns_immediately() {
    let orchestrator = Orchestrator::new(Registry::default());
    let findings = tokio::time::timeout(Duration::from_secs(1), orchestrator.run(TARGET, 4))
        .await
        .expect("empty run must not block")
        .unwrap();
    assert!(findings.is_empty());
}

#[tokio::test]
async fn test_invalid_arguments_are_rejected() {
    let orchestrator = Orchestrator::new(
        Registry::builder()
            .register(Category::Recon, Fixed::new("one", 1))
            .build(),
    );

    let err = assert_err!(orchestrator.run(TARGET, 0).await);
    assert!(matches!(err, ScanError::InvalidConcurrency(0)));

    let err = assert_err!(orchestrator.run("   ", 3).await);
    assert!(matches!(err, ScanError::InvalidTarget(_)));
}

#[tokio::test]
async fn test_repeated_runs_with_canned_transport_agree() {
    let transport = Canned::new([
        (
            TARGET.to_string(),
            Page::new(200, "<html></html>")
                .header("X-Powered-By", "PHP/8.1.2")
                .header("Set-Cookie", "laravel_session=x; path=/"),
        ),
        (
            format!("{TARGET}/nonexistentpage"),
            Page::new(500, "Whoops, looks like something went wrong."),
        ),
    ]);

    let registry = Registry::builder()
        .register(Category::Recon, FrameworkDetection::new(transport.clone()))
        .register(Category::Recon, PhpVersion::new(transport.clone()))
        .register(Category::Vulnerabilities, DebugMode::new(transport))
        .build();
    let orchestrator = Orchestrator::new(registry);

    let mut first = orchestrator.run(TARGET, 3).await.unwrap();
    let mut second = orchestrator.run(TARGET, 1).await.unwrap();
    Finding::sort_for_report(&mut first);
    Finding::sort_for_report(&mut second);

    assert_eq!(first, second);
    assert_eq!(first.len(), 4);
}

#[tokio::test]
async fn test_scan_report_wraps_run() {
    let orchestrator = Orchestrator::new(
        Registry::builder()
            .register(Category::Recon, Fixed::new("one", 2))
            .build(),
    );

    let report = assert_ok!(orchestrator.scan(TARGET, 1).await);
    assert_eq!(report.target, TARGET);
    assert_eq!(report.findings.len(), 2);
    assert!(report.finished_at >= report.started_at);
}

#[tokio::test]
async fn test_category_filtered_run() {
    let registry = Registry::builder()
        .register(Category::Recon, Fixed::new("recon", 1))
        .register(Category::Vulnerabilities, Fixed::new("vuln", 1))
        .build();

    let findings = Orchestrator::new(registry.only(&[Category::Recon]))
        .run(TARGET, 2)
        .await
        .unwrap();

    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].scan_name, "recon");
}
