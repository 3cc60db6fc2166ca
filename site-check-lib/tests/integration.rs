// site-check-lib/tests/integration.rs

//! End-to-end tests for the checking pipeline against a local fixture
//! HTTP server. No external network access required.

mod common;

use common::http_server::{self, InFlightGauge};
use site_check_lib::{ProbeConfig, Progress, SiteChecker};
use std::sync::Arc;
use std::time::Duration;

fn config() -> ProbeConfig {
    ProbeConfig::default()
        .with_concurrency(5)
        .with_timeout(Duration::from_secs(5))
}

/// Scenario: duplicate raw spellings of the same URL plus a blank line
/// collapse to a single probe and a single result row.
#[tokio::test]
async fn test_duplicates_and_blanks_yield_one_result() {
    let base = http_server::start();
    let target = format!("{}/status/200", base);

    let raw = vec![target.clone(), target.clone(), "   ".to_string()];
    let checker = SiteChecker::with_config(config());
    let results = checker.run_checks(&raw).await.unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].url, target);
    assert_eq!(results[0].status, Some(200));
    assert!(results[0].ok);
    assert!(results[0].error.is_empty());
}

/// Every deduplicated input produces exactly one output row, success or
/// failure mixed together.
#[tokio::test]
async fn test_one_row_per_target_under_partial_failure() {
    let base = http_server::start();
    let raw = vec![
        format!("{}/status/200", base),
        format!("{}/status/404", base),
        format!("{}/status/500", base),
        "http://127.0.0.1:1/".to_string(), // connection refused
    ];

    let checker = SiteChecker::with_config(config());
    let results = checker.run_checks(&raw).await.unwrap();

    assert_eq!(results.len(), raw.len());
    let mut urls: Vec<&str> = results.iter().map(|r| r.url.as_str()).collect();
    urls.sort_unstable();
    let mut expected: Vec<&str> = raw.iter().map(|s| s.as_str()).collect();
    expected.sort_unstable();
    assert_eq!(urls, expected);
}

/// `ok` is exactly "status present and in [200, 400)".
#[tokio::test]
async fn test_ok_classification_matches_status_band() {
    let base = http_server::start();
    let raw = vec![
        format!("{}/status/200", base),
        format!("{}/status/204", base),
        format!("{}/status/399", base),
        format!("{}/status/400", base),
        format!("{}/status/404", base),
        format!("{}/status/500", base),
    ];

    let checker = SiteChecker::with_config(config());
    let results = checker.run_checks(&raw).await.unwrap();

    for result in &results {
        let status = result.status.expect("fixture always responds");
        assert_eq!(
            result.ok,
            (200..400).contains(&status),
            "bad ok flag for status {}",
            status
        );
        assert!(result.error.is_empty(), "HTTP responses are not errors");
    }
}

/// Scenario: a fast 500 must still rank after a slow 200; ok always
/// precedes failure regardless of latency.
#[tokio::test]
async fn test_ranking_ok_before_failure() {
    let base = http_server::start();
    let slow_ok = format!("{}/delay/150/status/200", base);
    let fast_bad = format!("{}/status/500", base);

    let checker = SiteChecker::with_config(config());
    let results = checker
        .run_checks(&[fast_bad.clone(), slow_ok.clone()])
        .await
        .unwrap();

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].url, slow_ok);
    assert!(results[0].ok);
    assert_eq!(results[1].url, fast_bad);
    assert!(!results[1].ok);

    for pair in results.windows(2) {
        assert!((!pair[0].ok, pair[0].latency_ms) <= (!pair[1].ok, pair[1].latency_ms));
    }
}

/// Scenario: redirects disabled. The 301 comes back as-is, the final URL
/// stays the requested one, and 301 counts as ok (it is inside [200, 400)).
#[tokio::test]
async fn test_redirect_not_followed() {
    let base = http_server::start();
    let target = format!("{}/redirect", base);

    let checker = SiteChecker::with_config(config().with_follow_redirects(false));
    let results = checker.run_checks(&[target.clone()]).await.unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].status, Some(301));
    assert!(results[0].ok, "301 is inside the [200, 400) success band");
    assert_eq!(results[0].final_url, target);
}

/// Redirects enabled: the probe lands on the redirect target and reports it.
#[tokio::test]
async fn test_redirect_followed_reports_final_url() {
    let base = http_server::start();
    let target = format!("{}/redirect", base);

    let checker = SiteChecker::with_config(config().with_follow_redirects(true));
    let results = checker.run_checks(&[target.clone()]).await.unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].status, Some(200));
    assert!(results[0].ok);
    assert_eq!(results[0].final_url, format!("{}/status/200", base));
    assert_eq!(results[0].url, target);
}

/// Scenario: a target that never answers within the timeout. Latency must
/// reflect the real time spent waiting on the timeout boundary.
#[tokio::test]
async fn test_timeout_latency_and_error_detail() {
    let base = http_server::start();
    let target = format!("{}/hang", base);

    let checker =
        SiteChecker::with_config(config().with_timeout(Duration::from_secs(1)));
    let results = checker.run_checks(&[target]).await.unwrap();

    assert_eq!(results.len(), 1);
    let result = &results[0];
    assert!(!result.ok);
    assert!(result.status.is_none());
    assert!(result.final_url.is_empty());
    assert!(!result.error.is_empty());
    assert!(
        (1000..1500).contains(&result.latency_ms),
        "timeout latency out of bounds: {}ms",
        result.latency_ms
    );
}

/// Progress is emitted once per completion, non-decreasing, and ends at
/// exactly 1.0.
#[tokio::test]
async fn test_progress_sequence() {
    let base = http_server::start();
    let raw: Vec<String> = (0..6).map(|i| format!("{}/status/20{}", base, i % 2)).collect();
    let raw = site_check_lib::prepare_targets(&raw);
    let total = raw.len();
    assert!(total >= 2);

    let mut observed: Vec<Progress> = Vec::new();
    let checker = SiteChecker::with_config(config());
    let results = checker
        .run_checks_with_progress(&raw, |progress| observed.push(progress))
        .await
        .unwrap();

    assert_eq!(results.len(), total);
    assert_eq!(observed.len(), total, "one progress event per completion");
    for pair in observed.windows(2) {
        assert!(pair[0].fraction() <= pair[1].fraction());
    }
    let last = observed.last().unwrap();
    assert_eq!(last.fraction(), 1.0);
    assert!(last.is_done());
    assert_eq!(
        observed.iter().filter(|p| p.fraction() == 1.0).count(),
        1,
        "exactly one terminal progress event"
    );
}

/// The semaphore keeps the number of simultaneously in-flight probes at or
/// below the configured concurrency, measured on the server side.
#[tokio::test]
async fn test_concurrency_ceiling_enforced() {
    let gauge = Arc::new(InFlightGauge::default());
    let base = http_server::start_with_gauge(Arc::clone(&gauge));

    let concurrency = 3;
    // Paths must differ for the URLs to survive dedup; query strings would
    // be dropped by normalization, so vary the status code instead.
    let raw: Vec<String> = (0..12)
        .map(|i| format!("{}/delay/100/status/2{:02}", base, i))
        .collect();

    let checker = SiteChecker::with_config(
        ProbeConfig::default()
            .with_concurrency(concurrency)
            .with_timeout(Duration::from_secs(5)),
    );
    let results = checker.run_checks(&raw).await.unwrap();

    assert_eq!(results.len(), raw.len());
    assert!(
        gauge.max_observed() <= concurrency,
        "observed {} concurrent probes, cap was {}",
        gauge.max_observed(),
        concurrency
    );
    assert!(gauge.max_observed() >= 2, "probes did not overlap at all");
}

/// Transport failures against a closed port are captured, not propagated.
#[tokio::test]
async fn test_connection_refused_is_a_row_not_an_error() {
    let checker = SiteChecker::with_config(config().with_timeout(Duration::from_secs(2)));
    let results = checker
        .run_checks(&["http://127.0.0.1:1/".to_string()])
        .await
        .unwrap();

    assert_eq!(results.len(), 1);
    assert!(!results[0].ok);
    assert!(results[0].status.is_none());
    assert!(!results[0].error.is_empty());
}
