//! Main site checker implementation.
//!
//! This module provides the primary `SiteChecker` struct that coordinates a
//! checking run: input normalization and dedup, bounded concurrent fan-out
//! of probes, progress accounting as results come back, and the final
//! deterministic ranking.

use crate::error::SiteCheckError;
use crate::normalize::prepare_targets;
use crate::probe::ProbeClient;
use crate::rank::rank_results;
use crate::types::{ProbeConfig, ProbeResult, Progress};
use futures::stream::FuturesUnordered;
use futures::StreamExt;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{debug, info};

/// Coordinates URL reachability checks.
///
/// A `SiteChecker` owns the run configuration and drives the whole pipeline:
/// raw lines in, ranked [`ProbeResult`] records out. Each call to
/// [`run_checks`](SiteChecker::run_checks) is an independent run with its own
/// shared HTTP client.
///
/// # Example
///
/// ```rust,no_run
/// use site_check_lib::{SiteChecker, ProbeConfig};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let checker = SiteChecker::new();
///     let urls = vec!["example.com".to_string(), "https://github.com".to_string()];
///     let results = checker.run_checks(&urls).await?;
///
///     for result in results {
///         println!("{} ok={} latency={}ms", result.url, result.ok, result.latency_ms);
///     }
///     Ok(())
/// }
/// ```
pub struct SiteChecker {
    /// Configuration settings for this checker instance
    config: ProbeConfig,
}

impl SiteChecker {
    /// Create a new site checker with default configuration.
    ///
    /// Default settings: concurrency 30, timeout 10s, redirects followed,
    /// TLS verified.
    pub fn new() -> Self {
        Self {
            config: ProbeConfig::default(),
        }
    }

    /// Create a new site checker with custom configuration.
    ///
    /// # Example
    ///
    /// ```rust
    /// use site_check_lib::{SiteChecker, ProbeConfig};
    /// use std::time::Duration;
    ///
    /// let config = ProbeConfig::default()
    ///     .with_concurrency(50)
    ///     .with_timeout(Duration::from_secs(5))
    ///     .with_follow_redirects(false);
    ///
    /// let checker = SiteChecker::with_config(config);
    /// ```
    pub fn with_config(config: ProbeConfig) -> Self {
        Self { config }
    }

    /// Get the current configuration for this checker.
    pub fn config(&self) -> &ProbeConfig {
        &self.config
    }

    /// Check every URL in `raw_urls` and return ranked results.
    ///
    /// Input lines are filtered (blank lines and `#` comments dropped),
    /// normalized, and deduplicated; exactly one result is returned per
    /// distinct normalized URL, whether its probe succeeded or failed.
    /// Results are ordered by `(!ok, latency_ms)` ascending.
    ///
    /// # Errors
    ///
    /// Returns `SiteCheckError` only for run-level failures: the shared
    /// HTTP client could not be built, or a worker task failed to complete.
    /// Individual probe failures are rows in the output, not errors.
    pub async fn run_checks(&self, raw_urls: &[String]) -> Result<Vec<ProbeResult>, SiteCheckError> {
        self.run_checks_with_progress(raw_urls, |_| {}).await
    }

    /// Like [`run_checks`](SiteChecker::run_checks), invoking `on_progress`
    /// after each probe completes.
    ///
    /// The callback runs on the coordinating task only, never from a
    /// worker, and observes a monotonically non-decreasing sequence of
    /// `completed / total` values, one per probe, ending exactly at a
    /// [`Progress`] whose `fraction()` is 1.0. An empty target set emits no
    /// progress at all.
    pub async fn run_checks_with_progress<F>(
        &self,
        raw_urls: &[String],
        mut on_progress: F,
    ) -> Result<Vec<ProbeResult>, SiteCheckError>
    where
        F: FnMut(Progress),
    {
        let targets = prepare_targets(raw_urls);
        if targets.is_empty() {
            debug!("no targets after filtering and dedup, returning empty result set");
            return Ok(Vec::new());
        }

        let total = targets.len();
        info!(
            "starting run: {} targets, concurrency {}, timeout {:?}",
            total, self.config.concurrency, self.config.timeout
        );

        // One shared client per run; workers clone the cheap Arc-backed handle.
        let client = ProbeClient::from_config(&self.config)
            .map_err(|e| SiteCheckError::client(e.to_string()))?;
        let semaphore = Arc::new(Semaphore::new(self.config.concurrency));

        // Fan-out: spawn every probe up front, each gated by the semaphore so
        // at most `concurrency` requests are in flight. Dispatch never waits
        // on any individual probe.
        let mut tasks = FuturesUnordered::new();
        for url in targets {
            let client = client.clone();
            let semaphore = Arc::clone(&semaphore);
            tasks.push(tokio::spawn(async move {
                // Closed semaphore is impossible here: the handle lives
                // until every task has finished.
                let _permit = semaphore
                    .acquire_owned()
                    .await
                    .expect("probe semaphore closed");
                client.probe(&url).await
            }));
        }

        // Fan-in: collect in completion order, counting progress as we go.
        // Ordering is imposed at the end by the ranker, not here.
        let mut results = Vec::with_capacity(total);
        while let Some(joined) = tasks.next().await {
            let result =
                joined.map_err(|e| SiteCheckError::internal(format!("probe task failed: {}", e)))?;
            results.push(result);
            on_progress(Progress {
                completed: results.len(),
                total,
            });
        }

        info!(
            "run complete: {} ok, {} failed",
            results.iter().filter(|r| r.ok).count(),
            results.iter().filter(|r| !r.ok).count()
        );

        Ok(rank_results(results))
    }
}

impl Default for SiteChecker {
    fn default() -> Self {
        Self::new()
    }
}
