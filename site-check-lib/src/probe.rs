//! Probe executor: one HTTP GET per normalized URL.
//!
//! A probe never returns an error to the caller: every failure mode is
//! folded into the [`ProbeResult`] record so the coordinator always gets
//! exactly one result per target.

use crate::types::{ProbeConfig, ProbeResult};
use std::time::{Duration, Instant};
use tracing::debug;

/// Fixed identifying header sent with every probe request.
pub const USER_AGENT: &str = concat!("site-check/", env!("CARGO_PKG_VERSION"));

/// HTTP client for issuing probes.
///
/// One instance is built per run and shared across all workers; reqwest's
/// `Client` is an `Arc` around a connection pool internally, so cloning is
/// cheap and concurrent use is safe. Redirect policy and TLS verification
/// are client-level settings in reqwest, which is equivalent to per-call
/// policy here because every probe in a run shares one config.
#[derive(Clone)]
pub(crate) struct ProbeClient {
    /// Shared HTTP client with the run's redirect/TLS policy baked in
    http_client: reqwest::Client,
    /// Per-request timeout
    timeout: Duration,
}

impl ProbeClient {
    /// Build the run-scoped client from a probe configuration.
    ///
    /// # Errors
    ///
    /// Returns the underlying `reqwest::Error` if the client cannot be
    /// constructed; the coordinator treats that as a fatal run-level error.
    pub fn from_config(config: &ProbeConfig) -> Result<Self, reqwest::Error> {
        let redirect_policy = if config.follow_redirects {
            reqwest::redirect::Policy::limited(10)
        } else {
            reqwest::redirect::Policy::none()
        };

        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .redirect(redirect_policy)
            .danger_accept_invalid_certs(!config.verify_tls)
            .build()?;

        Ok(Self {
            http_client,
            timeout: config.timeout,
        })
    }

    /// Issue a single GET against `url` and record the outcome.
    ///
    /// Latency is wall-clock time from just before the request is issued to
    /// response or failure, so a timed-out probe reports roughly the
    /// configured timeout, and a redirect chain is measured end to end.
    pub async fn probe(&self, url: &str) -> ProbeResult {
        let start = Instant::now();

        match self
            .http_client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
        {
            Ok(response) => {
                let latency_ms = start.elapsed().as_millis() as u64;
                let status = response.status().as_u16();
                debug!("{} -> {} in {}ms", url, status, latency_ms);
                ProbeResult {
                    url: url.to_string(),
                    final_url: response.url().to_string(),
                    status: Some(status),
                    latency_ms,
                    ok: (200..400).contains(&status),
                    error: String::new(),
                }
            }
            Err(err) => {
                let latency_ms = start.elapsed().as_millis() as u64;
                let error = describe_failure(&err, self.timeout);
                debug!("{} failed in {}ms: {}", url, latency_ms, error);
                ProbeResult {
                    url: url.to_string(),
                    final_url: String::new(),
                    status: None,
                    latency_ms,
                    ok: false,
                    error,
                }
            }
        }
    }
}

/// Turn a reqwest error into a short human-readable description.
///
/// The message is guaranteed non-empty and avoids echoing anything beyond
/// the failure class and the error's own text.
fn describe_failure(err: &reqwest::Error, timeout: Duration) -> String {
    if err.is_timeout() {
        format!("request timed out after {}s", timeout.as_secs())
    } else if err.is_connect() {
        match std::error::Error::source(err) {
            Some(source) => format!("connection failed: {}", source),
            None => "connection failed".to_string(),
        }
    } else if err.is_builder() {
        "invalid URL".to_string()
    } else if err.is_redirect() {
        "too many redirects".to_string()
    } else {
        err.to_string()
    }
}
