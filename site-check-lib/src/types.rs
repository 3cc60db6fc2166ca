//! Core data types for URL reachability checking.
//!
//! This module defines the main data structures used throughout the library:
//! probe results, probe configuration, and progress reporting.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Result of probing one normalized URL.
///
/// Exactly one of these is produced per deduplicated input URL, whether the
/// probe succeeded or failed. Field order matches the delimited-output
/// contract: `url, final_url, status, latency_ms, ok, error`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeResult {
    /// The normalized URL the request was sent to
    pub url: String,

    /// The URL ultimately reached. Equal to `url` when no redirect occurred
    /// or redirect-following was disabled; empty on transport failure.
    pub final_url: String,

    /// HTTP status code of the response. Absent on transport-level failure
    /// (DNS, connect, TLS, timeout).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,

    /// Wall-clock milliseconds from request start to completion or failure,
    /// inclusive of any redirect chain and time spent waiting on a timeout.
    pub latency_ms: u64,

    /// True iff a response arrived with a status in [200, 400).
    pub ok: bool,

    /// Human-readable description of a transport/timeout/TLS failure.
    /// Empty when a response was received, regardless of its status code.
    pub error: String,
}

impl ProbeResult {
    /// Whether this result represents a transport-level failure
    /// (no HTTP response was obtained at all).
    pub fn is_transport_failure(&self) -> bool {
        self.status.is_none()
    }
}

/// Configuration options for a checking run.
///
/// Immutable once a run starts; every probe in a run shares one config.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeConfig {
    /// Maximum number of concurrent probes
    /// Default: 30, Range: 1-100
    pub concurrency: usize,

    /// Per-request timeout
    /// Default: 10 seconds, Range: 1-30 seconds
    #[serde(skip)] // Don't serialize Duration directly
    pub timeout: Duration,

    /// Whether to transparently follow HTTP redirects and report the final
    /// landing URL. When false, a 3xx response is returned as-is.
    /// Default: true
    pub follow_redirects: bool,

    /// Whether to validate TLS certificates.
    /// Default: true
    pub verify_tls: bool,
}

/// Completion progress of a running check, expressed as `completed / total`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// Number of probes that have completed (success or failure)
    pub completed: usize,
    /// Total number of probes in this run
    pub total: usize,
}

impl Progress {
    /// Completed fraction in [0.0, 1.0]. Exactly 1.0 once every probe
    /// has finished.
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            self.completed as f64 / self.total as f64
        }
    }

    /// Whether every probe in the run has completed.
    pub fn is_done(&self) -> bool {
        self.completed == self.total
    }
}

impl Default for ProbeConfig {
    /// Create a sensible default configuration.
    ///
    /// The defaults mirror the interactive tool this library grew out of:
    /// 30 workers, 10 second timeout, redirects followed, TLS verified.
    fn default() -> Self {
        Self {
            concurrency: 30,
            timeout: Duration::from_secs(10),
            follow_redirects: true,
            verify_tls: true,
        }
    }
}

impl ProbeConfig {
    /// Set the worker pool size.
    ///
    /// Automatically clamps to [1, 100] to prevent resource exhaustion.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.clamp(1, 100);
        self
    }

    /// Set the per-request timeout, clamped to [1, 30] seconds.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout.clamp(Duration::from_secs(1), Duration::from_secs(30));
        self
    }

    /// Enable or disable redirect following.
    pub fn with_follow_redirects(mut self, enabled: bool) -> Self {
        self.follow_redirects = enabled;
        self
    }

    /// Enable or disable TLS certificate verification.
    pub fn with_verify_tls(mut self, enabled: bool) -> Self {
        self.verify_tls = enabled;
        self
    }
}
