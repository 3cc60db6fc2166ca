//! # Site Check Library
//!
//! A fast, robust library for checking reachability and responsiveness of a
//! list of URLs with bounded-concurrency HTTP probes.
//!
//! Raw input lines are normalized and deduplicated, probed concurrently
//! under a worker-count cap, and returned as one ranked result record per
//! URL (success or failure) with status code, latency, final URL, and
//! error detail.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use site_check_lib::{SiteChecker, ProbeConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let checker = SiteChecker::new();
//!     let urls = vec!["example.com".to_string(), "https://github.com".to_string()];
//!     let results = checker.run_checks(&urls).await?;
//!
//!     for result in &results {
//!         println!("{}: ok={} ({}ms)", result.url, result.ok, result.latency_ms);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Bounded concurrency**: at most `concurrency` probes in flight
//! - **Probe failures are data**: every URL yields exactly one result row
//! - **Deterministic ranking**: reachable-and-fast first
//! - **Live progress**: a `completed / total` callback during the run

// Re-export main public API types and functions
// This makes them available as site_check_lib::TypeName
pub use checker::SiteChecker;
pub use config::{load_env_config, ConfigManager, DefaultsConfig, EnvConfig, FileConfig};
pub use error::SiteCheckError;
pub use normalize::{normalize_url, prepare_targets};
pub use probe::USER_AGENT;
pub use rank::rank_results;
pub use types::{ProbeConfig, ProbeResult, Progress};

// Internal modules - these are not part of the public API
mod checker;
mod config;
mod error;
mod normalize;
mod probe;
mod rank;
mod types;

// Type alias for convenience
pub type Result<T> = std::result::Result<T, SiteCheckError>;

// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
