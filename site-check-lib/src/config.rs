//! Configuration file parsing and management.
//!
//! This module handles loading configuration from TOML files and environment
//! variables. Precedence is applied by the caller: built-in defaults, then
//! config file, then `SC_*` environment variables, then explicit flags.

use crate::error::SiteCheckError;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Configuration loaded from TOML files.
///
/// ```toml
/// [defaults]
/// concurrency = 50
/// timeout = 5
/// follow_redirects = false
/// verify_tls = true
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FileConfig {
    /// Default values for checking options
    #[serde(skip_serializing_if = "Option::is_none")]
    pub defaults: Option<DefaultsConfig>,
}

/// Default configuration values that map to CLI options.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DefaultsConfig {
    /// Default worker pool size (1-100)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub concurrency: Option<usize>,

    /// Default per-request timeout in seconds (1-30)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,

    /// Default redirect-following setting
    #[serde(skip_serializing_if = "Option::is_none")]
    pub follow_redirects: Option<bool>,

    /// Default TLS verification setting
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verify_tls: Option<bool>,
}

/// Configuration discovery and loading functionality.
pub struct ConfigManager {
    /// Whether to emit warnings for config issues
    pub verbose: bool,
}

impl ConfigManager {
    /// Create a new configuration manager.
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// Load configuration from a specific file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, unreadable, not valid TOML,
    /// or carries out-of-range values.
    pub fn load_file<P: AsRef<Path>>(&self, path: P) -> Result<FileConfig, SiteCheckError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(SiteCheckError::file_error(
                path.to_string_lossy(),
                "Configuration file not found",
            ));
        }

        let content = fs::read_to_string(path).map_err(|e| {
            SiteCheckError::file_error(
                path.to_string_lossy(),
                format!("Failed to read configuration file: {}", e),
            )
        })?;

        let config: FileConfig = toml::from_str(&content).map_err(|e| {
            SiteCheckError::config(format!("Failed to parse TOML configuration: {}", e))
        })?;

        self.validate_config(&config)?;

        Ok(config)
    }

    /// Discover and load configuration from standard locations.
    ///
    /// Checks, in descending precedence: `./site-check.toml` or
    /// `./.site-check.toml`, then `$XDG_CONFIG_HOME/site-check/config.toml`
    /// (or `~/.config/site-check/config.toml`). The first file found wins;
    /// a missing file is not an error.
    pub fn discover_and_load(&self) -> Result<FileConfig, SiteCheckError> {
        if let Some(local_path) = self.get_local_config_path() {
            if self.verbose {
                eprintln!("Using config file: {}", local_path.display());
            }
            return self.load_file(local_path);
        }

        if let Some(xdg_path) = self.get_xdg_config_path() {
            if self.verbose {
                eprintln!("Using config file: {}", xdg_path.display());
            }
            return self.load_file(xdg_path);
        }

        Ok(FileConfig::default())
    }

    /// Get the local configuration file path, if one exists.
    fn get_local_config_path(&self) -> Option<PathBuf> {
        let candidates = ["./site-check.toml", "./.site-check.toml"];

        for candidate in &candidates {
            let path = Path::new(candidate);
            if path.exists() {
                return Some(path.to_path_buf());
            }
        }

        None
    }

    /// Get the XDG configuration file path, if one exists.
    fn get_xdg_config_path(&self) -> Option<PathBuf> {
        let config_dir = env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| env::var_os("HOME").map(|home| Path::new(&home).join(".config")))?;

        let path = config_dir.join("site-check").join("config.toml");
        if path.exists() {
            return Some(path);
        }

        None
    }

    /// Validate loaded values against the documented ranges.
    fn validate_config(&self, config: &FileConfig) -> Result<(), SiteCheckError> {
        if let Some(defaults) = &config.defaults {
            if let Some(concurrency) = defaults.concurrency {
                if !(1..=100).contains(&concurrency) {
                    return Err(SiteCheckError::config(format!(
                        "concurrency must be between 1 and 100, got {}",
                        concurrency
                    )));
                }
            }
            if let Some(timeout) = defaults.timeout {
                if !(1..=30).contains(&timeout) {
                    return Err(SiteCheckError::config(format!(
                        "timeout must be between 1 and 30 seconds, got {}",
                        timeout
                    )));
                }
            }
        }

        Ok(())
    }
}

/// Configuration values read from environment variables.
///
/// These sit between config-file values and CLI flags in precedence.
#[derive(Debug, Clone, Default)]
pub struct EnvConfig {
    /// From `SC_CONCURRENCY`
    pub concurrency: Option<usize>,
    /// From `SC_TIMEOUT` (seconds)
    pub timeout: Option<u64>,
    /// From `SC_FOLLOW_REDIRECTS`
    pub follow_redirects: Option<bool>,
    /// From `SC_VERIFY_TLS`
    pub verify_tls: Option<bool>,
}

/// Parse all `SC_*` environment variables into a structured configuration.
///
/// Invalid values are skipped with a warning rather than aborting the run.
pub fn load_env_config() -> EnvConfig {
    let mut config = EnvConfig::default();

    if let Ok(val) = env::var("SC_CONCURRENCY") {
        match val.parse::<usize>() {
            Ok(concurrency) if (1..=100).contains(&concurrency) => {
                config.concurrency = Some(concurrency);
            }
            _ => warn!("ignoring invalid SC_CONCURRENCY='{}', must be 1-100", val),
        }
    }

    if let Ok(val) = env::var("SC_TIMEOUT") {
        match val.parse::<u64>() {
            Ok(timeout) if (1..=30).contains(&timeout) => {
                config.timeout = Some(timeout);
            }
            _ => warn!("ignoring invalid SC_TIMEOUT='{}', must be 1-30", val),
        }
    }

    if let Ok(val) = env::var("SC_FOLLOW_REDIRECTS") {
        match parse_bool(&val) {
            Some(enabled) => config.follow_redirects = Some(enabled),
            None => warn!("ignoring invalid SC_FOLLOW_REDIRECTS='{}', use true/false", val),
        }
    }

    if let Ok(val) = env::var("SC_VERIFY_TLS") {
        match parse_bool(&val) {
            Some(enabled) => config.verify_tls = Some(enabled),
            None => warn!("ignoring invalid SC_VERIFY_TLS='{}', use true/false", val),
        }
    }

    config
}

fn parse_bool(val: &str) -> Option<bool> {
    match val.to_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}
