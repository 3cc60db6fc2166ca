//! Error handling for checking runs.
//!
//! Individual probe failures are not errors: they surface as `ok = false`
//! inside a [`crate::ProbeResult`]. This error type covers run-level
//! failures only, the cases where the whole run cannot proceed.

use std::fmt;

/// Run-level error type for site checking operations.
///
/// A value of this type means the run as a whole failed; no partial results
/// are available when one is returned.
#[derive(Debug, Clone)]
pub enum SiteCheckError {
    /// The shared HTTP client could not be constructed
    ClientError { message: String },

    /// Configuration errors (invalid settings, unparseable config file)
    ConfigError { message: String },

    /// File I/O errors when reading URL lists or config files
    FileError { path: String, message: String },

    /// Generic internal errors (e.g. a worker task panicked)
    Internal { message: String },
}

impl SiteCheckError {
    /// Create a new client construction error.
    pub fn client<M: Into<String>>(message: M) -> Self {
        Self::ClientError {
            message: message.into(),
        }
    }

    /// Create a new configuration error.
    pub fn config<M: Into<String>>(message: M) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Create a new file error.
    pub fn file_error<P: Into<String>, M: Into<String>>(path: P, message: M) -> Self {
        Self::FileError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a new internal error.
    pub fn internal<M: Into<String>>(message: M) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

impl fmt::Display for SiteCheckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ClientError { message } => {
                write!(f, "HTTP client error: {}", message)
            }
            Self::ConfigError { message } => {
                write!(f, "Configuration error: {}", message)
            }
            Self::FileError { path, message } => {
                write!(f, "File error at '{}': {}", path, message)
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {}", message)
            }
        }
    }
}

impl std::error::Error for SiteCheckError {}

// Implement From conversions for common error types.
// reqwest errors only reach this type during client construction; request
// errors are folded into ProbeResult by the executor instead.
impl From<reqwest::Error> for SiteCheckError {
    fn from(err: reqwest::Error) -> Self {
        Self::ClientError {
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for SiteCheckError {
    fn from(err: std::io::Error) -> Self {
        Self::Internal {
            message: format!("I/O error: {}", err),
        }
    }
}

impl From<toml::de::Error> for SiteCheckError {
    fn from(err: toml::de::Error) -> Self {
        Self::ConfigError {
            message: format!("TOML parsing failed: {}", err),
        }
    }
}
