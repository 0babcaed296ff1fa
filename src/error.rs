//! Error types surfaced to callers.

use thiserror::Error;

use crate::rate_limit::RateLimited;

/// Why a submitted request produced no analysis.
///
/// Both variants end the current request only; the session is ready for the
/// next submission straight away.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    /// Input was empty or whitespace only.
    #[error("Please enter some text to analyze")]
    EmptyInput,

    /// Submitted before the cooldown elapsed.
    #[error("Please wait {remaining_seconds} seconds before making another request")]
    RateLimited { remaining_seconds: u64 },
}

impl From<RateLimited> for AnalysisError {
    fn from(err: RateLimited) -> Self {
        Self::RateLimited {
            remaining_seconds: err.remaining_seconds,
        }
    }
}

/// A detector could not produce scores.
#[derive(Debug, Error)]
pub enum DetectorError {
    #[error("detector unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("detector failed: {reason}")]
    Failed { reason: String },
}

/// Configuration could not be loaded.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
