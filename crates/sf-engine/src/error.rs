//! Error types for ScratchForge

use std::path::PathBuf;

use thiserror::Error;

/// Configuration loading and validation errors.
///
/// Raised before any round is played. Validation never stops at the first
/// problem: `Invalid` carries every violation found in the document.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration ({} violation(s)): {}", .0.len(), .0.join("; "))]
    Invalid(Vec<String>),
}

impl ConfigError {
    /// Individual violation messages (empty for I/O and parse errors)
    pub fn violations(&self) -> &[String] {
        match self {
            ConfigError::Invalid(violations) => violations,
            _ => &[],
        }
    }
}

/// Precondition violations detected while playing a round.
///
/// These indicate a gap in upstream validation and are never retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlayError {
    #[error("No standard symbol probabilities configured")]
    NoProbabilityCells,

    #[error("Empty weight pool for cell {row}:{column}")]
    EmptyWeightPool { row: usize, column: usize },
}

/// Result type alias for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;
