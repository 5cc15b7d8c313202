//! Error types for the CLI

use pagefinder::AcquisitionError;
use thiserror::Error;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Errors that can occur in the CLI
#[derive(Debug, Error)]
pub enum CliError {
    /// JSON output error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Pagefinder library error
    #[error("{0}")]
    Acquisition(#[from] AcquisitionError),
}
