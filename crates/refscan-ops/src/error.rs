//! Error types for the operations layer.

use std::path::PathBuf;

use refscan_core::{HostError, ScanError};
use thiserror::Error;

/// Result type for operations.
pub type OpsResult<T> = Result<T, OpsError>;

/// Errors that can occur during operations.
#[derive(Debug, Error)]
pub enum OpsError {
    /// The scan itself failed, e.g. on a cyclic hierarchy.
    #[error(transparent)]
    Scan(#[from] ScanError),

    /// A host enumeration call failed. The host's error is kept as the source.
    #[error("Host enumeration failed: {0}")]
    Host(#[source] HostError),

    /// Snapshot file not found.
    #[error("No project snapshot found at {path}")]
    SnapshotNotFound { path: PathBuf },

    /// IO error during file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Report template failed to render.
    #[error("Failed to render report: {0}")]
    Render(#[from] askama::Error),
}
