use std::path::PathBuf;

use thiserror::Error;

/// Primary error type for flowtime operations.
///
/// Extraction problems are deliberately NOT represented here: a malformed
/// log degrades to a `ParseError` stage record so one bad artifact never
/// aborts the batch. Only collaborator-level failures (discovery I/O,
/// report sinks) surface as `FlowtimeError`.
#[derive(Error, Debug)]
pub enum FlowtimeError {
    // === Discovery Errors ===
    /// Artifact root does not exist.
    #[error("artifact root not found: '{path}'")]
    RootNotFound { path: PathBuf },

    /// Artifact root exists but is not a directory.
    #[error("artifact root is not a directory: '{path}'")]
    RootNotADirectory { path: PathBuf },

    /// A directory in the artifact tree could not be listed.
    #[error("cannot list '{path}': {detail}")]
    ScanFailed { path: PathBuf, detail: String },

    // === I/O Errors ===
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // === Sink Errors ===
    /// The rendered report could not be written.
    #[error("failed to write report '{path}': {detail}")]
    ReportWrite { path: PathBuf, detail: String },

    /// The report could not be encoded as JSON.
    #[error("failed to encode report as JSON: {0}")]
    Json(#[from] serde_json::Error),

    // === Usage Errors ===
    /// A command-line value was out of range or unparsable.
    #[error("invalid value for {flag}: '{value}'")]
    InvalidArgument { flag: String, value: String },
}

/// Convenience alias used across all flowtime crates.
pub type Result<T> = std::result::Result<T, FlowtimeError>;
