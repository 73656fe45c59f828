//! Error types for the conversion and validation tools.

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the library and mapped to exit codes by the binary.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Map header has no {missing} declaration")]
    MissingHeader { missing: &'static str },

    #[error(
        "Grid size mismatch: declared {declared_height}x{declared_width} (HxW), \
         found {actual_rows} rows, first mismatched row width {actual_width}"
    )]
    GridSizeMismatch {
        declared_width: usize,
        declared_height: usize,
        actual_rows: usize,
        actual_width: usize,
    },

    #[error("No agent path lines found in input")]
    NoPathsFound,

    #[error("Agent selection produced no agents (cap: {cap:?})")]
    NoAgents { cap: Option<usize> },

    #[error("No valid paths: every selected agent has an empty path")]
    NoValidPaths,

    #[error("Cannot access {path}: {source}")]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed input at line {line}: {message}")]
    MalformedInput { line: usize, message: String },

    #[error("Validation failed with {issues} issue(s)")]
    ValidationFailed { issues: usize },

    #[error("Output ids starting at {id_offset} overflow for {agents} agents")]
    IdOverflow { id_offset: u32, agents: usize },

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl ApiError {
    /// Build a file access error for `path`.
    pub fn file_access(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ApiError::FileAccess {
            path: path.into(),
            source,
        }
    }

    /// Process exit code for this error kind.
    pub fn exit_code(&self) -> i32 {
        match self {
            ApiError::MissingHeader { .. } => 2,
            ApiError::GridSizeMismatch { .. } => 3,
            ApiError::NoPathsFound => 4,
            ApiError::NoAgents { .. } => 5,
            ApiError::NoValidPaths => 6,
            ApiError::ValidationFailed { .. } => 7,
            ApiError::FileAccess { .. } => 8,
            ApiError::MalformedInput { .. } => 9,
            ApiError::IdOverflow { .. } => 10,
            ApiError::ConfigError(_) => 1,
        }
    }
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}
