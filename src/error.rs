// src/error.rs
// =============================================================================
// Error types for the validation library.
//
// Only two of these can stop a run: a root path that does not exist, and a
// failure to build the HTTP client for strict mode. Everything that goes wrong
// with a single file or a single link is turned into a result and reported.
// =============================================================================

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while validating a documentation tree.
#[derive(Debug, Error)]
pub enum ValidateError {
    /// The root path given on the command line does not exist.
    #[error("Path not found: {}", path.display())]
    PathNotFound { path: PathBuf },

    /// A markdown file could not be read (permissions, invalid UTF-8, ...).
    #[error("Cannot read file: {source}")]
    FileUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The HTTP client for strict mode could not be created.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Any other filesystem error (e.g. resolving the current directory).
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ValidateError {
    /// True for errors that mean the invocation itself was unusable.
    pub fn is_usage(&self) -> bool {
        matches!(self, ValidateError::PathNotFound { .. })
    }
}
