//! Error handling for codest.

#![deny(missing_docs)]

use std::path::PathBuf;
use thiserror::Error;

/// Result alias used across the library.
pub type CodestResult<T> = Result<T, CodestError>;

/// Every failure the collection pipeline can surface.
#[derive(Debug, Error)]
pub enum CodestError {
    /// A root or excluded directory is missing or not a directory.
    #[error("invalid directory {}: {reason}", path.display())]
    Configuration {
        /// The offending path.
        path: PathBuf,
        /// Why it was rejected.
        reason: String,
    },

    /// Traversal of a root failed part way through.
    #[error("failed to collect files under {}: {source}", root.display())]
    Collection {
        /// The root being walked.
        root: PathBuf,
        /// Underlying walk error.
        #[source]
        source: ignore::Error,
    },

    /// A `.gitignore` file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Gitignore {
        /// Path of the `.gitignore` file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The rendered document could not be written.
    #[error("failed to write document {}: {source}", path.display())]
    Render {
        /// Output destination.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl CodestError {
    pub(crate) fn configuration(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        CodestError::Configuration {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
