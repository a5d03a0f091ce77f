//! Error types for run artifacts.
//!
//! Uses `thiserror` for typed errors with the path that was being
//! touched when the operation failed. Path escapes get their own
//! variant because they are a policy violation, not an I/O accident.

use std::path::PathBuf;

/// Errors that can occur while producing run artifacts.
#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    /// A write target resolved outside the confined output root.
    #[error("path escape blocked: {} is not within {}", .path.display(), .root.display())]
    PathEscape {
        /// The offending target path as the caller gave it.
        path: PathBuf,
        /// The output root the write was confined to.
        root: PathBuf,
    },

    /// A filesystem operation failed.
    #[error("i/o error at {}: {source}", .path.display())]
    Io {
        /// The file or directory the operation touched.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The sandbox process could not be spawned or awaited.
    #[error("sandbox error: {0}")]
    Sandbox(String),
}

impl ArtifactError {
    /// Wrap an I/O error with the path it happened at.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
