//! Error types for partner-desk.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using [`DeskError`].
pub type Result<T> = std::result::Result<T, DeskError>;

/// Failures raised while loading fixtures, menu files, or pages.
#[derive(Debug, Error)]
pub enum DeskError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {origin}: {source}")]
    Json {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("page {page} is out of range (1..={last})")]
    InvalidPage { page: u32, last: u32 },
}

impl DeskError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn json(origin: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Json {
            origin: origin.into(),
            source,
        }
    }
}
