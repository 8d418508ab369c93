//! Domain-level error taxonomy for buildstamp.

use std::path::PathBuf;

/// Buildstamp errors.
#[derive(Debug, thiserror::Error)]
pub enum BuildstampError {
    #[error("could not calculate version of build")]
    VersionUndetermined,

    #[error("invalid release version {0:?}: expected dotted numbers such as 1.2.3")]
    InvalidRelease(String),

    #[error("failed to read manifest {path}: {source}")]
    ManifestRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse manifest {path}: {message}")]
    ManifestParse { path: PathBuf, message: String },

    #[error("invalid build configuration {path}: {message}")]
    Config { path: PathBuf, message: String },

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for buildstamp operations.
pub type Result<T> = std::result::Result<T, BuildstampError>;
