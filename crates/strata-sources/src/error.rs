//! Error types for strata-sources

use std::path::PathBuf;

/// Result type for strata-sources operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors reported by `load` and `save`.
///
/// A failed load never leaves the in-memory configuration unusable.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Filesystem error: {0}")]
    Fs(#[from] strata_fs::Error),

    #[error("Failed to parse {format} config at {path}: {message}")]
    Parse {
        path: PathBuf,
        format: String,
        message: String,
    },

    #[error("Failed to serialize {format} config for {path}: {message}")]
    Serialize {
        path: PathBuf,
        format: String,
        message: String,
    },

    #[error("Config document at {path} must have a mapping at the top level, found {found}")]
    NotAMapping { path: PathBuf, found: String },

    #[error("Saving is not supported by the {source_name} source")]
    SaveUnsupported { source_name: String },
}
