//! CLI error types.

use thiserror::Error;

use crate::config::ConfigError;

/// CLI errors.
///
/// Every error surfaces to the user on stderr with exit code 1; nothing is
/// retried internally.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The requested slot overlaps existing events and no override was
    /// given.
    #[error("{source}. Use --force to schedule anyway")]
    Conflict {
        #[from]
        source: schedule::ConflictError,
    },

    /// `delete` was invoked without an event id or a `--date`.
    #[error("pass an event id or --date to delete")]
    MissingDeleteTarget,

    /// Configuration is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// An error occurred in the storage layer.
    #[error(transparent)]
    Store(#[from] store::Error),

    /// JSON output could not be encoded.
    #[error("failed to encode output as JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// An I/O error occurred.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
