//! Error types for the store layer

use metastore_core::{MappingError, TypeDefCategory};
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for store operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Errors raised by configuration, storage and the repository
#[derive(Debug, Error)]
pub enum StoreError {
    /// Mapping an instance to or from a document failed
    #[error(transparent)]
    Mapping(#[from] MappingError),

    /// Reading or writing a file failed
    #[error("I/O error on '{shown}': {source}", shown = .path.display())]
    Io {
        /// File involved
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Configuration could not be parsed or is invalid
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// The guid is already stored under another instance category
    #[error("Guid '{guid}' is already stored as {existing}, cannot save it as {requested}")]
    CategoryConflict {
        /// Guid being saved
        guid: String,
        /// Category the guid is stored under
        existing: TypeDefCategory,
        /// Category of the rejected save
        requested: TypeDefCategory,
    },

    /// The storage backend failed
    #[error("Storage error: {0}")]
    Storage(String),
}

impl StoreError {
    /// I/O error on a path
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }

    /// Configuration error
    pub fn config(message: impl Into<String>) -> Self {
        StoreError::Config(message.into())
    }
}
