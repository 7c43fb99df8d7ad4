//! Storage side of metastore
//!
//! - config: `metastore.toml` mapping configuration
//! - storage: the document store abstraction and an in-memory backend
//! - repository: save and load whole instances

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod repository;
pub mod storage;

pub use config::{DiagnosticsMode, MappingConfig, CONFIG_FILE_NAME};
pub use error::{StoreError, StoreResult};
pub use repository::InstanceRepository;
pub use storage::{InMemoryStore, StorageClient};
