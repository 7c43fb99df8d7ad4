//! Storage client abstraction and the in-memory backend
//!
//! The repository talks to a document store only through [`StorageClient`],
//! so a real backend can replace [`InMemoryStore`] without touching the
//! mapping layer.

use crate::error::StoreResult;
use metastore_core::Document;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use tracing::trace;

/// Document store used by the repository
///
/// Thread safety: all methods must be safe to call concurrently from
/// multiple threads.
pub trait StorageClient: Send + Sync {
    /// Insert or replace a document under its key
    fn put(&self, doc: Document) -> StoreResult<()>;

    /// Read a document by key
    fn get(&self, key: &str) -> StoreResult<Option<Document>>;

    /// Remove a document, returning whether it existed
    fn delete(&self, key: &str) -> StoreResult<bool>;
}

/// Store backed by a `BTreeMap` behind a `parking_lot::RwLock`
#[derive(Debug, Default)]
pub struct InMemoryStore {
    docs: RwLock<BTreeMap<String, Document>>,
}

impl InMemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored documents
    pub fn len(&self) -> usize {
        self.docs.read().len()
    }

    /// Whether the store is empty
    pub fn is_empty(&self) -> bool {
        self.docs.read().is_empty()
    }

    /// All document keys in order
    pub fn keys(&self) -> Vec<String> {
        self.docs.read().keys().cloned().collect()
    }
}

impl StorageClient for InMemoryStore {
    fn put(&self, doc: Document) -> StoreResult<()> {
        trace!(key = %doc.key, fields = doc.len(), "put document");
        self.docs.write().insert(doc.key.clone(), doc);
        Ok(())
    }

    fn get(&self, key: &str) -> StoreResult<Option<Document>> {
        let doc = self.docs.read().get(key).cloned();
        trace!(key, found = doc.is_some(), "get document");
        Ok(doc)
    }

    fn delete(&self, key: &str) -> StoreResult<bool> {
        let removed = self.docs.write().remove(key).is_some();
        trace!(key, removed, "delete document");
        Ok(removed)
    }
}
