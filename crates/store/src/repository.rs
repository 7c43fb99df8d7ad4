//! Instance repository
//!
//! Saves and loads whole instances: maps them with an [`InstanceMapper`]
//! built from the configured options, registry and sink, and hands the
//! documents to a [`StorageClient`].
//!
//! A guid keeps the category it was first saved with. Saves are serialized
//! so the category check and the write cannot interleave.

use crate::config::MappingConfig;
use crate::error::{StoreError, StoreResult};
use crate::storage::StorageClient;
use metastore_core::{DiagnosticSink, InstanceHeader, InstanceIdentity, TypeDefCategory};
use metastore_mapping::{reference, InstanceMapper, MappingContext, MappingOptions, TypeRegistry};
use parking_lot::Mutex;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Instances over a document store
pub struct InstanceRepository<S: StorageClient> {
    store: S,
    registry: TypeRegistry,
    options: MappingOptions,
    sink: Arc<dyn DiagnosticSink>,
    save_lock: Mutex<()>,
}

impl<S: StorageClient> InstanceRepository<S> {
    /// Create a repository from a validated configuration
    pub fn new(store: S, registry: TypeRegistry, config: &MappingConfig) -> StoreResult<Self> {
        config.validate()?;
        Ok(Self {
            store,
            registry,
            options: config.mapping_options(),
            sink: config.diagnostic_sink()?,
            save_lock: Mutex::new(()),
        })
    }

    /// Create a repository from a config file, writing the default first if
    /// the file does not exist
    pub fn open(path: &Path, store: S, registry: TypeRegistry) -> StoreResult<Self> {
        MappingConfig::write_default_if_missing(path)?;
        let config = MappingConfig::from_file(path)?;
        info!(path = %path.display(), "opened instance repository");
        Self::new(store, registry, &config)
    }

    /// Replace the diagnostic sink
    pub fn with_sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Type registry consulted on decode
    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    /// Mapping options in effect
    pub fn options(&self) -> &MappingOptions {
        &self.options
    }

    fn mapper(&self) -> InstanceMapper<'_> {
        InstanceMapper::new(MappingContext::new(
            &self.registry,
            self.sink.as_ref(),
            &self.options,
        ))
    }

    /// Store an instance
    ///
    /// Returns the document key, or `None` when the instance category
    /// cannot be stored (reported to the sink, nothing written). Fails with
    /// [`StoreError::CategoryConflict`] when the guid is already stored
    /// under the other instance category.
    pub fn save(&self, header: &InstanceHeader) -> StoreResult<Option<String>> {
        let doc = match self.mapper().encode(header)? {
            Some(doc) => doc,
            None => return Ok(None),
        };
        let key = doc.key.clone();
        let _guard = self.save_lock.lock();
        self.check_category(header.identity())?;
        self.store.put(doc)?;
        debug!(key = %key, "saved instance");
        Ok(Some(key))
    }

    /// Load an instance by category and guid
    ///
    /// `None` when no such document exists, or when the category is not an
    /// instance category (reported to the sink).
    pub fn load(
        &self,
        category: TypeDefCategory,
        guid: &str,
    ) -> StoreResult<Option<InstanceHeader>> {
        let key = match self.key_for(category, guid) {
            Some(key) => key,
            None => return Ok(None),
        };
        match self.store.get(&key)? {
            Some(doc) => {
                let header = self.mapper().decode(&doc)?;
                debug!(key = %key, "loaded instance");
                Ok(Some(header))
            }
            None => {
                debug!(key = %key, "instance not found");
                Ok(None)
            }
        }
    }

    /// Remove an instance, returning whether it existed
    pub fn delete(&self, category: TypeDefCategory, guid: &str) -> StoreResult<bool> {
        match self.key_for(category, guid) {
            Some(key) => self.store.delete(&key),
            None => Ok(false),
        }
    }

    fn check_category(&self, identity: &InstanceIdentity) -> StoreResult<()> {
        let others = [TypeDefCategory::EntityDef, TypeDefCategory::RelationshipDef]
            .into_iter()
            .filter(|other| *other != identity.category);
        for other in others {
            let prefix = match reference::reference_prefix(other) {
                Some(prefix) => prefix,
                None => continue,
            };
            if self.store.get(&reference::reference(prefix, &identity.guid))?.is_some() {
                warn!(
                    guid = %identity.guid,
                    existing = %other,
                    requested = %identity.category,
                    "instance category conflict"
                );
                return Err(StoreError::CategoryConflict {
                    guid: identity.guid.clone(),
                    existing: other,
                    requested: identity.category,
                });
            }
        }
        Ok(())
    }

    fn key_for(&self, category: TypeDefCategory, guid: &str) -> Option<String> {
        reference::guid_reference(self.sink.as_ref(), &InstanceIdentity::new(category, guid))
    }
}

impl<S: StorageClient + std::fmt::Debug> std::fmt::Debug for InstanceRepository<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InstanceRepository")
            .field("store", &self.store)
            .field("registry", &self.registry)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}
