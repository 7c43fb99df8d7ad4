//! metastore - maps metadata instances onto flat, searchable store documents
//!
//! An instance (entity or relationship) carries a tree of typed property
//! values. metastore writes each property twice: once as a lossless JSON
//! encoding that restores the exact value, and once as indexable comparison
//! fields the store can search and sort on.
//!
//! # Quick Start
//!
//! ```ignore
//! use metastore::{InMemoryStore, InstanceHeader, InstanceIdentity, InstanceRepository};
//! use metastore::{MappingConfig, PropertyValue, TypeDefCategory, TypeRegistry};
//!
//! let repo = InstanceRepository::new(
//!     InMemoryStore::new(),
//!     TypeRegistry::new(),
//!     &MappingConfig::default(),
//! )?;
//! let term = InstanceHeader::new(InstanceIdentity::entity("guid-1"))
//!     .with_property("displayName", PropertyValue::string("A Simple Term"));
//! repo.save(&term)?;
//! let loaded = repo.load(TypeDefCategory::EntityDef, "guid-1")?;
//! ```
//!
//! # Layout
//!
//! - [`metastore_core`]: property model, instances, documents, errors, diagnostics
//! - [`metastore_mapping`]: the codecs and the instance mapper
//! - [`metastore_store`]: configuration, storage client and repository

pub use metastore_core::*;
pub use metastore_mapping::{
    comparison_fields, decode_property, decode_reference, encode_property, for_comparison,
    guid_for_category, guid_reference, report_unmapped, trim_guid, ConsumedFields, EncodedProperty,
    EnumDef, InstanceMapper, MappingContext, MappingOptions, StructDef, TypeRegistry,
};
pub use metastore_store::{
    DiagnosticsMode, InMemoryStore, InstanceRepository, MappingConfig, StorageClient, StoreError,
    StoreResult, CONFIG_FILE_NAME,
};
