//! Core types for metastore
//!
//! This crate defines the foundational types shared by the mapping and
//! storage layers:
//! - PropertyValue: Recursive property model (primitive, array, map, struct, enum)
//! - InstanceIdentity / InstanceHeader: Entity and relationship instances
//! - Document / FieldScope: Store-facing documents and the field-key scheme
//! - FieldValue: Store-native value held under one field key
//! - MappingError: Fatal mapping errors
//! - Diagnostics: Recoverable conditions reported on a side channel

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod diagnostics;
pub mod document;
pub mod error;
pub mod instance;
pub mod property;
pub mod value;

pub use diagnostics::{
    CollectingSink, Diagnostic, DiagnosticCode, DiagnosticSink, NoopSink, TracingSink,
};
pub use document::{Document, FieldScope, JSON_SUFFIX, VALUE_SUFFIX};
pub use error::{MappingError, MappingResult};
pub use instance::{
    InstanceAuditHeader, InstanceHeader, InstanceIdentity, InstanceStatus, TypeDefCategory,
};
pub use property::{
    ArrayPropertyValue, EnumPropertyValue, MapPropertyValue, PrimitiveKind,
    PrimitivePropertyValue, PrimitiveScalar, PropertyCategory, PropertyValue,
    StructPropertyValue,
};
pub use value::FieldValue;

/// Default maximum nesting depth of a property value (100 levels)
///
/// Bounds recursion in the codecs so a hostile document cannot exhaust the
/// stack.
pub const MAX_NESTING_DEPTH: usize = 100;
