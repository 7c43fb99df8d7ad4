//! Instance to document mapping
//!
//! Turns [`InstanceHeader`](metastore_core::InstanceHeader)s into flat store
//! [`Document`](metastore_core::Document)s and back:
//! - dispatch: five-way category dispatch, the recursive entry point
//! - primitive / array / map / structure / enumeration: per-category codecs
//! - comparison: derivation of the indexable `.value` fields
//! - reference: the `<prefix>_<guid>` document key codec
//! - unmapped: consumed-key tracking and unmapped-field reporting
//! - header: whole-instance mapping
//!
//! Every codec is a pure function of its input and a [`MappingContext`].

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod array;
pub mod comparison;
pub mod context;
pub mod dispatch;
pub mod enumeration;
pub mod header;
pub mod map;
pub mod primitive;
pub mod reference;
pub mod registry;
pub mod structure;
pub mod unmapped;

pub use comparison::{comparison_fields, for_comparison};
pub use context::{
    MappingContext, MappingOptions, DEFAULT_ENTITY_NAMESPACE, DEFAULT_RELATIONSHIP_NAMESPACE,
};
pub use dispatch::{
    add_property_to_document, decode_property, decode_value, encode_property, encode_value,
    EncodedProperty,
};
pub use header::InstanceMapper;
pub use reference::{decode_reference, guid_for_category, guid_reference, trim_guid};
pub use registry::{EnumDef, StructDef, TypeRegistry};
pub use unmapped::{report_unmapped, ConsumedFields};
