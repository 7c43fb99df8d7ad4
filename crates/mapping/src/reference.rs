//! Instance references
//!
//! The document key of an instance is a deterministic, reversible function
//! of its category and guid:
//!
//! | Category | Reference |
//! |----------|-----------|
//! | EntityDef | `e_<guid>` |
//! | RelationshipDef | `r_<guid>` |
//!
//! Neither prefix contains the separator, so splitting at the first `_`
//! always recovers the guid, even when the guid itself contains `_`.

use metastore_core::{
    Diagnostic, DiagnosticCode, DiagnosticSink, InstanceIdentity, MappingError, MappingResult,
    TypeDefCategory,
};

/// Reference prefix of entities
pub const ENTITY_REF_PREFIX: &str = "e";
/// Reference prefix of relationships
pub const RELATIONSHIP_REF_PREFIX: &str = "r";
/// Separator between prefix and guid
pub const REF_SEPARATOR: char = '_';

const SOURCE: &str = module_path!();

/// Prefix for an instance category
pub const fn reference_prefix(category: TypeDefCategory) -> Option<&'static str> {
    match category {
        TypeDefCategory::EntityDef => Some(ENTITY_REF_PREFIX),
        TypeDefCategory::RelationshipDef => Some(RELATIONSHIP_REF_PREFIX),
        _ => None,
    }
}

/// Category for a reference prefix
pub fn category_for_prefix(prefix: &str) -> Option<TypeDefCategory> {
    match prefix {
        ENTITY_REF_PREFIX => Some(TypeDefCategory::EntityDef),
        RELATIONSHIP_REF_PREFIX => Some(TypeDefCategory::RelationshipDef),
        _ => None,
    }
}

/// Join a prefix and a guid
pub fn reference(prefix: &str, guid: &str) -> String {
    format!("{}{}{}", prefix, REF_SEPARATOR, guid)
}

/// Reference of an instance
///
/// Categories that are not instances yield `None` after reporting one
/// [`DiagnosticCode::NonInstanceCategory`] diagnostic; the caller decides
/// what to do with an instance that cannot be stored.
pub fn guid_reference(sink: &dyn DiagnosticSink, identity: &InstanceIdentity) -> Option<String> {
    match reference_prefix(identity.category) {
        Some(prefix) => Some(reference(prefix, &identity.guid)),
        None => {
            sink.report(
                Diagnostic::new(SOURCE, "guid_reference", DiagnosticCode::NonInstanceCategory)
                    .with_field(identity.guid.clone())
                    .with_related_type(identity.category.name()),
            );
            None
        }
    }
}

/// Guid portion of a reference
///
/// Everything after the first separator; a string without a separator is
/// returned whole.
pub fn trim_guid(reference: &str) -> &str {
    match reference.split_once(REF_SEPARATOR) {
        Some((_, guid)) => guid,
        None => reference,
    }
}

/// Category and guid of a reference
pub fn decode_reference(reference: &str) -> MappingResult<InstanceIdentity> {
    let (prefix, guid) = reference
        .split_once(REF_SEPARATOR)
        .ok_or_else(|| MappingError::invalid_reference(reference, "missing separator"))?;
    let category = category_for_prefix(prefix).ok_or_else(|| {
        MappingError::invalid_reference(reference, format!("unknown prefix '{}'", prefix))
    })?;
    Ok(InstanceIdentity::new(category, guid))
}

/// Guid of a reference that must be of the `expected` category
pub fn guid_for_category(reference: &str, expected: TypeDefCategory) -> MappingResult<String> {
    let identity = decode_reference(reference)?;
    if identity.category != expected {
        return Err(MappingError::CategoryMismatch {
            reference: reference.to_string(),
            expected: expected.name().to_string(),
            actual: identity.category.name().to_string(),
        });
    }
    Ok(identity.guid)
}
