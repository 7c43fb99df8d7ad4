//! Document keys and instance references.

use crate::common::*;
use metastore::{
    decode_reference, guid_for_category, guid_reference, trim_guid, CollectingSink,
    DiagnosticCode, InstanceHeader, InstanceIdentity, MappingError, TypeDefCategory,
};

#[test]
fn references_are_symmetric() {
    let sink = CollectingSink::new();
    for identity in [
        InstanceIdentity::entity("3f2a"),
        InstanceIdentity::relationship("b_7_c"),
        InstanceIdentity::generate(TypeDefCategory::EntityDef),
    ] {
        let reference = guid_reference(&sink, &identity).unwrap();
        assert_eq!(trim_guid(&reference), identity.guid);
        assert_eq!(decode_reference(&reference).unwrap(), identity);
        assert_eq!(
            guid_for_category(&reference, identity.category).unwrap(),
            identity.guid
        );
    }
    assert!(sink.is_empty());
}

#[test]
fn non_instance_categories_yield_one_diagnostic_each() {
    for category in TypeDefCategory::ALL
        .into_iter()
        .filter(|c| !c.is_instance())
    {
        let sink = CollectingSink::new();
        assert_eq!(guid_reference(&sink, &InstanceIdentity::new(category, "g")), None);
        let diagnostics = sink.diagnostics();
        assert_eq!(diagnostics.len(), 1, "{:?}", category);
        assert_eq!(diagnostics[0].code, DiagnosticCode::NonInstanceCategory);
    }
}

#[test]
fn classification_instance_is_not_encoded() {
    let h = Harness::new();
    let header =
        InstanceHeader::new(InstanceIdentity::new(TypeDefCategory::ClassificationDef, "c"));
    assert_eq!(h.mapper().encode(&header).unwrap(), None);
    assert_eq!(h.sink.with_code(DiagnosticCode::NonInstanceCategory).len(), 1);
}

#[test]
fn wrong_category_is_rejected() {
    assert_eq!(
        guid_for_category("e_1", TypeDefCategory::RelationshipDef),
        Err(MappingError::CategoryMismatch {
            reference: "e_1".to_string(),
            expected: "RelationshipDef".to_string(),
            actual: "EntityDef".to_string(),
        })
    );
}

#[test]
fn generated_guids_are_unique() {
    let a = InstanceIdentity::generate(TypeDefCategory::EntityDef);
    let b = InstanceIdentity::generate(TypeDefCategory::EntityDef);
    assert_ne!(a.guid, b.guid);
}
