//! Fatal mapping errors name the offending property and never yield a
//! partial result.

use crate::common::*;
use metastore::{
    Document, FieldValue, InstanceHeader, InstanceIdentity, MappingError, MappingOptions,
    PrimitiveKind, PrimitivePropertyValue, PrimitiveScalar, PropertyValue,
};

fn doc_with(key: &str, json: &str) -> Document {
    let mut doc = Document::new("e_1");
    doc.put(key, FieldValue::from(json));
    doc
}

#[test]
fn array_gap_fails_decode() {
    let h = Harness::new();
    let doc = doc_with(
        "entityProperties/tags.json",
        r#"{"category":"array","count":3,"values":{
            "0":{"category":"primitive","kind":"string","value":"a"},
            "1":{"category":"primitive","kind":"string","value":"b"},
            "3":{"category":"primitive","kind":"string","value":"d"}}}"#,
    );
    let err = h.mapper().decode(&doc).unwrap_err();
    assert!(matches!(err, MappingError::MalformedArrayIndex { .. }));
    assert_eq!(err.property(), Some("entityProperties/tags"));
}

#[test]
fn unknown_category_fails_decode() {
    let h = Harness::new();
    let doc = doc_with(
        "entityProperties/shape.json",
        r#"{"category":"tuple","values":[]}"#,
    );
    assert_eq!(
        h.mapper().decode(&doc).unwrap_err(),
        MappingError::unsupported_category("entityProperties/shape", "tuple")
    );
}

#[test]
fn kind_mismatch_fails_decode() {
    let h = Harness::new();
    let doc = doc_with(
        "entityProperties/count.json",
        r#"{"category":"primitive","kind":"int","value":"seven"}"#,
    );
    assert!(matches!(
        h.mapper().decode(&doc).unwrap_err(),
        MappingError::TypeMismatch { property, .. } if property == "entityProperties/count"
    ));
}

#[test]
fn nested_error_names_nested_path() {
    let h = Harness::new();
    let doc = doc_with(
        "entityProperties/owners.json",
        r#"{"category":"array","count":1,"values":{
            "0":{"category":"map","values":{
                "lead":{"category":"primitive","kind":"long","value":true}}}}}"#,
    );
    let err = h.mapper().decode(&doc).unwrap_err();
    assert_eq!(err.property(), Some("entityProperties/owners/0/lead"));
}

#[test]
fn scalar_kind_disagreement_fails_encode() {
    let h = Harness::new();
    let bad = PropertyValue::Primitive(PrimitivePropertyValue {
        kind: PrimitiveKind::Long,
        value: Some(PrimitiveScalar::String("7".to_string())),
    });
    let header = InstanceHeader::new(InstanceIdentity::entity("g"))
        .with_property("fine", PropertyValue::string("ok"))
        .with_property("size", bad);
    assert!(matches!(
        h.mapper().encode(&header),
        Err(MappingError::TypeMismatch { .. })
    ));
}

#[test]
fn nesting_limit_is_enforced() {
    let h = Harness::new().with_options(MappingOptions {
        max_nesting_depth: 3,
        ..MappingOptions::default()
    });
    let mut value = PropertyValue::string("leaf");
    for _ in 0..3 {
        value = PropertyValue::array([value]);
    }
    let err = h.mapper().encode(&entity_with("deep", value)).unwrap_err();
    assert!(matches!(err, MappingError::NestingTooDeep { max: 3, .. }));

    let mut shallow = PropertyValue::string("leaf");
    for _ in 0..2 {
        shallow = PropertyValue::array([shallow]);
    }
    assert!(h.mapper().encode(&entity_with("deep", shallow)).is_ok());
}

#[test]
fn full_fidelity_field_must_be_text() {
    let h = Harness::new();
    let mut doc = Document::new("e_1");
    doc.put("entityProperties/name.json", FieldValue::Int(4));
    assert!(matches!(
        h.mapper().decode(&doc),
        Err(MappingError::InvalidEncoding { .. })
    ));
}
