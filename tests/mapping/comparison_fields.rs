//! Which comparison fields a document carries.

use crate::common::*;
use metastore::{FieldValue, MappingOptions, PrimitiveKind, PropertyValue};

fn value_keys(doc: &metastore::Document) -> Vec<&str> {
    doc.field_keys().filter(|k| k.ends_with(".value")).collect()
}

#[test]
fn empty_string_is_comparable() {
    let h = Harness::new();
    let doc = h.encode(&entity_with("summary", PropertyValue::string("")));
    assert_eq!(
        doc.get("entityProperties/summary.value"),
        Some(&FieldValue::from(""))
    );
}

#[test]
fn array_of_nulls_has_no_value_field() {
    let h = Harness::new();
    let doc = h.encode(&entity_with(
        "aliases",
        PropertyValue::array([
            PropertyValue::null(PrimitiveKind::String),
            PropertyValue::null(PrimitiveKind::String),
        ]),
    ));
    assert!(doc.contains("entityProperties/aliases.json"));
    assert!(value_keys(&doc).is_empty());
}

#[test]
fn map_entries_are_scoped() {
    let h = Harness::new();
    let doc = h.encode(&entity_with(
        "additionalProperties",
        PropertyValue::map([
            ("owner", PropertyValue::string("sam")),
            ("tier", PropertyValue::int(3)),
            ("retired", PropertyValue::null(PrimitiveKind::Boolean)),
        ]),
    ));
    assert_eq!(
        value_keys(&doc),
        vec![
            "entityProperties/additionalProperties/owner.value",
            "entityProperties/additionalProperties/tier.value",
        ]
    );
}

#[test]
fn escaped_names_do_not_collide() {
    let h = Harness::new();
    let doc = h.encode(&entity_with(
        "m",
        PropertyValue::map([
            ("a/b", PropertyValue::int(1)),
            ("a", PropertyValue::map([("b", PropertyValue::int(2))])),
        ]),
    ));
    assert_eq!(doc.get("entityProperties/m/a%2Fb.value"), Some(&FieldValue::Int(1)));
    assert_eq!(doc.get("entityProperties/m/a/b.value"), Some(&FieldValue::Int(2)));
}

#[test]
fn comparison_values_switched_off() {
    let h = Harness::new().with_options(MappingOptions {
        comparison_values: false,
        ..MappingOptions::default()
    });
    let header = entity_with("name", PropertyValue::string("orders"));
    let doc = h.encode(&header);
    assert!(value_keys(&doc).is_empty());
    assert_eq!(h.mapper().decode(&doc).unwrap(), header);
}

#[test]
fn biginteger_outside_i64_compares_as_text() {
    let h = Harness::new();
    let doc = h.encode(&entity_with(
        "huge",
        PropertyValue::primitive(metastore::PrimitiveScalar::BigInteger(
            "123456789012345678901234567890".to_string(),
        )),
    ));
    assert_eq!(
        doc.get("entityProperties/huge.value"),
        Some(&FieldValue::from("123456789012345678901234567890"))
    );
}
