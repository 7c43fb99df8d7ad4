//! Pinned document layouts for representative property values.

use crate::common::*;
use metastore::{FieldValue, PrimitiveKind, PropertyValue};
use serde_json::{json, Value};

fn full_fidelity(doc: &metastore::Document, key: &str) -> Value {
    let text = doc
        .get(key)
        .and_then(FieldValue::as_str)
        .expect("full-fidelity field missing");
    serde_json::from_str(text).expect("full-fidelity field is not JSON")
}

#[test]
fn string_array_with_empty_element() {
    let h = Harness::new();
    let value = PropertyValue::array([
        PropertyValue::string("A Simple Term"),
        PropertyValue::string(""),
        PropertyValue::string("Another"),
    ]);
    let doc = h.encode(&entity_with("someProperty", value.clone()));

    let full = full_fidelity(&doc, "entityProperties/someProperty.json");
    assert_eq!(full["category"], "array");
    assert_eq!(full["count"], 3);
    let indices: Vec<&String> = full["values"].as_object().unwrap().keys().collect();
    assert_eq!(indices, vec!["0", "1", "2"]);
    assert_eq!(
        full["values"]["1"],
        json!({"category": "primitive", "kind": "string", "value": ""})
    );

    assert_eq!(
        doc.get("entityProperties/someProperty.value"),
        Some(&FieldValue::Array(vec![
            FieldValue::from("A Simple Term"),
            FieldValue::from(""),
            FieldValue::from("Another"),
        ]))
    );

    let decoded = h.mapper().decode(&doc).unwrap();
    assert_eq!(decoded.properties()["someProperty"], value);
}

#[test]
fn empty_array_keeps_json_and_drops_value() {
    let h = Harness::new();
    let doc = h.encode(&entity_with("tags", PropertyValue::array([])));

    let full = full_fidelity(&doc, "entityProperties/tags.json");
    assert_eq!(full, json!({"category": "array", "count": 0, "values": {}}));
    assert!(!doc.contains("entityProperties/tags.value"));

    let decoded = h.mapper().decode(&doc).unwrap();
    assert_eq!(decoded.properties()["tags"], PropertyValue::array([]));
}

#[test]
fn empty_map_has_only_json() {
    let h = Harness::new();
    let empty: [(&str, PropertyValue); 0] = [];
    let doc = h.encode(&entity_with("extra", PropertyValue::map(empty)));

    let owned: Vec<&str> = doc
        .field_keys()
        .filter(|k| k.starts_with("entityProperties/extra"))
        .collect();
    assert_eq!(owned, vec!["entityProperties/extra.json"]);
    assert_eq!(
        full_fidelity(&doc, "entityProperties/extra.json"),
        json!({"category": "map", "values": {}})
    );
}

#[test]
fn null_primitive_is_written_without_comparison() {
    let h = Harness::new();
    let doc = h.encode(&entity_with("owner", PropertyValue::null(PrimitiveKind::String)));

    assert_eq!(
        full_fidelity(&doc, "entityProperties/owner.json"),
        json!({"category": "primitive", "kind": "string", "value": null})
    );
    assert!(!doc.contains("entityProperties/owner.value"));
}

#[test]
fn struct_layout() {
    let h = Harness::with_registry(glossary_registry());
    let doc = h.encode(&entity_with("home", address("1 Rue Neuve", "Lyon")));

    assert_eq!(
        full_fidelity(&doc, "entityProperties/home.json"),
        json!({
            "category": "struct",
            "type": "Address",
            "fields": {
                "city": {"category": "primitive", "kind": "string", "value": "Lyon"},
                "street": {"category": "primitive", "kind": "string", "value": "1 Rue Neuve"}
            }
        })
    );
    assert!(!doc.contains("entityProperties/home.value"));
    assert_eq!(
        doc.get("entityProperties/home/city.value"),
        Some(&FieldValue::from("Lyon"))
    );
}

#[test]
fn enum_layout() {
    let h = Harness::with_registry(glossary_registry());
    let doc = h.encode(&entity_with(
        "confidentiality",
        PropertyValue::enumeration("Confidentiality", 1, "Internal"),
    ));

    assert_eq!(
        full_fidelity(&doc, "entityProperties/confidentiality.json"),
        json!({
            "category": "enum",
            "type": "Confidentiality",
            "ordinal": 1,
            "symbolicName": "Internal",
            "description": null
        })
    );
    assert_eq!(
        doc.get("entityProperties/confidentiality.value"),
        Some(&FieldValue::from("Internal"))
    );
}

#[test]
fn date_is_compared_as_epoch_millis() {
    let h = Harness::new();
    let at = chrono::DateTime::from_timestamp_millis(1_700_000_000_250).unwrap();
    let doc = h.encode(&entity_with("lastReviewed", PropertyValue::date(at)));
    assert_eq!(
        doc.get("entityProperties/lastReviewed.value"),
        Some(&FieldValue::Int(1_700_000_000_250))
    );
}
