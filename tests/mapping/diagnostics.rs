//! Recoverable conditions are reported and never fail a decode.

use crate::common::*;
use metastore::{
    DiagnosticCode, FieldValue, InstanceHeader, InstanceIdentity, MappingOptions, PropertyValue,
    StructDef, TypeRegistry,
};

#[test]
fn unmapped_field_is_tolerated_with_exactly_one_diagnostic() {
    let h = Harness::new();
    let header = entity_with("qualifiedName", PropertyValue::string("glossary::term"));
    let mut doc = h.encode(&header);
    doc.put("unexpectedField", FieldValue::from("left by another writer"));

    assert_eq!(h.mapper().decode(&doc).unwrap(), header);
    let diagnostics = h.sink.diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, DiagnosticCode::UnmappedProperty);
    assert_eq!(diagnostics[0].field.as_deref(), Some("unexpectedField"));
}

#[test]
fn stray_keys_under_a_known_property_are_each_reported() {
    let h = Harness::new();
    let header = entity_with("name", PropertyValue::string("x"));
    let mut doc = h.encode(&header);
    doc.put("entityProperties/name/stale.value", FieldValue::Int(1));
    doc.put("entityProperties/name/bogus.json", FieldValue::from("{}"));

    assert_eq!(h.mapper().decode(&doc).unwrap(), header);
    let unmapped: Vec<_> = h
        .sink
        .with_code(DiagnosticCode::UnmappedProperty)
        .into_iter()
        .filter_map(|d| d.field)
        .collect();
    assert_eq!(
        unmapped,
        vec![
            "entityProperties/name/bogus.json".to_string(),
            "entityProperties/name/stale.value".to_string(),
        ]
    );
    assert_eq!(h.sink.len(), 2);
}

#[test]
fn comparison_fields_are_unmapped_when_comparison_is_off() {
    let h = Harness::new();
    let header = entity_with("name", PropertyValue::string("x"));
    let doc = h.encode(&header);

    let reader = Harness::new().with_options(MappingOptions {
        comparison_values: false,
        ..MappingOptions::default()
    });
    assert_eq!(reader.mapper().decode(&doc).unwrap(), header);
    let unmapped = reader.sink.with_code(DiagnosticCode::UnmappedProperty);
    assert_eq!(unmapped.len(), 1);
    assert_eq!(unmapped[0].field.as_deref(), Some("entityProperties/name.value"));
}

#[test]
fn enum_drift_uses_registered_name() {
    let h = Harness::with_registry(glossary_registry());
    let header = entity_with(
        "confidentiality",
        PropertyValue::enumeration("Confidentiality", 2, "FOO"),
    );
    let doc = h.encode(&header);
    assert_eq!(
        doc.get("entityProperties/confidentiality.value"),
        Some(&FieldValue::from("FOO"))
    );

    let decoded = h.mapper().decode(&doc).unwrap();
    assert_eq!(
        decoded.properties()["confidentiality"],
        PropertyValue::enumeration("Confidentiality", 2, "BAR")
    );
    let drift = h.sink.with_code(DiagnosticCode::EnumDrift);
    assert_eq!(drift.len(), 1);
    assert_eq!(drift[0].related_type.as_deref(), Some("Confidentiality"));
    assert_eq!(drift[0].field.as_deref(), Some("entityProperties/confidentiality"));
}

#[test]
fn unknown_enum_ordinal_keeps_encoded_name() {
    let h = Harness::with_registry(glossary_registry());
    let value = PropertyValue::enumeration("Confidentiality", 9, "TopSecret");
    let decoded = h.roundtrip(&entity_with("confidentiality", value.clone()));
    assert_eq!(decoded.properties()["confidentiality"], value);
    assert_eq!(h.sink.with_code(DiagnosticCode::EnumDrift).len(), 1);
}

#[test]
fn unregistered_enum_is_not_checked() {
    let h = Harness::new();
    let value = PropertyValue::enumeration("Confidentiality", 2, "FOO");
    let decoded = h.roundtrip(&entity_with("confidentiality", value.clone()));
    assert_eq!(decoded.properties()["confidentiality"], value);
    assert!(h.sink.is_empty());
}

#[test]
fn undeclared_struct_field_is_kept_and_reported() {
    let registry = TypeRegistry::new().with_struct(StructDef::new("Address", ["city"]));
    let h = Harness::with_registry(registry);
    let header = InstanceHeader::new(InstanceIdentity::entity("g"))
        .with_property("home", address("1 Rue Neuve", "Lyon"));

    assert_eq!(h.roundtrip(&header), header);
    let unmapped = h.sink.with_code(DiagnosticCode::UnmappedProperty);
    assert_eq!(unmapped.len(), 1);
    assert_eq!(unmapped[0].field.as_deref(), Some("entityProperties/home/street"));
    assert_eq!(unmapped[0].related_type.as_deref(), Some("Address"));
}

#[test]
fn undeclared_struct_field_is_silent_when_reporting_is_off() {
    let registry = TypeRegistry::new().with_struct(StructDef::new("Address", ["city"]));
    let h = Harness::with_registry(registry).with_options(MappingOptions {
        report_unmapped: false,
        ..MappingOptions::default()
    });
    let header = InstanceHeader::new(InstanceIdentity::entity("g"))
        .with_property("home", address("1 Rue Neuve", "Lyon"));

    assert_eq!(h.roundtrip(&header), header);
    assert!(h.sink.is_empty());
}

#[test]
fn diagnostics_are_also_logged_through_tracing() {
    init_tracing();
    let sink = metastore::TracingSink;
    let registry = glossary_registry();
    let options = metastore::MappingOptions::default();
    let mapper = metastore::InstanceMapper::new(metastore::MappingContext::new(
        &registry, &sink, &options,
    ));
    let doc = mapper
        .encode(&entity_with(
            "confidentiality",
            PropertyValue::enumeration("Confidentiality", 2, "FOO"),
        ))
        .unwrap()
        .unwrap();
    assert!(mapper.decode(&doc).is_ok());
}
