//! Instances saved through the repository come back unchanged.

use crate::common::*;
use metastore::{
    CollectingSink, DiagnosticCode, FieldValue, InMemoryStore, InstanceAuditHeader,
    InstanceHeader, InstanceIdentity, InstanceRepository, InstanceStatus, MappingConfig,
    PropertyValue, StorageClient, StoreError, TypeDefCategory,
};
use std::sync::Arc;
use std::thread;

fn repository(config: &MappingConfig) -> (InstanceRepository<InMemoryStore>, Arc<CollectingSink>) {
    init_tracing();
    let sink = Arc::new(CollectingSink::new());
    let repo = InstanceRepository::new(InMemoryStore::new(), glossary_registry(), config)
        .unwrap()
        .with_sink(sink.clone());
    (repo, sink)
}

fn glossary_term(guid: &str) -> InstanceHeader {
    InstanceHeader::new(InstanceIdentity::entity(guid))
        .with_type_name("GlossaryTerm")
        .with_audit(InstanceAuditHeader {
            created_by: Some("steward".to_string()),
            create_time: chrono::DateTime::from_timestamp_millis(1_650_000_000_000),
            version: 2,
            status: Some(InstanceStatus::Proposed),
            ..InstanceAuditHeader::default()
        })
        .with_property("displayName", PropertyValue::string("A Simple Term"))
        .with_property(
            "aliases",
            PropertyValue::array([
                PropertyValue::string("A Simple Term"),
                PropertyValue::string(""),
                PropertyValue::string("Another"),
            ]),
        )
        .with_property(
            "confidentiality",
            PropertyValue::enumeration("Confidentiality", 1, "Internal"),
        )
        .with_property("home", address("1 Rue Neuve", "Lyon"))
}

#[test]
fn save_and_load_glossary_term() {
    let (repo, sink) = repository(&MappingConfig::default());
    let term = glossary_term("term-1");

    assert_eq!(repo.save(&term).unwrap().as_deref(), Some("e_term-1"));
    let loaded = repo.load(TypeDefCategory::EntityDef, "term-1").unwrap();
    assert_eq!(loaded, Some(term));
    assert!(sink.is_empty());
}

#[test]
fn stored_document_is_searchable() {
    let (repo, _) = repository(&MappingConfig::default());
    repo.save(&glossary_term("term-2")).unwrap();

    let doc = repo.store().get("e_term-2").unwrap().unwrap();
    assert_eq!(
        doc.get("entityProperties/displayName.value"),
        Some(&FieldValue::from("A Simple Term"))
    );
    assert_eq!(
        doc.get("entityProperties/home/city.value"),
        Some(&FieldValue::from("Lyon"))
    );
    assert_eq!(doc.get("currentStatus"), Some(&FieldValue::from("PROPOSED")));
}

#[test]
fn custom_namespace_is_used() {
    let config = MappingConfig {
        entity_namespace: "props".to_string(),
        ..MappingConfig::default()
    };
    let (repo, _) = repository(&config);
    repo.save(&glossary_term("term-3")).unwrap();
    let doc = repo.store().get("e_term-3").unwrap().unwrap();
    assert!(doc.contains("props/displayName.json"));
    assert!(!doc.contains("entityProperties/displayName.json"));
    assert_eq!(
        repo.load(TypeDefCategory::EntityDef, "term-3").unwrap(),
        Some(glossary_term("term-3"))
    );
}

#[test]
fn foreign_fields_in_store_are_reported_on_load() {
    let (repo, sink) = repository(&MappingConfig::default());
    repo.save(&glossary_term("term-4")).unwrap();

    let mut doc = repo.store().get("e_term-4").unwrap().unwrap();
    doc.put("homeCode", FieldValue::Int(7));
    repo.store().put(doc).unwrap();

    assert_eq!(
        repo.load(TypeDefCategory::EntityDef, "term-4").unwrap(),
        Some(glossary_term("term-4"))
    );
    assert_eq!(sink.with_code(DiagnosticCode::UnmappedProperty).len(), 1);
}

#[test]
fn corrupt_document_fails_load() {
    let (repo, _) = repository(&MappingConfig::default());
    let mut doc = metastore::Document::new("e_bad");
    doc.put("entityProperties/name.json", FieldValue::from("{\"category\":"));
    repo.store().put(doc).unwrap();

    assert!(matches!(
        repo.load(TypeDefCategory::EntityDef, "bad"),
        Err(StoreError::Mapping(_))
    ));
}

#[test]
fn concurrent_saves() {
    let (repo, _) = repository(&MappingConfig::default());
    let repo = Arc::new(repo);
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let repo = Arc::clone(&repo);
            thread::spawn(move || {
                for j in 0..25 {
                    repo.save(&glossary_term(&format!("t{}-{}", i, j))).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
    assert_eq!(repo.store().len(), 100);
    assert!(repo
        .load(TypeDefCategory::EntityDef, "t3-24")
        .unwrap()
        .is_some());
}

#[test]
fn deeply_nested_property_loads_back() {
    let (repo, sink) = repository(&MappingConfig::default());
    let mut value = PropertyValue::string("leaf");
    for _ in 1..repo.options().max_nesting_depth {
        value = PropertyValue::map([("inner", value)]);
    }
    let header = InstanceHeader::new(InstanceIdentity::entity("deep")).with_property("tree", value);

    repo.save(&header).unwrap();
    assert_eq!(
        repo.load(TypeDefCategory::EntityDef, "deep").unwrap(),
        Some(header)
    );
    assert!(sink.is_empty());
}

#[test]
fn unstorable_version_writes_nothing() {
    let (repo, _) = repository(&MappingConfig::default());
    let header = InstanceHeader::new(InstanceIdentity::entity("v")).with_audit(
        InstanceAuditHeader {
            version: u64::MAX,
            ..InstanceAuditHeader::default()
        },
    );
    assert!(matches!(repo.save(&header), Err(StoreError::Mapping(_))));
    assert!(repo.store().is_empty());
}

#[test]
fn relationship_cannot_reuse_entity_guid() {
    let (repo, _) = repository(&MappingConfig::default());
    repo.save(&glossary_term("shared")).unwrap();

    let relationship = InstanceHeader::new(InstanceIdentity::relationship("shared"));
    assert!(matches!(
        repo.save(&relationship),
        Err(StoreError::CategoryConflict { .. })
    ));
    assert_eq!(repo.load(TypeDefCategory::RelationshipDef, "shared").unwrap(), None);
    assert_eq!(
        repo.load(TypeDefCategory::EntityDef, "shared").unwrap(),
        Some(glossary_term("shared"))
    );
}
