//! Shared test utilities for the integration suites.
//!
//! Import via `#[path = "../common/mod.rs"] mod common;` from a suite's main.rs.

#![allow(dead_code)]

use metastore::{
    CollectingSink, Document, EnumDef, InstanceHeader, InstanceIdentity, InstanceMapper,
    MappingContext, MappingOptions, PropertyValue, StructDef, TypeRegistry,
};
use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Install a fmt subscriber once per test binary.
///
/// Honours `RUST_LOG`; silent unless the test harness shows output.
pub fn init_tracing() {
    INIT_TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(tracing::Level::DEBUG)
            .try_init();
    });
}

/// Registry, options and a collecting sink, owned together so a test can
/// build mappers and then inspect the diagnostics.
pub struct Harness {
    pub registry: TypeRegistry,
    pub options: MappingOptions,
    pub sink: CollectingSink,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_registry(TypeRegistry::new())
    }

    pub fn with_registry(registry: TypeRegistry) -> Self {
        init_tracing();
        Self {
            registry,
            options: MappingOptions::default(),
            sink: CollectingSink::new(),
        }
    }

    pub fn with_options(mut self, options: MappingOptions) -> Self {
        self.options = options;
        self
    }

    pub fn ctx(&self) -> MappingContext<'_> {
        MappingContext::new(&self.registry, &self.sink, &self.options)
    }

    pub fn mapper(&self) -> InstanceMapper<'_> {
        InstanceMapper::new(self.ctx())
    }

    /// Encode an instance, failing the test if it is not storable.
    pub fn encode(&self, header: &InstanceHeader) -> Document {
        self.mapper()
            .encode(header)
            .expect("encode failed")
            .expect("instance not storable")
    }

    pub fn roundtrip(&self, header: &InstanceHeader) -> InstanceHeader {
        let doc = self.encode(header);
        self.mapper().decode(&doc).expect("decode failed")
    }
}

/// Registry with the `Address` struct and `Confidentiality` enum used across
/// the suites.
pub fn glossary_registry() -> TypeRegistry {
    TypeRegistry::new()
        .with_struct(StructDef::new("Address", ["street", "city"]))
        .with_enum(EnumDef::new(
            "Confidentiality",
            [(0, "Unclassified"), (1, "Internal"), (2, "BAR")],
        ))
}

/// Entity with one property.
pub fn entity_with(name: &str, value: PropertyValue) -> InstanceHeader {
    InstanceHeader::new(InstanceIdentity::entity("guid-1")).with_property(name, value)
}

/// `Address` struct value.
pub fn address(street: &str, city: &str) -> PropertyValue {
    PropertyValue::structure(
        "Address",
        [
            ("street", PropertyValue::string(street)),
            ("city", PropertyValue::string(city)),
        ],
    )
}
