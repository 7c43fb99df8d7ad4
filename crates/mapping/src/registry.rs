//! Known struct and enum definitions
//!
//! Decoding consults the registry to tell expected struct fields from
//! unexpected ones, and to check enum values against their definitions.
//! A type missing from the registry is decoded without either check.

use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Declared shape of a struct type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructDef {
    /// Type name
    pub name: String,
    /// Declared field names
    pub fields: BTreeSet<String>,
}

impl StructDef {
    /// Create a definition from its field names
    pub fn new<S: Into<String>>(
        name: impl Into<String>,
        fields: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            name: name.into(),
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether `field` is declared on this type
    pub fn declares(&self, field: &str) -> bool {
        self.fields.contains(field)
    }
}

/// Declared elements of an enum type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumDef {
    /// Type name
    pub name: String,
    /// Ordinal → symbolic name
    pub elements: BTreeMap<i32, String>,
}

impl EnumDef {
    /// Create a definition from (ordinal, symbolic name) pairs
    pub fn new<S: Into<String>>(
        name: impl Into<String>,
        elements: impl IntoIterator<Item = (i32, S)>,
    ) -> Self {
        Self {
            name: name.into(),
            elements: elements.into_iter().map(|(o, s)| (o, s.into())).collect(),
        }
    }

    /// Symbolic name for an ordinal
    pub fn symbolic_name(&self, ordinal: i32) -> Option<&str> {
        self.elements.get(&ordinal).map(String::as_str)
    }
}

/// Struct and enum definitions by type name
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    structs: HashMap<String, StructDef>,
    enums: HashMap<String, EnumDef>,
}

impl TypeRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a struct definition
    pub fn register_struct(&mut self, def: StructDef) {
        self.structs.insert(def.name.clone(), def);
    }

    /// Add (or replace) an enum definition
    pub fn register_enum(&mut self, def: EnumDef) {
        self.enums.insert(def.name.clone(), def);
    }

    /// Builder form of [`register_struct`](Self::register_struct)
    pub fn with_struct(mut self, def: StructDef) -> Self {
        self.register_struct(def);
        self
    }

    /// Builder form of [`register_enum`](Self::register_enum)
    pub fn with_enum(mut self, def: EnumDef) -> Self {
        self.register_enum(def);
        self
    }

    /// Look up a struct definition
    pub fn struct_def(&self, name: &str) -> Option<&StructDef> {
        self.structs.get(name)
    }

    /// Look up an enum definition
    pub fn enum_def(&self, name: &str) -> Option<&EnumDef> {
        self.enums.get(name)
    }
}
