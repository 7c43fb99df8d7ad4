//! Store-facing documents and the field-key scheme
//!
//! A document is a flat map from field key to [`FieldValue`], stored under a
//! single document key (the instance reference).
//!
//! ## Field Keys
//!
//! | Field | Key |
//! |-------|-----|
//! | full-fidelity | `<namespace>/<propertyName>.json` |
//! | comparison | `<namespace>/<propertyName>.value` |
//! | nested comparison | `<namespace>/<propertyName>/<key>…/<key>.value` |
//!
//! Name segments are escaped (`%` → `%25`, `/` → `%2F`), so a segment never
//! contains the path separator and distinct paths never share a key. Names
//! without either character are written verbatim.

use crate::value::FieldValue;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

/// Suffix of full-fidelity field keys
pub const JSON_SUFFIX: &str = ".json";
/// Suffix of comparison field keys
pub const VALUE_SUFFIX: &str = ".value";
/// Separator between namespace and path segments
pub const PATH_SEPARATOR: char = '/';

/// Escape one name segment of a field key
pub fn escape_segment(name: &str) -> Cow<'_, str> {
    if !name.contains(&['%', PATH_SEPARATOR][..]) {
        return Cow::Borrowed(name);
    }
    let mut escaped = String::with_capacity(name.len() + 4);
    for c in name.chars() {
        match c {
            '%' => escaped.push_str("%25"),
            PATH_SEPARATOR => escaped.push_str("%2F"),
            other => escaped.push(other),
        }
    }
    Cow::Owned(escaped)
}

/// Reverse [`escape_segment`]
///
/// Returns `None` for a segment that could not have been produced by
/// escaping (a raw separator, or a `%` not followed by `25`/`2F`).
pub fn unescape_segment(segment: &str) -> Option<String> {
    if segment.contains(PATH_SEPARATOR) {
        return None;
    }
    let mut out = String::with_capacity(segment.len());
    let mut rest = segment;
    while let Some(pos) = rest.find('%') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        if tail.starts_with("%25") {
            out.push('%');
        } else if tail.starts_with("%2F") {
            out.push(PATH_SEPARATOR);
        } else {
            return None;
        }
        rest = &tail[3..];
    }
    out.push_str(rest);
    Some(out)
}

/// Position of a value inside a document's key space
///
/// A scope starts at a top-level property and is narrowed one segment at a
/// time as composite codecs recurse.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldScope {
    base: String,
    depth: usize,
}

impl FieldScope {
    /// Scope of a top-level property within a namespace
    pub fn property(namespace: &str, property_name: &str) -> Self {
        Self {
            base: format!(
                "{}{}{}",
                namespace,
                PATH_SEPARATOR,
                escape_segment(property_name)
            ),
            depth: 0,
        }
    }

    /// Scope of a named child (map key or struct field)
    pub fn child(&self, name: &str) -> Self {
        Self {
            base: format!("{}{}{}", self.base, PATH_SEPARATOR, escape_segment(name)),
            depth: self.depth + 1,
        }
    }

    /// Scope of an array element
    pub fn element(&self, index: usize) -> Self {
        Self {
            base: format!("{}{}{}", self.base, PATH_SEPARATOR, index),
            depth: self.depth + 1,
        }
    }

    /// Path of this scope, used when naming a property in errors
    pub fn path(&self) -> &str {
        &self.base
    }

    /// Nesting depth below the top-level property
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Full-fidelity field key
    pub fn json_key(&self) -> String {
        format!("{}{}", self.base, JSON_SUFFIX)
    }

    /// Comparison field key
    pub fn value_key(&self) -> String {
        format!("{}{}", self.base, VALUE_SUFFIX)
    }
}

impl fmt::Display for FieldScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.base)
    }
}

/// Property name of a top-level full-fidelity key within `namespace`
///
/// `entityProperties/name.json` → `Some("name")`. Nested keys and keys of
/// other namespaces yield `None`.
pub fn property_name_from_json_key(namespace: &str, key: &str) -> Option<String> {
    let rest = key.strip_prefix(namespace)?.strip_prefix(PATH_SEPARATOR)?;
    let segment = rest.strip_suffix(JSON_SUFFIX)?;
    unescape_segment(segment)
}

/// A store document: key plus flat fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Document key (instance reference)
    pub key: String,
    /// Field key → value
    pub fields: BTreeMap<String, FieldValue>,
}

impl Document {
    /// Empty document under `key`
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Set a field, replacing any previous value
    pub fn put(&mut self, field: impl Into<String>, value: FieldValue) {
        self.fields.insert(field.into(), value);
    }

    /// Set a field only when a value is present
    pub fn put_opt(&mut self, field: impl Into<String>, value: Option<FieldValue>) {
        if let Some(value) = value {
            self.put(field, value);
        }
    }

    /// Read a field
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field)
    }

    /// Whether a field is present
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// All field keys in order
    pub fn field_keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the document has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
