//! Unmapped document fields
//!
//! Decoding records every field key it reads in a [`ConsumedFields`] set.
//! Whatever the document holds beyond that set is reported, one diagnostic
//! per field, and otherwise ignored.

use metastore_core::{Diagnostic, DiagnosticCode, DiagnosticSink, Document};
use std::collections::BTreeSet;

/// Field keys read while decoding one document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConsumedFields {
    keys: BTreeSet<String>,
}

impl ConsumedFields {
    /// Empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark one key as read
    pub fn consume(&mut self, key: impl Into<String>) {
        self.keys.insert(key.into());
    }

    /// Whether a key was read
    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    /// Number of keys read
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether nothing was read
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Report every field of `doc` not in `consumed`
///
/// Returns the unmapped keys in key order; one
/// [`DiagnosticCode::UnmappedProperty`] diagnostic is reported for each.
pub fn report_unmapped(
    sink: &dyn DiagnosticSink,
    source: &str,
    operation: &str,
    doc: &Document,
    consumed: &ConsumedFields,
    related_type: &str,
) -> Vec<String> {
    let unmapped: Vec<String> = doc
        .field_keys()
        .filter(|key| !consumed.contains(key))
        .map(str::to_string)
        .collect();
    for key in &unmapped {
        sink.report(
            Diagnostic::new(source, operation, DiagnosticCode::UnmappedProperty)
                .with_field(key.clone())
                .with_related_type(related_type),
        );
    }
    unmapped
}
