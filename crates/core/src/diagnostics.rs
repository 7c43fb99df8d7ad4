//! Diagnostic side channel
//!
//! Mapping reports recoverable conditions here instead of failing. Sinks are
//! passed explicitly into every mapping call; there is no global logger.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Recoverable conditions observed while mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiagnosticCode {
    /// A document field that no mapping logic consumed
    UnmappedProperty,
    /// An instance whose category cannot be stored as a document
    NonInstanceCategory,
    /// An enum value whose ordinal and name disagree with its definition
    EnumDrift,
}

impl DiagnosticCode {
    /// Stable identifier
    pub const fn id(&self) -> &'static str {
        match self {
            DiagnosticCode::UnmappedProperty => "UNMAPPED_PROPERTY",
            DiagnosticCode::NonInstanceCategory => "NON_INSTANCE_CATEGORY",
            DiagnosticCode::EnumDrift => "ENUM_DRIFT",
        }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// One diagnostic event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Component that observed the condition
    pub source: String,
    /// Operation that was running
    pub operation: String,
    /// What was observed
    pub code: DiagnosticCode,
    /// Affected field key or property path
    pub field: Option<String>,
    /// Type the field belongs to
    pub related_type: Option<String>,
}

impl Diagnostic {
    /// Create a diagnostic
    pub fn new(
        source: impl Into<String>,
        operation: impl Into<String>,
        code: DiagnosticCode,
    ) -> Self {
        Self {
            source: source.into(),
            operation: operation.into(),
            code,
            field: None,
            related_type: None,
        }
    }

    /// Name the affected field
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Name the related type
    pub fn with_related_type(mut self, related_type: impl Into<String>) -> Self {
        self.related_type = Some(related_type.into());
        self
    }
}

/// Receiver of diagnostics
///
/// Fire and forget: nothing a sink does can affect the mapping result.
pub trait DiagnosticSink: Send + Sync {
    /// Record one diagnostic
    fn report(&self, diagnostic: Diagnostic);
}

/// Discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl DiagnosticSink for NoopSink {
    fn report(&self, _diagnostic: Diagnostic) {}
}

/// Forwards diagnostics to `tracing` as warnings
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&self, diagnostic: Diagnostic) {
        tracing::warn!(
            source = %diagnostic.source,
            operation = %diagnostic.operation,
            code = %diagnostic.code,
            field = diagnostic.field.as_deref().unwrap_or(""),
            related_type = diagnostic.related_type.as_deref().unwrap_or(""),
            "mapping diagnostic"
        );
    }
}

/// Keeps every diagnostic in arrival order
#[derive(Debug, Default)]
pub struct CollectingSink {
    events: Mutex<Vec<Diagnostic>>,
}

impl CollectingSink {
    /// Empty collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything reported so far
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.events.lock().clone()
    }

    /// Reported diagnostics with the given code
    pub fn with_code(&self, code: DiagnosticCode) -> Vec<Diagnostic> {
        self.events
            .lock()
            .iter()
            .filter(|d| d.code == code)
            .cloned()
            .collect()
    }

    /// Number of diagnostics reported so far
    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    /// Whether nothing has been reported
    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }

    /// Take and clear everything reported so far
    pub fn drain(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.events.lock())
    }
}

impl DiagnosticSink for CollectingSink {
    fn report(&self, diagnostic: Diagnostic) {
        self.events.lock().push(diagnostic);
    }
}
