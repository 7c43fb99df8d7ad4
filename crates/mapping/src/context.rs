//! Per-call mapping context
//!
//! Everything a codec needs beyond its input value travels in a
//! [`MappingContext`]: the type registry, the diagnostic sink and the
//! options. Codecs hold no state of their own.

use crate::registry::TypeRegistry;
use metastore_core::{
    Diagnostic, DiagnosticCode, DiagnosticSink, FieldScope, MappingError, MappingResult,
    TypeDefCategory, MAX_NESTING_DEPTH,
};

/// Default namespace of entity properties
pub const DEFAULT_ENTITY_NAMESPACE: &str = "entityProperties";
/// Default namespace of relationship properties
pub const DEFAULT_RELATIONSHIP_NAMESPACE: &str = "relationshipProperties";

/// Mapping behaviour switches
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingOptions {
    /// Namespace qualifying entity property keys
    pub entity_namespace: String,
    /// Namespace qualifying relationship property keys
    pub relationship_namespace: String,
    /// Emit `.value` comparison fields
    pub comparison_values: bool,
    /// Report document fields no mapping consumed
    pub report_unmapped: bool,
    /// Maximum nesting depth of a property value
    pub max_nesting_depth: usize,
}

impl Default for MappingOptions {
    fn default() -> Self {
        Self {
            entity_namespace: DEFAULT_ENTITY_NAMESPACE.to_string(),
            relationship_namespace: DEFAULT_RELATIONSHIP_NAMESPACE.to_string(),
            comparison_values: true,
            report_unmapped: true,
            max_nesting_depth: MAX_NESTING_DEPTH,
        }
    }
}

impl MappingOptions {
    /// Property namespace for an instance category
    ///
    /// `None` for categories that are not stored as instances.
    pub fn namespace_for(&self, category: TypeDefCategory) -> Option<&str> {
        match category {
            TypeDefCategory::EntityDef => Some(&self.entity_namespace),
            TypeDefCategory::RelationshipDef => Some(&self.relationship_namespace),
            _ => None,
        }
    }
}

/// Borrowed collaborators of one mapping call
#[derive(Clone, Copy)]
pub struct MappingContext<'a> {
    registry: &'a TypeRegistry,
    sink: &'a dyn DiagnosticSink,
    options: &'a MappingOptions,
}

impl<'a> MappingContext<'a> {
    /// Create a context
    pub fn new(
        registry: &'a TypeRegistry,
        sink: &'a dyn DiagnosticSink,
        options: &'a MappingOptions,
    ) -> Self {
        Self {
            registry,
            sink,
            options,
        }
    }

    /// Type registry
    pub fn registry(&self) -> &'a TypeRegistry {
        self.registry
    }

    /// Diagnostic sink
    pub fn sink(&self) -> &'a dyn DiagnosticSink {
        self.sink
    }

    /// Options
    pub fn options(&self) -> &'a MappingOptions {
        self.options
    }

    /// Report a diagnostic
    pub fn report(
        &self,
        source: &str,
        operation: &str,
        code: DiagnosticCode,
        field: Option<&str>,
        related_type: Option<&str>,
    ) {
        let mut diagnostic = Diagnostic::new(source, operation, code);
        diagnostic.field = field.map(str::to_string);
        diagnostic.related_type = related_type.map(str::to_string);
        self.sink.report(diagnostic);
    }

    /// Fail when `scope` is nested deeper than allowed
    pub fn check_depth(&self, scope: &FieldScope) -> MappingResult<()> {
        let max = self.options.max_nesting_depth;
        if scope.depth() >= max {
            return Err(MappingError::NestingTooDeep {
                property: scope.path().to_string(),
                depth: scope.depth() + 1,
                max,
            });
        }
        Ok(())
    }
}

impl std::fmt::Debug for MappingContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MappingContext")
            .field("registry", self.registry)
            .field("options", self.options)
            .finish_non_exhaustive()
    }
}
