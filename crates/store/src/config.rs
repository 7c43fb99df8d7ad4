//! Mapping configuration via `metastore.toml`
//!
//! A missing file can be replaced by the commented default. Every value is
//! validated when the file is read, so a bad setting fails at startup instead
//! of on the first instance mapped.

use crate::error::{StoreError, StoreResult};
use metastore_core::{DiagnosticSink, NoopSink, TracingSink, MAX_NESTING_DEPTH};
use metastore_mapping::{MappingOptions, DEFAULT_ENTITY_NAMESPACE, DEFAULT_RELATIONSHIP_NAMESPACE};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

/// Config file name
pub const CONFIG_FILE_NAME: &str = "metastore.toml";

/// Where recoverable mapping diagnostics go
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticsMode {
    /// Forward to `tracing` at warn level
    Tracing,
    /// Discard
    None,
}

/// Mapping configuration loaded from `metastore.toml`.
///
/// # Example
///
/// ```toml
/// entity_namespace = "entityProperties"
/// relationship_namespace = "relationshipProperties"
/// comparison_values = true
/// report_unmapped = true
/// max_nesting_depth = 100
/// diagnostics = "tracing"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MappingConfig {
    /// Namespace of entity property fields.
    #[serde(default = "default_entity_namespace")]
    pub entity_namespace: String,
    /// Namespace of relationship property fields.
    #[serde(default = "default_relationship_namespace")]
    pub relationship_namespace: String,
    /// Write `.value` comparison fields.
    #[serde(default = "default_true")]
    pub comparison_values: bool,
    /// Report document fields that no mapping consumed.
    #[serde(default = "default_true")]
    pub report_unmapped: bool,
    /// Maximum nesting depth of a property value.
    #[serde(default = "default_max_nesting_depth")]
    pub max_nesting_depth: usize,
    /// Diagnostics sink: `"tracing"` or `"none"`.
    #[serde(default = "default_diagnostics")]
    pub diagnostics: String,
}

fn default_entity_namespace() -> String {
    DEFAULT_ENTITY_NAMESPACE.to_string()
}

fn default_relationship_namespace() -> String {
    DEFAULT_RELATIONSHIP_NAMESPACE.to_string()
}

fn default_true() -> bool {
    true
}

fn default_max_nesting_depth() -> usize {
    MAX_NESTING_DEPTH
}

fn default_diagnostics() -> String {
    "tracing".to_string()
}

impl Default for MappingConfig {
    fn default() -> Self {
        Self {
            entity_namespace: default_entity_namespace(),
            relationship_namespace: default_relationship_namespace(),
            comparison_values: true,
            report_unmapped: true,
            max_nesting_depth: default_max_nesting_depth(),
            diagnostics: default_diagnostics(),
        }
    }
}

impl MappingConfig {
    /// Parse the diagnostics string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not `"tracing"` or `"none"`.
    pub fn diagnostics_mode(&self) -> StoreResult<DiagnosticsMode> {
        match self.diagnostics.as_str() {
            "tracing" => Ok(DiagnosticsMode::Tracing),
            "none" => Ok(DiagnosticsMode::None),
            other => Err(StoreError::config(format!(
                "Invalid diagnostics '{}' in metastore.toml. Expected \"tracing\" or \"none\".",
                other
            ))),
        }
    }

    /// Check every setting.
    pub fn validate(&self) -> StoreResult<()> {
        if self.entity_namespace.is_empty() {
            return Err(StoreError::config("entity_namespace must not be empty"));
        }
        if self.relationship_namespace.is_empty() {
            return Err(StoreError::config("relationship_namespace must not be empty"));
        }
        if self.max_nesting_depth < 1 {
            return Err(StoreError::config("max_nesting_depth must be at least 1"));
        }
        self.diagnostics_mode()?;
        Ok(())
    }

    /// Mapping options for these settings.
    pub fn mapping_options(&self) -> MappingOptions {
        MappingOptions {
            entity_namespace: self.entity_namespace.clone(),
            relationship_namespace: self.relationship_namespace.clone(),
            comparison_values: self.comparison_values,
            report_unmapped: self.report_unmapped,
            max_nesting_depth: self.max_nesting_depth,
        }
    }

    /// Diagnostic sink selected by `diagnostics`.
    pub fn diagnostic_sink(&self) -> StoreResult<Arc<dyn DiagnosticSink>> {
        let sink: Arc<dyn DiagnosticSink> = match self.diagnostics_mode()? {
            DiagnosticsMode::Tracing => Arc::new(TracingSink),
            DiagnosticsMode::None => Arc::new(NoopSink),
        };
        Ok(sink)
    }

    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# metastore mapping configuration
#
# Namespaces qualifying property field keys
entity_namespace = "entityProperties"
relationship_namespace = "relationshipProperties"

# Write indexable <namespace>/<property>.value fields (default: true)
comparison_values = true

# Report document fields no mapping consumed (default: true)
report_unmapped = true

# Maximum nesting depth of a property value (default: 100)
max_nesting_depth = 100

# Diagnostics: "tracing" (default) or "none"
diagnostics = "tracing"
"#
    }

    /// Read and parse config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn from_file(path: &Path) -> StoreResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| StoreError::io(path, e))?;
        let config: MappingConfig = toml::from_str(&content).map_err(|e| {
            StoreError::config(format!(
                "Failed to parse config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Write the default config file if it does not already exist.
    ///
    /// Returns `Ok(())` whether the file was created or already existed.
    pub fn write_default_if_missing(path: &Path) -> StoreResult<()> {
        if !path.exists() {
            std::fs::write(path, Self::default_toml()).map_err(|e| StoreError::io(path, e))?;
        }
        Ok(())
    }

    /// Serialize this config to TOML and write it to the given path.
    pub fn write_to_file(&self, path: &Path) -> StoreResult<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| StoreError::config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content).map_err(|e| StoreError::io(path, e))
    }
}
