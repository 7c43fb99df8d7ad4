//! Error types for instance mapping
//!
//! Every variant here is fatal to the encode or decode that raised it: the
//! caller gets either a complete document/instance or exactly one of these.
//! Recoverable conditions (schema drift, unmapped fields) are diagnostics,
//! see [`crate::diagnostics`].
//!
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.

use thiserror::Error;

/// Result type alias for mapping operations
pub type MappingResult<T> = std::result::Result<T, MappingError>;

/// Fatal mapping errors
///
/// `property` is always the scoped path of the offending value
/// (e.g. `entityProperties/qualifiedName` or `entityProperties/tags/2`).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MappingError {
    /// A category tag that this mapping does not know
    #[error("Unsupported category '{category}' for property '{property}'")]
    UnsupportedCategory {
        /// Offending property path
        property: String,
        /// The unrecognised category tag
        category: String,
    },

    /// Declared primitive kind missing, unknown, or not matching the value
    #[error("Type mismatch for property '{property}': expected {expected}, found {found}")]
    TypeMismatch {
        /// Offending property path
        property: String,
        /// What the encoding declared
        expected: String,
        /// What was actually present
        found: String,
    },

    /// Array indices are not a contiguous 0-based run of integers
    #[error("Malformed array index '{index}' for property '{property}'")]
    MalformedArrayIndex {
        /// Offending property path
        property: String,
        /// The offending index key (or a description of the gap)
        index: String,
    },

    /// Full-fidelity text could not be parsed or has the wrong shape
    #[error("Invalid encoding for property '{property}': {reason}")]
    InvalidEncoding {
        /// Offending property path
        property: String,
        /// Parser or shape failure
        reason: String,
    },

    /// Value nests deeper than the configured maximum
    #[error("Nesting depth {depth} exceeds maximum of {max} levels at '{property}'")]
    NestingTooDeep {
        /// Offending property path
        property: String,
        /// Depth reached
        depth: usize,
        /// Configured maximum
        max: usize,
    },

    /// A document key that is not a valid instance reference
    #[error("Invalid instance reference '{reference}': {reason}")]
    InvalidReference {
        /// The offending reference
        reference: String,
        /// Why it was rejected
        reason: String,
    },

    /// A reference of the wrong instance category
    #[error("Reference '{reference}' is a {actual}, expected a {expected}")]
    CategoryMismatch {
        /// The offending reference
        reference: String,
        /// Expected category name
        expected: String,
        /// Category recovered from the reference
        actual: String,
    },
}

impl MappingError {
    /// Create an UnsupportedCategory error
    pub fn unsupported_category(property: impl Into<String>, category: impl Into<String>) -> Self {
        MappingError::UnsupportedCategory {
            property: property.into(),
            category: category.into(),
        }
    }

    /// Create a TypeMismatch error
    pub fn type_mismatch(
        property: impl Into<String>,
        expected: impl Into<String>,
        found: impl Into<String>,
    ) -> Self {
        MappingError::TypeMismatch {
            property: property.into(),
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Create a MalformedArrayIndex error
    pub fn malformed_index(property: impl Into<String>, index: impl Into<String>) -> Self {
        MappingError::MalformedArrayIndex {
            property: property.into(),
            index: index.into(),
        }
    }

    /// Create an InvalidEncoding error
    pub fn invalid_encoding(property: impl Into<String>, reason: impl Into<String>) -> Self {
        MappingError::InvalidEncoding {
            property: property.into(),
            reason: reason.into(),
        }
    }

    /// Create an InvalidReference error
    pub fn invalid_reference(reference: impl Into<String>, reason: impl Into<String>) -> Self {
        MappingError::InvalidReference {
            reference: reference.into(),
            reason: reason.into(),
        }
    }

    /// Path of the property this error names, if it is property-scoped
    pub fn property(&self) -> Option<&str> {
        match self {
            MappingError::UnsupportedCategory { property, .. }
            | MappingError::TypeMismatch { property, .. }
            | MappingError::MalformedArrayIndex { property, .. }
            | MappingError::InvalidEncoding { property, .. }
            | MappingError::NestingTooDeep { property, .. } => Some(property),
            MappingError::InvalidReference { .. } | MappingError::CategoryMismatch { .. } => None,
        }
    }
}
