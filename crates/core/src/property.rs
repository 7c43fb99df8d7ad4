//! Instance property values
//!
//! A property attached to an instance is one of five categories, and the
//! composite categories nest arbitrarily:
//!
//! | Category | Shape |
//! |----------|-------|
//! | Primitive | one typed scalar (or null) |
//! | Array | ordered values, 0-based positional index |
//! | Map | named values, unique keys |
//! | Struct | named fields of a declared struct type |
//! | Enum | ordinal + symbolic name of a declared enum type |
//!
//! The model is closed: every codec matches exhaustively on
//! [`PropertyValue`], so adding a category is a compile-time change.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// The five property categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PropertyCategory {
    /// Single typed scalar
    Primitive,
    /// Ordered collection
    Array,
    /// Named collection
    Map,
    /// Declared composite type
    Struct,
    /// Declared enumeration
    Enum,
}

impl PropertyCategory {
    /// All categories (for iteration)
    pub const ALL: [PropertyCategory; 5] = [
        PropertyCategory::Primitive,
        PropertyCategory::Array,
        PropertyCategory::Map,
        PropertyCategory::Struct,
        PropertyCategory::Enum,
    ];

    /// Tag written into full-fidelity encodings
    pub const fn id(&self) -> &'static str {
        match self {
            PropertyCategory::Primitive => "primitive",
            PropertyCategory::Array => "array",
            PropertyCategory::Map => "map",
            PropertyCategory::Struct => "struct",
            PropertyCategory::Enum => "enum",
        }
    }

    /// Parse from tag
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.id() == id)
    }
}

impl fmt::Display for PropertyCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Declared sub-kind of a primitive property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrimitiveKind {
    /// true / false
    Boolean,
    /// 8-bit signed
    Byte,
    /// Single unicode scalar
    Char,
    /// 16-bit signed
    Short,
    /// 32-bit signed
    Int,
    /// 64-bit signed
    Long,
    /// 32-bit IEEE-754
    Float,
    /// 64-bit IEEE-754
    Double,
    /// Arbitrary precision integer, decimal text
    BigInteger,
    /// Arbitrary precision decimal, decimal text
    BigDecimal,
    /// UTF-8 text
    String,
    /// Milliseconds since the Unix epoch
    Date,
    /// Raw bytes
    Bytes,
}

impl PrimitiveKind {
    /// All primitive kinds (for iteration)
    pub const ALL: [PrimitiveKind; 13] = [
        PrimitiveKind::Boolean,
        PrimitiveKind::Byte,
        PrimitiveKind::Char,
        PrimitiveKind::Short,
        PrimitiveKind::Int,
        PrimitiveKind::Long,
        PrimitiveKind::Float,
        PrimitiveKind::Double,
        PrimitiveKind::BigInteger,
        PrimitiveKind::BigDecimal,
        PrimitiveKind::String,
        PrimitiveKind::Date,
        PrimitiveKind::Bytes,
    ];

    /// Tag written into full-fidelity encodings
    pub const fn id(&self) -> &'static str {
        match self {
            PrimitiveKind::Boolean => "boolean",
            PrimitiveKind::Byte => "byte",
            PrimitiveKind::Char => "char",
            PrimitiveKind::Short => "short",
            PrimitiveKind::Int => "int",
            PrimitiveKind::Long => "long",
            PrimitiveKind::Float => "float",
            PrimitiveKind::Double => "double",
            PrimitiveKind::BigInteger => "biginteger",
            PrimitiveKind::BigDecimal => "bigdecimal",
            PrimitiveKind::String => "string",
            PrimitiveKind::Date => "date",
            PrimitiveKind::Bytes => "bytes",
        }
    }

    /// Parse from tag
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.id() == id)
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// A primitive's scalar payload
///
/// Each variant corresponds to exactly one [`PrimitiveKind`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PrimitiveScalar {
    /// Boolean
    Boolean(bool),
    /// Byte
    Byte(i8),
    /// Char
    Char(char),
    /// Short
    Short(i16),
    /// Int
    Int(i32),
    /// Long
    Long(i64),
    /// Float
    Float(f32),
    /// Double
    Double(f64),
    /// BigInteger as decimal text (`-?[0-9]+`)
    BigInteger(String),
    /// BigDecimal as decimal text
    BigDecimal(String),
    /// String
    String(String),
    /// Date as epoch milliseconds
    Date(i64),
    /// Bytes
    Bytes(Vec<u8>),
}

impl PrimitiveScalar {
    /// The kind this scalar belongs to
    pub const fn kind(&self) -> PrimitiveKind {
        match self {
            PrimitiveScalar::Boolean(_) => PrimitiveKind::Boolean,
            PrimitiveScalar::Byte(_) => PrimitiveKind::Byte,
            PrimitiveScalar::Char(_) => PrimitiveKind::Char,
            PrimitiveScalar::Short(_) => PrimitiveKind::Short,
            PrimitiveScalar::Int(_) => PrimitiveKind::Int,
            PrimitiveScalar::Long(_) => PrimitiveKind::Long,
            PrimitiveScalar::Float(_) => PrimitiveKind::Float,
            PrimitiveScalar::Double(_) => PrimitiveKind::Double,
            PrimitiveScalar::BigInteger(_) => PrimitiveKind::BigInteger,
            PrimitiveScalar::BigDecimal(_) => PrimitiveKind::BigDecimal,
            PrimitiveScalar::String(_) => PrimitiveKind::String,
            PrimitiveScalar::Date(_) => PrimitiveKind::Date,
            PrimitiveScalar::Bytes(_) => PrimitiveKind::Bytes,
        }
    }
}

/// Primitive property: declared kind plus optional scalar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrimitivePropertyValue {
    /// Declared kind
    pub kind: PrimitiveKind,
    /// Payload; `None` is a null primitive
    pub value: Option<PrimitiveScalar>,
}

/// Array property; position in the vector is the element index
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArrayPropertyValue {
    /// Elements in index order
    pub values: Vec<PropertyValue>,
}

impl ArrayPropertyValue {
    /// Number of elements
    pub fn count(&self) -> usize {
        self.values.len()
    }
}

/// Map property
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MapPropertyValue {
    /// Entries, keyed by name
    pub values: BTreeMap<String, PropertyValue>,
}

/// Struct property of a declared struct type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructPropertyValue {
    /// Declared struct type name
    pub type_name: String,
    /// Field values
    pub fields: BTreeMap<String, PropertyValue>,
}

/// Enum property of a declared enum type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumPropertyValue {
    /// Declared enum type name
    pub type_name: String,
    /// Ordinal (authoritative)
    pub ordinal: i32,
    /// Symbolic name
    pub symbolic_name: String,
    /// Optional description of the element
    pub description: Option<String>,
}

/// A property value of any category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PropertyValue {
    /// Primitive
    Primitive(PrimitivePropertyValue),
    /// Array
    Array(ArrayPropertyValue),
    /// Map
    Map(MapPropertyValue),
    /// Struct
    Struct(StructPropertyValue),
    /// Enum
    Enum(EnumPropertyValue),
}

impl PropertyValue {
    /// Category of this value
    pub const fn category(&self) -> PropertyCategory {
        match self {
            PropertyValue::Primitive(_) => PropertyCategory::Primitive,
            PropertyValue::Array(_) => PropertyCategory::Array,
            PropertyValue::Map(_) => PropertyCategory::Map,
            PropertyValue::Struct(_) => PropertyCategory::Struct,
            PropertyValue::Enum(_) => PropertyCategory::Enum,
        }
    }

    // =========================================================================
    // Constructors
    // =========================================================================

    /// Primitive from a scalar (kind taken from the scalar)
    pub fn primitive(value: PrimitiveScalar) -> Self {
        PropertyValue::Primitive(PrimitivePropertyValue {
            kind: value.kind(),
            value: Some(value),
        })
    }

    /// Null primitive of the given kind
    pub fn null(kind: PrimitiveKind) -> Self {
        PropertyValue::Primitive(PrimitivePropertyValue { kind, value: None })
    }

    /// String primitive
    pub fn string(s: impl Into<String>) -> Self {
        Self::primitive(PrimitiveScalar::String(s.into()))
    }

    /// Int primitive
    pub fn int(i: i32) -> Self {
        Self::primitive(PrimitiveScalar::Int(i))
    }

    /// Long primitive
    pub fn long(i: i64) -> Self {
        Self::primitive(PrimitiveScalar::Long(i))
    }

    /// Double primitive
    pub fn double(f: f64) -> Self {
        Self::primitive(PrimitiveScalar::Double(f))
    }

    /// Boolean primitive
    pub fn boolean(b: bool) -> Self {
        Self::primitive(PrimitiveScalar::Boolean(b))
    }

    /// Date primitive, truncated to millisecond precision
    pub fn date(at: DateTime<Utc>) -> Self {
        Self::primitive(PrimitiveScalar::Date(at.timestamp_millis()))
    }

    /// Array from elements in index order
    pub fn array(values: impl IntoIterator<Item = PropertyValue>) -> Self {
        PropertyValue::Array(ArrayPropertyValue {
            values: values.into_iter().collect(),
        })
    }

    /// Map from entries
    pub fn map<K: Into<String>>(entries: impl IntoIterator<Item = (K, PropertyValue)>) -> Self {
        PropertyValue::Map(MapPropertyValue {
            values: entries.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        })
    }

    /// Struct of the given type from fields
    pub fn structure<K: Into<String>>(
        type_name: impl Into<String>,
        fields: impl IntoIterator<Item = (K, PropertyValue)>,
    ) -> Self {
        PropertyValue::Struct(StructPropertyValue {
            type_name: type_name.into(),
            fields: fields.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        })
    }

    /// Enum element of the given type
    pub fn enumeration(
        type_name: impl Into<String>,
        ordinal: i32,
        symbolic_name: impl Into<String>,
    ) -> Self {
        PropertyValue::Enum(EnumPropertyValue {
            type_name: type_name.into(),
            ordinal,
            symbolic_name: symbolic_name.into(),
            description: None,
        })
    }
}
