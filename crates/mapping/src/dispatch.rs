//! Category dispatch
//!
//! The single recursive entry point of the codecs. Every full-fidelity form
//! is a JSON object carrying a `category` tag; dispatch routes on that tag
//! (decode) or on the [`PropertyValue`] variant (encode), and the composite
//! codecs call back in here once per nested value with a narrowed
//! [`FieldScope`].
//!
//! A property written to a document produces:
//! - `<scope>.json`: the full-fidelity form as compact JSON text
//! - `<scope>.value` and nested `<scope>/<key>.value`: comparison fields, see
//!   [`crate::comparison`]

use crate::comparison;
use crate::context::MappingContext;
use crate::unmapped::ConsumedFields;
use crate::{array, enumeration, map, primitive, structure};
use metastore_core::{
    Document, FieldScope, FieldValue, MappingError, MappingResult, PropertyCategory,
    PropertyValue,
};
use serde::Deserialize;
use serde_json::{Map, Value};

/// Key of the category tag in every full-fidelity object
pub const CATEGORY_KEY: &str = "category";

/// Fields produced for one top-level property
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedProperty {
    /// `(<scope>.json, full-fidelity text)`
    pub full_fidelity: (String, FieldValue),
    /// Comparison fields in emission order; empty when nothing is comparable
    pub comparison: Vec<(String, FieldValue)>,
}

impl EncodedProperty {
    /// Write every field into `doc`
    pub fn write_to(self, doc: &mut Document) {
        let (key, value) = self.full_fidelity;
        doc.put(key, value);
        for (key, value) in self.comparison {
            doc.put(key, value);
        }
    }
}

/// Encode a top-level property
pub fn encode_property(
    ctx: &MappingContext<'_>,
    namespace: &str,
    property_name: &str,
    value: &PropertyValue,
) -> MappingResult<EncodedProperty> {
    let scope = FieldScope::property(namespace, property_name);
    let full = encode_value(ctx, &scope, value)?;
    let text = serde_json::to_string(&full)
        .map_err(|e| MappingError::invalid_encoding(scope.path(), e.to_string()))?;
    let comparison = if ctx.options().comparison_values {
        comparison::comparison_fields(&scope, value)
    } else {
        Vec::new()
    };
    Ok(EncodedProperty {
        full_fidelity: (scope.json_key(), FieldValue::String(text)),
        comparison,
    })
}

/// Encode a top-level property straight into a document
pub fn add_property_to_document(
    ctx: &MappingContext<'_>,
    doc: &mut Document,
    namespace: &str,
    property_name: &str,
    value: &PropertyValue,
) -> MappingResult<()> {
    encode_property(ctx, namespace, property_name, value)?.write_to(doc);
    Ok(())
}

/// Decode a top-level property from a document
///
/// Returns `None` when the document has no full-fidelity field for the
/// property. The fields this mapping produces for the decoded value (its
/// `.json` plus, when enabled, its comparison fields) are recorded in
/// `consumed`; any other key under the property stays unmapped.
pub fn decode_property(
    ctx: &MappingContext<'_>,
    doc: &Document,
    namespace: &str,
    property_name: &str,
    consumed: &mut ConsumedFields,
) -> MappingResult<Option<PropertyValue>> {
    let scope = FieldScope::property(namespace, property_name);
    let text = match doc.get(&scope.json_key()) {
        None => return Ok(None),
        Some(FieldValue::String(text)) => text,
        Some(other) => {
            return Err(MappingError::invalid_encoding(
                scope.path(),
                format!("expected JSON text, found {}", other.type_name()),
            ))
        }
    };
    let full = parse_full_fidelity(ctx, &scope, text)?;
    let value = decode_value(ctx, &scope, &full)?;
    consumed.consume(scope.json_key());
    if ctx.options().comparison_values {
        for (key, _) in comparison::comparison_fields(&scope, &value) {
            consumed.consume(key);
        }
    }
    Ok(Some(value))
}

/// JSON object levels added by one level of property nesting
const JSON_LEVELS_PER_NESTING: usize = 2;

/// Parse full-fidelity text without serde_json's fixed recursion limit
///
/// The text is bounded by the configured nesting depth instead, so anything
/// `encode_value` accepts parses back.
fn parse_full_fidelity(
    ctx: &MappingContext<'_>,
    scope: &FieldScope,
    text: &str,
) -> MappingResult<Value> {
    let limit = ctx
        .options()
        .max_nesting_depth
        .saturating_mul(JSON_LEVELS_PER_NESTING)
        .saturating_add(1);
    let depth = json_depth(text);
    if depth > limit {
        return Err(MappingError::invalid_encoding(
            scope.path(),
            format!("JSON nested {} levels deep, limit is {}", depth, limit),
        ));
    }
    let mut de = serde_json::Deserializer::from_str(text);
    de.disable_recursion_limit();
    Value::deserialize(&mut de)
        .and_then(|value| de.end().map(|()| value))
        .map_err(|e| MappingError::invalid_encoding(scope.path(), e.to_string()))
}

/// Deepest object or array nesting in JSON text, ignoring string contents
fn json_depth(text: &str) -> usize {
    let (mut depth, mut max) = (0usize, 0usize);
    let (mut in_string, mut escaped) = (false, false);
    for byte in text.bytes() {
        if in_string {
            if escaped {
                escaped = false;
            } else if byte == b'\\' {
                escaped = true;
            } else if byte == b'"' {
                in_string = false;
            }
            continue;
        }
        match byte {
            b'"' => in_string = true,
            b'{' | b'[' => {
                depth += 1;
                max = max.max(depth);
            }
            b'}' | b']' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    max
}

/// Encode any value into its full-fidelity form
pub fn encode_value(
    ctx: &MappingContext<'_>,
    scope: &FieldScope,
    value: &PropertyValue,
) -> MappingResult<Value> {
    ctx.check_depth(scope)?;
    match value {
        PropertyValue::Primitive(p) => primitive::encode(scope, p),
        PropertyValue::Array(a) => array::encode(ctx, scope, a),
        PropertyValue::Map(m) => map::encode(ctx, scope, m),
        PropertyValue::Struct(s) => structure::encode(ctx, scope, s),
        PropertyValue::Enum(e) => Ok(enumeration::encode(e)),
    }
}

/// Decode any value from its full-fidelity form
pub fn decode_value(
    ctx: &MappingContext<'_>,
    scope: &FieldScope,
    json: &Value,
) -> MappingResult<PropertyValue> {
    ctx.check_depth(scope)?;
    let obj = json.as_object().ok_or_else(|| {
        MappingError::invalid_encoding(
            scope.path(),
            format!("expected property object, found {}", primitive::json_type(json)),
        )
    })?;
    let category = match obj.get(CATEGORY_KEY) {
        Some(Value::String(tag)) => PropertyCategory::from_id(tag)
            .ok_or_else(|| MappingError::unsupported_category(scope.path(), tag.as_str()))?,
        Some(other) => {
            return Err(MappingError::unsupported_category(
                scope.path(),
                other.to_string(),
            ))
        }
        None => {
            return Err(MappingError::invalid_encoding(
                scope.path(),
                "missing category tag",
            ))
        }
    };
    Ok(match category {
        PropertyCategory::Primitive => PropertyValue::Primitive(primitive::decode(scope, obj)?),
        PropertyCategory::Array => PropertyValue::Array(array::decode(ctx, scope, obj)?),
        PropertyCategory::Map => PropertyValue::Map(map::decode(ctx, scope, obj)?),
        PropertyCategory::Struct => PropertyValue::Struct(structure::decode(ctx, scope, obj)?),
        PropertyCategory::Enum => PropertyValue::Enum(enumeration::decode(ctx, scope, obj)?),
    })
}

/// A full-fidelity object with only its category tag set
pub(crate) fn category_object(category: PropertyCategory) -> Map<String, Value> {
    let mut obj = Map::new();
    obj.insert(CATEGORY_KEY.to_string(), Value::String(category.id().to_string()));
    obj
}

/// A key that must be present in a full-fidelity object
pub(crate) fn required_field<'j>(
    scope: &FieldScope,
    obj: &'j Map<String, Value>,
    key: &str,
) -> MappingResult<&'j Value> {
    obj.get(key)
        .ok_or_else(|| MappingError::invalid_encoding(scope.path(), format!("missing '{}'", key)))
}

/// A key that must hold a JSON object
pub(crate) fn required_object<'j>(
    scope: &FieldScope,
    obj: &'j Map<String, Value>,
    key: &str,
) -> MappingResult<&'j Map<String, Value>> {
    required_field(scope, obj, key)?.as_object().ok_or_else(|| {
        MappingError::invalid_encoding(scope.path(), format!("'{}' is not an object", key))
    })
}

/// A key that must hold a JSON string
pub(crate) fn required_str<'j>(
    scope: &FieldScope,
    obj: &'j Map<String, Value>,
    key: &str,
) -> MappingResult<&'j str> {
    required_field(scope, obj, key)?.as_str().ok_or_else(|| {
        MappingError::invalid_encoding(scope.path(), format!("'{}' is not a string", key))
    })
}
