//! Array property values
//!
//! Arrays cannot simply be serialized as a JSON list: each element keeps
//! its own category, and the store has to be able to search the element
//! values. So the types and the values are split:
//!
//! ```text
//! entityProperties/someProperty.json   {"category":"array","count":1,"values":{"0":{"category":"primitive","kind":"string","value":"A Simple Term"}}}
//! entityProperties/someProperty.value  ["A Simple Term"]
//! ```
//!
//! Indices are 0-based and contiguous. On decode, a gap, a non-canonical or
//! non-numeric index, or a count that disagrees with the indices is a
//! [`MappingError::MalformedArrayIndex`].

use crate::comparison;
use crate::context::MappingContext;
use crate::dispatch::{self, category_object, required_field, required_object};
use metastore_core::{
    ArrayPropertyValue, FieldScope, FieldValue, MappingError, MappingResult, PropertyCategory,
};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Key of the element count
pub const COUNT_KEY: &str = "count";
/// Key of the index → element object
pub const VALUES_KEY: &str = "values";

/// Encode an array into its full-fidelity form
pub(crate) fn encode(
    ctx: &MappingContext<'_>,
    scope: &FieldScope,
    array: &ArrayPropertyValue,
) -> MappingResult<Value> {
    let mut values = Map::new();
    for (index, element) in array.values.iter().enumerate() {
        let encoded = dispatch::encode_value(ctx, &scope.element(index), element)?;
        values.insert(index.to_string(), encoded);
    }
    let mut obj = category_object(PropertyCategory::Array);
    obj.insert(COUNT_KEY.to_string(), Value::from(array.count()));
    obj.insert(VALUES_KEY.to_string(), Value::Object(values));
    Ok(Value::Object(obj))
}

/// Decode an array from its full-fidelity form
pub(crate) fn decode(
    ctx: &MappingContext<'_>,
    scope: &FieldScope,
    obj: &Map<String, Value>,
) -> MappingResult<ArrayPropertyValue> {
    let count = required_field(scope, obj, COUNT_KEY)?
        .as_u64()
        .ok_or_else(|| MappingError::invalid_encoding(scope.path(), "'count' is not a count"))?;
    let values = required_object(scope, obj, VALUES_KEY)?;

    let mut by_index = BTreeMap::new();
    for (key, element) in values {
        let index = parse_index(key)
            .ok_or_else(|| MappingError::malformed_index(scope.path(), key.as_str()))?;
        by_index.insert(index, element);
    }

    // Keys are distinct, so ascending 0..n without a gap means key == position
    for (position, index) in by_index.keys().enumerate() {
        if *index != position {
            return Err(MappingError::malformed_index(
                scope.path(),
                format!("{} (expected {})", index, position),
            ));
        }
    }
    if by_index.len() as u64 != count {
        return Err(MappingError::malformed_index(
            scope.path(),
            format!("count {} with {} indices", count, by_index.len()),
        ));
    }

    let mut decoded = Vec::with_capacity(by_index.len());
    for (index, element) in by_index {
        decoded.push(dispatch::decode_value(ctx, &scope.element(index), element)?);
    }
    Ok(ArrayPropertyValue { values: decoded })
}

/// Comparison projection of an array
///
/// The ordered projections of the elements, skipping elements that have
/// none. `None` when no element has one, so the `.value` field is
/// suppressed.
pub fn for_comparison(array: &ArrayPropertyValue) -> Option<FieldValue> {
    let projected: Vec<FieldValue> = array
        .values
        .iter()
        .filter_map(comparison::for_comparison)
        .collect();
    if projected.is_empty() {
        None
    } else {
        Some(FieldValue::Array(projected))
    }
}

/// Canonical decimal index: digits only, no leading zeros
fn parse_index(key: &str) -> Option<usize> {
    let canonical = !key.is_empty()
        && key.bytes().all(|b| b.is_ascii_digit())
        && (key == "0" || !key.starts_with('0'));
    if canonical {
        key.parse().ok()
    } else {
        None
    }
}
