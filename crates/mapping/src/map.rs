//! Map property values
//!
//! ```text
//! entityProperties/additionalProperties.json     {"category":"map","values":{"owner":{…},"tier":{…}}}
//! entityProperties/additionalProperties/owner.value  "sam"
//! entityProperties/additionalProperties/tier.value   3
//! ```
//!
//! The map itself has no comparison value; each entry's comparison value
//! is written under the entry's own scope.

use crate::context::MappingContext;
use crate::dispatch::{self, category_object, required_object};
use metastore_core::{FieldScope, MapPropertyValue, MappingResult, PropertyCategory, PropertyValue};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Key of the name → entry object
pub const VALUES_KEY: &str = "values";

/// Encode a map into its full-fidelity form
pub(crate) fn encode(
    ctx: &MappingContext<'_>,
    scope: &FieldScope,
    map: &MapPropertyValue,
) -> MappingResult<Value> {
    let entries = encode_entries(ctx, scope, &map.values)?;
    let mut obj = category_object(PropertyCategory::Map);
    obj.insert(VALUES_KEY.to_string(), Value::Object(entries));
    Ok(Value::Object(obj))
}

/// Decode a map from its full-fidelity form
pub(crate) fn decode(
    ctx: &MappingContext<'_>,
    scope: &FieldScope,
    obj: &Map<String, Value>,
) -> MappingResult<MapPropertyValue> {
    let entries = required_object(scope, obj, VALUES_KEY)?;
    Ok(MapPropertyValue {
        values: decode_entries(ctx, scope, entries)?,
    })
}

/// Encode named values, one nested scope per name
pub(crate) fn encode_entries(
    ctx: &MappingContext<'_>,
    scope: &FieldScope,
    values: &BTreeMap<String, PropertyValue>,
) -> MappingResult<Map<String, Value>> {
    let mut entries = Map::new();
    for (name, value) in values {
        entries.insert(
            name.clone(),
            dispatch::encode_value(ctx, &scope.child(name), value)?,
        );
    }
    Ok(entries)
}

/// Decode named values, one nested scope per name
pub(crate) fn decode_entries(
    ctx: &MappingContext<'_>,
    scope: &FieldScope,
    entries: &Map<String, Value>,
) -> MappingResult<BTreeMap<String, PropertyValue>> {
    let mut values = BTreeMap::new();
    for (name, json) in entries {
        values.insert(
            name.clone(),
            dispatch::decode_value(ctx, &scope.child(name), json)?,
        );
    }
    Ok(values)
}
