//! Enum property values
//!
//! Both the ordinal and the symbolic name are always written, so a reader
//! can check them against its own definition of the enum:
//!
//! ```json
//! {"category":"enum","type":"Status","ordinal":2,"symbolicName":"BAR","description":null}
//! ```
//!
//! When they disagree with the registered definition the ordinal wins and
//! an [`DiagnosticCode::EnumDrift`] diagnostic is reported.

use crate::context::MappingContext;
use crate::dispatch::{category_object, required_field, required_str};
use metastore_core::{
    DiagnosticCode, EnumPropertyValue, FieldScope, FieldValue, MappingError, MappingResult,
    PropertyCategory,
};
use serde_json::{Map, Value};

/// Key of the enum type name
pub const TYPE_KEY: &str = "type";
/// Key of the ordinal
pub const ORDINAL_KEY: &str = "ordinal";
/// Key of the symbolic name
pub const SYMBOLIC_NAME_KEY: &str = "symbolicName";
/// Key of the description
pub const DESCRIPTION_KEY: &str = "description";

const SOURCE: &str = module_path!();

/// Encode an enum into its full-fidelity form
pub(crate) fn encode(value: &EnumPropertyValue) -> Value {
    let mut obj = category_object(PropertyCategory::Enum);
    obj.insert(TYPE_KEY.to_string(), Value::String(value.type_name.clone()));
    obj.insert(ORDINAL_KEY.to_string(), Value::from(value.ordinal));
    obj.insert(
        SYMBOLIC_NAME_KEY.to_string(),
        Value::String(value.symbolic_name.clone()),
    );
    obj.insert(
        DESCRIPTION_KEY.to_string(),
        value
            .description
            .clone()
            .map(Value::String)
            .unwrap_or(Value::Null),
    );
    Value::Object(obj)
}

/// Decode an enum from its full-fidelity form
pub(crate) fn decode(
    ctx: &MappingContext<'_>,
    scope: &FieldScope,
    obj: &Map<String, Value>,
) -> MappingResult<EnumPropertyValue> {
    const OPERATION: &str = "decode_enum";
    let type_name = required_str(scope, obj, TYPE_KEY)?;
    let ordinal = required_field(scope, obj, ORDINAL_KEY)?
        .as_i64()
        .and_then(|o| i32::try_from(o).ok())
        .ok_or_else(|| MappingError::invalid_encoding(scope.path(), "'ordinal' is not an i32"))?;
    let encoded_name = required_str(scope, obj, SYMBOLIC_NAME_KEY)?;
    let description = match obj.get(DESCRIPTION_KEY) {
        None | Some(Value::Null) => None,
        Some(Value::String(d)) => Some(d.clone()),
        Some(_) => {
            return Err(MappingError::invalid_encoding(
                scope.path(),
                "'description' is not a string",
            ))
        }
    };

    let mut symbolic_name = encoded_name.to_string();
    if let Some(def) = ctx.registry().enum_def(type_name) {
        match def.symbolic_name(ordinal) {
            Some(known) if known == encoded_name => {}
            Some(known) => {
                ctx.report(
                    SOURCE,
                    OPERATION,
                    DiagnosticCode::EnumDrift,
                    Some(scope.path()),
                    Some(type_name),
                );
                symbolic_name = known.to_string();
            }
            None => ctx.report(
                SOURCE,
                OPERATION,
                DiagnosticCode::EnumDrift,
                Some(scope.path()),
                Some(type_name),
            ),
        }
    }

    Ok(EnumPropertyValue {
        type_name: type_name.to_string(),
        ordinal,
        symbolic_name,
        description,
    })
}

/// Comparison projection of an enum: its symbolic name
pub fn for_comparison(value: &EnumPropertyValue) -> Option<FieldValue> {
    Some(FieldValue::String(value.symbolic_name.clone()))
}
