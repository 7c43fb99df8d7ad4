//! Struct property values
//!
//! ```json
//! {"category":"struct","type":"Address","fields":{"city":{…},"zip":{…}}}
//! ```
//!
//! When the struct type is registered, fields present in the encoding but
//! not declared on the type are kept and, if unmapped reporting is on,
//! reported as [`DiagnosticCode::UnmappedProperty`]. The writer may know a
//! newer version of the type than the reader.

use crate::context::MappingContext;
use crate::dispatch::{category_object, required_object, required_str};
use crate::map::{decode_entries, encode_entries};
use metastore_core::{
    DiagnosticCode, FieldScope, MappingResult, PropertyCategory, StructPropertyValue,
};
use serde_json::{Map, Value};

/// Key of the struct type name
pub const TYPE_KEY: &str = "type";
/// Key of the name → field object
pub const FIELDS_KEY: &str = "fields";

const SOURCE: &str = module_path!();

/// Encode a struct into its full-fidelity form
pub(crate) fn encode(
    ctx: &MappingContext<'_>,
    scope: &FieldScope,
    value: &StructPropertyValue,
) -> MappingResult<Value> {
    let fields = encode_entries(ctx, scope, &value.fields)?;
    let mut obj = category_object(PropertyCategory::Struct);
    obj.insert(TYPE_KEY.to_string(), Value::String(value.type_name.clone()));
    obj.insert(FIELDS_KEY.to_string(), Value::Object(fields));
    Ok(Value::Object(obj))
}

/// Decode a struct from its full-fidelity form
pub(crate) fn decode(
    ctx: &MappingContext<'_>,
    scope: &FieldScope,
    obj: &Map<String, Value>,
) -> MappingResult<StructPropertyValue> {
    const OPERATION: &str = "decode_struct";
    let type_name = required_str(scope, obj, TYPE_KEY)?;
    let entries = required_object(scope, obj, FIELDS_KEY)?;
    let fields = decode_entries(ctx, scope, entries)?;

    let reported = ctx
        .options()
        .report_unmapped
        .then(|| ctx.registry().struct_def(type_name))
        .flatten();
    if let Some(def) = reported {
        for name in fields.keys().filter(|name| !def.declares(name)) {
            ctx.report(
                SOURCE,
                OPERATION,
                DiagnosticCode::UnmappedProperty,
                Some(scope.child(name).path()),
                Some(type_name),
            );
        }
    }

    Ok(StructPropertyValue {
        type_name: type_name.to_string(),
        fields,
    })
}
