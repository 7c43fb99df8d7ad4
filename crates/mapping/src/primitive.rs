//! Primitive property values
//!
//! Full-fidelity form keeps the declared kind next to the value, so the
//! kind is never guessed from the shape of the JSON:
//!
//! ```json
//! {"category":"primitive","kind":"long","value":42}
//! ```
//!
//! | Kind | JSON value | Comparison value |
//! |------|------------|------------------|
//! | boolean | bool | Bool |
//! | byte, short, int, long | integer | Int |
//! | char, string | string | String |
//! | float, double | number, or `"NaN"` / `"Infinity"` / `"-Infinity"` | Float (finite only) |
//! | biginteger | decimal string | Int if it fits, else String |
//! | bigdecimal | decimal string | Float |
//! | date | integer (epoch ms) | Int |
//! | bytes | base64 string | Bytes |
//!
//! A null primitive is written with `"value": null` and has no comparison
//! value. The empty string is an ordinary string and does have one.

use crate::dispatch::{category_object, required_field, CATEGORY_KEY};
use base64::Engine as _;
use metastore_core::{
    FieldScope, FieldValue, MappingError, MappingResult, PrimitiveKind, PrimitivePropertyValue,
    PrimitiveScalar, PropertyCategory,
};
use serde_json::{Map, Value};

/// Key of the declared kind
pub const KIND_KEY: &str = "kind";
/// Key of the scalar payload
pub const VALUE_KEY: &str = "value";

const NAN: &str = "NaN";
const POS_INFINITY: &str = "Infinity";
const NEG_INFINITY: &str = "-Infinity";

/// Encode a primitive into its full-fidelity form
pub(crate) fn encode(
    scope: &FieldScope,
    primitive: &PrimitivePropertyValue,
) -> MappingResult<Value> {
    let payload = match &primitive.value {
        None => Value::Null,
        Some(scalar) => {
            if scalar.kind() != primitive.kind {
                return Err(MappingError::type_mismatch(
                    scope.path(),
                    primitive.kind.id(),
                    scalar.kind().id(),
                ));
            }
            scalar_to_json(scope, scalar)?
        }
    };
    let mut obj = category_object(PropertyCategory::Primitive);
    obj.insert(KIND_KEY.to_string(), Value::String(primitive.kind.id().to_string()));
    obj.insert(VALUE_KEY.to_string(), payload);
    Ok(Value::Object(obj))
}

/// Decode a primitive from its full-fidelity form
pub(crate) fn decode(
    scope: &FieldScope,
    obj: &Map<String, Value>,
) -> MappingResult<PrimitivePropertyValue> {
    let kind = match obj.get(KIND_KEY) {
        Some(Value::String(id)) => PrimitiveKind::from_id(id).ok_or_else(|| {
            MappingError::type_mismatch(scope.path(), "primitive kind", id.as_str())
        })?,
        Some(other) => {
            return Err(MappingError::type_mismatch(
                scope.path(),
                "primitive kind",
                json_type(other),
            ))
        }
        None => {
            return Err(MappingError::type_mismatch(
                scope.path(),
                "primitive kind",
                "nothing",
            ))
        }
    };
    let value = match required_field(scope, obj, VALUE_KEY)? {
        Value::Null => None,
        json => Some(scalar_from_json(scope, kind, json)?),
    };
    Ok(PrimitivePropertyValue { kind, value })
}

/// Comparison projection of a primitive
///
/// `None` for a null primitive and for non-finite floats, which the store
/// cannot range-compare.
pub fn for_comparison(primitive: &PrimitivePropertyValue) -> Option<FieldValue> {
    let scalar = primitive.value.as_ref()?;
    if scalar.kind() != primitive.kind {
        return None;
    }
    match scalar {
        PrimitiveScalar::Boolean(b) => Some(FieldValue::Bool(*b)),
        PrimitiveScalar::Byte(i) => Some(FieldValue::Int(i64::from(*i))),
        PrimitiveScalar::Short(i) => Some(FieldValue::Int(i64::from(*i))),
        PrimitiveScalar::Int(i) => Some(FieldValue::Int(i64::from(*i))),
        PrimitiveScalar::Long(i) => Some(FieldValue::Int(*i)),
        PrimitiveScalar::Date(ms) => Some(FieldValue::Int(*ms)),
        PrimitiveScalar::Float(f) => finite(f64::from(*f)),
        PrimitiveScalar::Double(f) => finite(*f),
        PrimitiveScalar::BigInteger(text) => Some(
            text.parse::<i64>()
                .map(FieldValue::Int)
                .unwrap_or_else(|_| FieldValue::String(text.clone())),
        ),
        PrimitiveScalar::BigDecimal(text) => text.parse::<f64>().ok().and_then(finite),
        PrimitiveScalar::Char(c) => Some(FieldValue::String(c.to_string())),
        PrimitiveScalar::String(s) => Some(FieldValue::String(s.clone())),
        PrimitiveScalar::Bytes(b) => Some(FieldValue::Bytes(b.clone())),
    }
}

fn finite(f: f64) -> Option<FieldValue> {
    f.is_finite().then_some(FieldValue::Float(f))
}

fn scalar_to_json(scope: &FieldScope, scalar: &PrimitiveScalar) -> MappingResult<Value> {
    Ok(match scalar {
        PrimitiveScalar::Boolean(b) => Value::Bool(*b),
        PrimitiveScalar::Byte(i) => Value::from(*i),
        PrimitiveScalar::Short(i) => Value::from(*i),
        PrimitiveScalar::Int(i) => Value::from(*i),
        PrimitiveScalar::Long(i) => Value::from(*i),
        PrimitiveScalar::Date(ms) => Value::from(*ms),
        PrimitiveScalar::Float(f) => float_to_json(f64::from(*f)),
        PrimitiveScalar::Double(f) => float_to_json(*f),
        PrimitiveScalar::BigInteger(text) => {
            if !is_integer_text(text) {
                return Err(MappingError::type_mismatch(
                    scope.path(),
                    PrimitiveKind::BigInteger.id(),
                    format!("text '{}'", text),
                ));
            }
            Value::String(text.clone())
        }
        PrimitiveScalar::BigDecimal(text) => {
            if !is_decimal_text(text) {
                return Err(MappingError::type_mismatch(
                    scope.path(),
                    PrimitiveKind::BigDecimal.id(),
                    format!("text '{}'", text),
                ));
            }
            Value::String(text.clone())
        }
        PrimitiveScalar::Char(c) => Value::String(c.to_string()),
        PrimitiveScalar::String(s) => Value::String(s.clone()),
        PrimitiveScalar::Bytes(b) => {
            Value::String(base64::engine::general_purpose::STANDARD.encode(b))
        }
    })
}

fn scalar_from_json(
    scope: &FieldScope,
    kind: PrimitiveKind,
    json: &Value,
) -> MappingResult<PrimitiveScalar> {
    let mismatch = || MappingError::type_mismatch(scope.path(), kind.id(), json_type(json));
    let scalar = match kind {
        PrimitiveKind::Boolean => PrimitiveScalar::Boolean(json.as_bool().ok_or_else(mismatch)?),
        PrimitiveKind::Byte => PrimitiveScalar::Byte(integer(json).ok_or_else(mismatch)?),
        PrimitiveKind::Short => PrimitiveScalar::Short(integer(json).ok_or_else(mismatch)?),
        PrimitiveKind::Int => PrimitiveScalar::Int(integer(json).ok_or_else(mismatch)?),
        PrimitiveKind::Long => PrimitiveScalar::Long(json.as_i64().ok_or_else(mismatch)?),
        PrimitiveKind::Date => PrimitiveScalar::Date(json.as_i64().ok_or_else(mismatch)?),
        // f32 -> f64 is exact, so narrowing back recovers the original
        PrimitiveKind::Float => {
            PrimitiveScalar::Float(float_from_json(json).ok_or_else(mismatch)? as f32)
        }
        PrimitiveKind::Double => {
            PrimitiveScalar::Double(float_from_json(json).ok_or_else(mismatch)?)
        }
        PrimitiveKind::BigInteger => {
            let text = json.as_str().filter(|t| is_integer_text(t)).ok_or_else(mismatch)?;
            PrimitiveScalar::BigInteger(text.to_string())
        }
        PrimitiveKind::BigDecimal => {
            let text = json.as_str().filter(|t| is_decimal_text(t)).ok_or_else(mismatch)?;
            PrimitiveScalar::BigDecimal(text.to_string())
        }
        PrimitiveKind::Char => {
            let text = json.as_str().ok_or_else(mismatch)?;
            let mut chars = text.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => PrimitiveScalar::Char(c),
                _ => return Err(mismatch()),
            }
        }
        PrimitiveKind::String => {
            PrimitiveScalar::String(json.as_str().ok_or_else(mismatch)?.to_string())
        }
        PrimitiveKind::Bytes => {
            let text = json.as_str().ok_or_else(mismatch)?;
            let bytes = base64::engine::general_purpose::STANDARD
                .decode(text)
                .map_err(|_| mismatch())?;
            PrimitiveScalar::Bytes(bytes)
        }
    };
    Ok(scalar)
}

fn integer<T: TryFrom<i64>>(json: &Value) -> Option<T> {
    json.as_i64().and_then(|i| T::try_from(i).ok())
}

fn float_to_json(f: f64) -> Value {
    match serde_json::Number::from_f64(f) {
        Some(n) => Value::Number(n),
        None if f.is_nan() => Value::String(NAN.to_string()),
        None if f > 0.0 => Value::String(POS_INFINITY.to_string()),
        None => Value::String(NEG_INFINITY.to_string()),
    }
}

fn float_from_json(json: &Value) -> Option<f64> {
    match json {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => match s.as_str() {
            NAN => Some(f64::NAN),
            POS_INFINITY => Some(f64::INFINITY),
            NEG_INFINITY => Some(f64::NEG_INFINITY),
            _ => None,
        },
        _ => None,
    }
}

/// `-?[0-9]+`
fn is_integer_text(text: &str) -> bool {
    let digits = text.strip_prefix('-').unwrap_or(text);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// `-?[0-9]+(\.[0-9]+)?([eE][+-]?[0-9]+)?`
fn is_decimal_text(text: &str) -> bool {
    let unsigned = text.strip_prefix('-').unwrap_or(text);
    let (mantissa, exponent) = match unsigned.find(&['e', 'E'][..]) {
        Some(pos) => (&unsigned[..pos], Some(&unsigned[pos + 1..])),
        None => (unsigned, None),
    };
    let mantissa_ok = match mantissa.split_once('.') {
        Some((whole, frac)) => is_digits(whole) && is_digits(frac),
        None => is_digits(mantissa),
    };
    let exponent_ok = match exponent {
        Some(exp) => {
            let exp = exp.strip_prefix(&['+', '-'][..]).unwrap_or(exp);
            is_digits(exp)
        }
        None => true,
    };
    mantissa_ok && exponent_ok
}

fn is_digits(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}

pub(crate) fn json_type(json: &Value) -> &'static str {
    match json {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(obj) if obj.contains_key(CATEGORY_KEY) => "property value",
        Value::Object(_) => "object",
    }
}
