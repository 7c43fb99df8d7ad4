//! Comparison projection
//!
//! Derives the part of a property value the store can index: a scalar for
//! primitives and enums, a sequence for arrays. Maps and structs have no
//! projection of their own; their entries are projected under nested
//! scopes instead:
//!
//! ```text
//! ns/tags.value            ["a", "b"]          array of strings
//! ns/home/city.value       "Lyon"              struct field
//! ns/owners/0/name.value   "sam"               map inside an array element
//! ```
//!
//! Nothing comparable means no field at all, never an empty placeholder.

use crate::{array, enumeration, primitive};
use metastore_core::{FieldScope, FieldValue, PropertyValue};

/// A value's own comparison projection
pub fn for_comparison(value: &PropertyValue) -> Option<FieldValue> {
    match value {
        PropertyValue::Primitive(p) => primitive::for_comparison(p),
        PropertyValue::Array(a) => array::for_comparison(a),
        PropertyValue::Enum(e) => enumeration::for_comparison(e),
        PropertyValue::Map(_) | PropertyValue::Struct(_) => None,
    }
}

/// Every comparison field of a value rooted at `scope`, in emission order
pub fn comparison_fields(scope: &FieldScope, value: &PropertyValue) -> Vec<(String, FieldValue)> {
    let mut fields = Vec::new();
    collect(scope, value, &mut fields);
    fields
}

fn collect(scope: &FieldScope, value: &PropertyValue, out: &mut Vec<(String, FieldValue)>) {
    if let Some(projected) = for_comparison(value) {
        out.push((scope.value_key(), projected));
    }
    collect_nested(scope, value, out);
}

fn collect_nested(scope: &FieldScope, value: &PropertyValue, out: &mut Vec<(String, FieldValue)>) {
    match value {
        // element projections already live in the array's sequence
        PropertyValue::Array(a) => {
            for (index, element) in a.values.iter().enumerate() {
                collect_nested(&scope.element(index), element, out);
            }
        }
        PropertyValue::Map(m) => {
            for (name, entry) in &m.values {
                collect(&scope.child(name), entry, out);
            }
        }
        PropertyValue::Struct(s) => {
            for (name, field) in &s.fields {
                collect(&scope.child(name), field, out);
            }
        }
        PropertyValue::Primitive(_) | PropertyValue::Enum(_) => {}
    }
}
