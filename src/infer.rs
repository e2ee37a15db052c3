//! Classification of JSON values into EIP-712 field types.
//!
//! Every JSON value lands in one of three shapes:
//!
//! | JSON | Shape | EIP-712 type |
//! |------|-------|--------------|
//! | string | [`ValueShape::Primitive`] | `string` |
//! | number | [`ValueShape::Primitive`] | `int64` |
//! | boolean | [`ValueShape::Primitive`] | `bool` |
//! | object | [`ValueShape::Object`] | generated struct |
//! | array | [`ValueShape::Array`] | element type of item 0, plus `[]` |
//!
//! Empty arrays have no element to inspect and are declared as `string[]`.
//! Only the first element of an array is inspected; the rest are assumed to
//! share its shape. `null` and arrays of arrays have no EIP-712 counterpart
//! and are rejected.

use serde_json::{Map, Value};

pub const ETH_STRING: &str = "string";
pub const ETH_BOOL: &str = "bool";
pub const ETH_INT64: &str = "int64";

/// Shape of a single JSON value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ValueShape<'a> {
    /// Resolves directly to an atomic EIP-712 type.
    Primitive(&'static str),
    /// Needs its own struct type.
    Object(&'a Map<String, Value>),
    /// Single-level array of the given element.
    Array(Element<'a>),
}

/// Element of an array value. Arrays never nest.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Element<'a> {
    Primitive(&'static str),
    Object(&'a Map<String, Value>),
}

impl<'a> From<Element<'a>> for ValueShape<'a> {
    fn from(element: Element<'a>) -> Self {
        match element {
            Element::Primitive(ty) => ValueShape::Primitive(ty),
            Element::Object(object) => ValueShape::Object(object),
        }
    }
}

/// Why a value has no EIP-712 representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ShapeError {
    #[error("null values have no EIP-712 type")]
    Null,
    #[error("multi-dimensional arrays are not supported")]
    NestedArray,
}

/// Classifies `value`.
pub fn infer(value: &Value) -> Result<ValueShape<'_>, ShapeError> {
    match value {
        Value::Array(items) => match items.first() {
            None => Ok(ValueShape::Array(Element::Primitive(ETH_STRING))),
            Some(first) => infer_element(first).map(ValueShape::Array),
        },
        other => infer_element(other).map(ValueShape::from),
    }
}

fn infer_element(value: &Value) -> Result<Element<'_>, ShapeError> {
    match value {
        Value::String(_) => Ok(Element::Primitive(ETH_STRING)),
        Value::Number(_) => Ok(Element::Primitive(ETH_INT64)),
        Value::Bool(_) => Ok(Element::Primitive(ETH_BOOL)),
        Value::Object(object) => Ok(Element::Object(object)),
        Value::Array(_) => Err(ShapeError::NestedArray),
        Value::Null => Err(ShapeError::Null),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn atomic(value: Value) -> Option<String> {
        match infer(&value).unwrap() {
            ValueShape::Primitive(ty) => Some(ty.to_owned()),
            ValueShape::Array(Element::Primitive(ty)) => Some(format!("{ty}[]")),
            ValueShape::Object(_) | ValueShape::Array(Element::Object(_)) => None,
        }
    }

    #[test]
    fn test_primitives() {
        assert_eq!(atomic(json!("")), Some("string".into()));
        assert_eq!(atomic(json!(0)), Some("int64".into()));
        assert_eq!(atomic(json!(-12)), Some("int64".into()));
        assert_eq!(atomic(json!(1.5)), Some("int64".into()));
        assert_eq!(atomic(json!(u64::MAX)), Some("int64".into()));
        assert_eq!(atomic(json!(false)), Some("bool".into()));
    }

    #[test]
    fn test_arrays() {
        assert_eq!(atomic(json!([])), Some("string[]".into()));
        assert_eq!(atomic(json!([0])), Some("int64[]".into()));
        assert_eq!(atomic(json!([true])), Some("bool[]".into()));
        assert_eq!(atomic(json!(["a"])), Some("string[]".into()));
    }

    #[test]
    fn test_array_uses_first_element_only() {
        assert_eq!(atomic(json!([1, "two", null])), Some("int64[]".into()));
    }

    #[test]
    fn test_objects() {
        let value = json!({ "denom": "aevmos" });
        assert!(matches!(infer(&value), Ok(ValueShape::Object(o)) if o.len() == 1));

        let value = json!([{ "denom": "aevmos" }, 3]);
        assert!(matches!(
            infer(&value),
            Ok(ValueShape::Array(Element::Object(o))) if o.contains_key("denom")
        ));
    }

    #[test]
    fn test_rejects_nested_arrays() {
        assert_eq!(infer(&json!([[0]])), Err(ShapeError::NestedArray));
        assert_eq!(infer(&json!([[]])), Err(ShapeError::NestedArray));
    }

    #[test]
    fn test_rejects_null() {
        assert_eq!(infer(&json!(null)), Err(ShapeError::Null));
        assert_eq!(infer(&json!([null])), Err(ShapeError::Null));
    }
}
