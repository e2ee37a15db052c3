//! Expansion of one message into named EIP-712 struct types.
//!
//! A message object becomes a struct type whose members are the message keys
//! sorted by name. Object-valued members recurse into their own struct types,
//! which are registered before the struct that references them.
//!
//! Type names are derived from where the struct sits in the message:
//!
//! | Location | Base name |
//! |----------|-----------|
//! | message (`type: "cosmos-sdk/MsgSend"`) | `TypeMsgSend` |
//! | `value` | `TypeValue` |
//! | `value.amount` | `TypeValueAmount` |
//! | `value.from_address` | `TypeValueFromAddress` |
//!
//! The [`TypeRegistry`] appends the dedup index to every base name.

use eip712_schema::Eip712Field;
use eip712_schema::payload::Message;
use serde_json::{Map, Value};

use crate::error::TypegenError;
use crate::infer::{Element, ValueShape, infer};
use crate::registry::TypeRegistry;

/// Prefix of every generated type name.
pub const TYPE_PREFIX: &str = "Type";

/// Builds the struct types of messages into a shared [`TypeRegistry`].
pub struct MessageTypeBuilder<'r> {
    registry: &'r mut TypeRegistry,
}

impl<'r> MessageTypeBuilder<'r> {
    pub fn new(registry: &'r mut TypeRegistry) -> Self {
        Self { registry }
    }

    /// Registers all struct types of `msg` and returns the name of its root type.
    ///
    /// `msg_field` is the payload slot the message was read from; it only
    /// appears in error messages.
    pub fn build(&mut self, msg_field: &str, msg: &Message<'_>) -> Result<String, TypegenError> {
        let root = root_type_name(msg.signature());
        let mut path = Vec::new();
        self.build_struct(&root, msg_field, &mut path, msg.as_object())
    }

    fn build_struct<'v>(
        &mut self,
        type_def: &str,
        msg_field: &str,
        path: &mut Vec<&'v str>,
        object: &'v Map<String, Value>,
    ) -> Result<String, TypegenError> {
        let mut entries: Vec<(&'v String, &'v Value)> = object.iter().collect();
        entries.sort_by(|(a, _), (b, _)| a.cmp(b));

        let mut fields = Vec::with_capacity(entries.len());
        for (name, value) in entries {
            path.push(name);
            let ty = self.field_type(msg_field, path, value);
            path.pop();
            fields.push(Eip712Field::new(name.as_str(), ty?));
        }

        let registration = self.registry.register(type_def, fields);
        match registration.type_name() {
            Some(name) => Ok(name.to_owned()),
            None => Err(TypegenError::DuplicateCapacity {
                type_def: type_def.to_owned(),
                max: self.registry.max_duplicates(),
            }),
        }
    }

    fn field_type<'v>(
        &mut self,
        msg_field: &str,
        path: &mut Vec<&'v str>,
        value: &'v Value,
    ) -> Result<String, TypegenError> {
        let shape = infer(value).map_err(|source| TypegenError::UnsupportedShape {
            path: display_path(msg_field, path),
            source,
        })?;
        match shape {
            ValueShape::Object(object) => {
                let type_def = nested_type_name(path);
                self.build_struct(&type_def, msg_field, path, object)
            }
            ValueShape::Array(Element::Object(object)) => {
                let type_def = nested_type_name(path);
                let name = self.build_struct(&type_def, msg_field, path, object)?;
                Ok(format!("{name}[]"))
            }
            ValueShape::Primitive(ty) => Ok(ty.to_owned()),
            ValueShape::Array(Element::Primitive(ty)) => Ok(format!("{ty}[]")),
        }
    }
}

/// Base name of a message's root type: `Type` plus the last segment of its type label.
///
/// ```
/// use eip712_typegen::builder::root_type_name;
///
/// assert_eq!(root_type_name("MsgSend"), "TypeMsgSend");
/// ```
pub fn root_type_name(signature: &str) -> String {
    format!("{TYPE_PREFIX}{signature}")
}

/// Base name of the struct type at `path` below the message root.
///
/// Each path segment is split on `_` and `.`, and every piece has its first
/// character upper-cased.
///
/// ```
/// use eip712_typegen::builder::nested_type_name;
///
/// assert_eq!(nested_type_name(&["value"]), "TypeValue");
/// assert_eq!(nested_type_name(&["value", "from_address"]), "TypeValueFromAddress");
/// ```
pub fn nested_type_name(path: &[&str]) -> String {
    let mut name = String::from(TYPE_PREFIX);
    for segment in path {
        for part in segment.split(['_', '.']) {
            let mut chars = part.chars();
            if let Some(first) = chars.next() {
                name.extend(first.to_uppercase());
                name.push_str(chars.as_str());
            }
        }
    }
    name
}

fn display_path(msg_field: &str, path: &[&str]) -> String {
    std::iter::once(msg_field)
        .chain(path.iter().copied())
        .collect::<Vec<_>>()
        .join(".")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infer::ShapeError;
    use serde_json::json;

    fn build(registry: &mut TypeRegistry, raw: &Value) -> Result<String, TypegenError> {
        let msg = Message::parse(raw, "msg0").unwrap();
        MessageTypeBuilder::new(registry).build("msg0", &msg)
    }

    #[test]
    fn test_nested_type_name_keeps_case_of_rest() {
        assert_eq!(
            nested_type_name(&["value", "validatorAddress"]),
            "TypeValueValidatorAddress"
        );
        assert_eq!(nested_type_name(&["value", "a__b"]), "TypeValueAB");
        assert_eq!(nested_type_name(&[]), "Type");
    }

    #[test]
    fn test_dotted_keys_are_split() {
        assert_eq!(
            nested_type_name(&["value", "ibc.client_state"]),
            "TypeValueIbcClientState"
        );

        let mut registry = TypeRegistry::new();
        let raw = json!({ "type": "MsgUpdate", "value": { "ibc.header": { "height": 1 } } });
        build(&mut registry, &raw).unwrap();
        assert_eq!(
            registry.types().fields("TypeValue0").unwrap(),
            &[Eip712Field::new("ibc.header", "TypeValueIbcHeader0")]
        );
    }

    #[test]
    fn test_builds_nested_types_children_first() {
        let mut registry = TypeRegistry::new();
        let raw = json!({
            "type": "cosmos-sdk/MsgSend",
            "value": {
                "to_address": "evmos1",
                "amount": { "denom": "aevmos", "amount": "1" }
            }
        });
        assert_eq!(build(&mut registry, &raw).unwrap(), "TypeMsgSend0");

        let names: Vec<&str> = registry.types().keys().map(String::as_str).collect();
        assert_eq!(names, vec!["TypeValueAmount0", "TypeValue0", "TypeMsgSend0"]);
        assert_eq!(
            registry.types().fields("TypeValue0").unwrap(),
            &[
                Eip712Field::new("amount", "TypeValueAmount0"),
                Eip712Field::new("to_address", "string"),
            ]
        );
        assert_eq!(
            registry.types().fields("TypeMsgSend0").unwrap(),
            &[
                Eip712Field::new("type", "string"),
                Eip712Field::new("value", "TypeValue0"),
            ]
        );
    }

    #[test]
    fn test_array_of_objects() {
        let mut registry = TypeRegistry::new();
        let raw = json!({
            "type": "cosmos-sdk/MsgMultiSend",
            "value": {
                "inputs": [{ "address": "evmos1", "coins": [{ "denom": "aevmos", "amount": "1" }] }]
            }
        });
        build(&mut registry, &raw).unwrap();

        let types = registry.types();
        assert_eq!(
            types.fields("TypeValue0").unwrap(),
            &[Eip712Field::new("inputs", "TypeValueInputs0[]")]
        );
        assert_eq!(
            types.fields("TypeValueInputs0").unwrap(),
            &[
                Eip712Field::new("address", "string"),
                Eip712Field::new("coins", "TypeValueInputsCoins0[]"),
            ]
        );
        assert!(types.contains_key("TypeValueInputsCoins0"));
    }

    #[test]
    fn test_empty_nested_object() {
        let mut registry = TypeRegistry::new();
        let raw = json!({ "type": "MsgEmpty", "value": { "inner": {} } });
        build(&mut registry, &raw).unwrap();
        assert!(registry.types().fields("TypeValueInner0").unwrap().is_empty());
    }

    #[test]
    fn test_extra_message_keys_are_typed() {
        let mut registry = TypeRegistry::new();
        let raw = json!({ "type": "MsgSend", "value": {}, "0": "" });
        build(&mut registry, &raw).unwrap();
        assert_eq!(
            registry.types().fields("TypeMsgSend0").unwrap(),
            &[
                Eip712Field::new("0", "string"),
                Eip712Field::new("type", "string"),
                Eip712Field::new("value", "TypeValue0"),
            ]
        );
    }

    #[test]
    fn test_unsupported_shape_reports_path() {
        let mut registry = TypeRegistry::new();
        let raw = json!({ "type": "MsgSend", "value": { "outer": { "grid": [[1]] } } });
        let err = build(&mut registry, &raw).unwrap_err();
        match err {
            TypegenError::UnsupportedShape { path, source } => {
                assert_eq!(path, "msg0.value.outer.grid");
                assert_eq!(source, ShapeError::NestedArray);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_null_member_is_rejected() {
        let mut registry = TypeRegistry::new();
        let raw = json!({ "type": "MsgSend", "value": { "memo": null } });
        assert!(matches!(
            build(&mut registry, &raw),
            Err(TypegenError::UnsupportedShape { source: ShapeError::Null, .. })
        ));
    }
}
