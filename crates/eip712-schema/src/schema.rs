//! EIP-712 type schema structures.
//!
//! An EIP-712 `types` object maps struct type names to their ordered members:
//!
//! ```json
//! {
//!   "Coin": [
//!     { "name": "denom", "type": "string" },
//!     { "name": "amount", "type": "string" }
//!   ]
//! }
//! ```
//!
//! [`TypeTable`] keeps that mapping in insertion order, so a schema serializes
//! exactly in the order its types were declared or discovered.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Deref, DerefMut};

/// A single member of an EIP-712 struct type.
///
/// Serializes as `{"name": "...", "type": "..."}`.
///
/// # Example
///
/// ```
/// use eip712_schema::Eip712Field;
///
/// let field = Eip712Field::new("denom", "string");
/// let json = serde_json::to_string(&field).unwrap();
/// assert_eq!(json, r#"{"name":"denom","type":"string"}"#);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Eip712Field {
    /// Member name, unique within its struct.
    pub name: String,
    /// EIP-712 type of the member: an atomic type, a struct type name, or an array of either.
    #[serde(rename = "type")]
    pub r#type: String,
}

impl Eip712Field {
    pub fn new<N: Into<String>, T: Into<String>>(name: N, r#type: T) -> Self {
        Self {
            name: name.into(),
            r#type: r#type.into(),
        }
    }

    /// Type name with any trailing `[]` removed.
    ///
    /// ```
    /// use eip712_schema::Eip712Field;
    ///
    /// assert_eq!(Eip712Field::new("amount", "Coin[]").base_type(), "Coin");
    /// assert_eq!(Eip712Field::new("gas", "string").base_type(), "string");
    /// ```
    pub fn base_type(&self) -> &str {
        let mut ty = self.r#type.as_str();
        while let Some(inner) = ty.strip_suffix("[]") {
            ty = inner;
        }
        ty
    }
}

/// Renders the member the way EIP-712 `encodeType` does: `<type> <name>`.
impl fmt::Display for Eip712Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.r#type, self.name)
    }
}

/// Returns `true` for EIP-712 atomic and dynamic types that never name a struct.
///
/// Integer widths run from 8 to 256 in steps of 8; fixed-size byte arrays
/// from `bytes1` to `bytes32`.
///
/// ```
/// use eip712_schema::is_atomic_type;
///
/// assert!(is_atomic_type("string"));
/// assert!(is_atomic_type("uint256"));
/// assert!(is_atomic_type("bytes32"));
/// assert!(!is_atomic_type("uint7"));
/// assert!(!is_atomic_type("TypeMsgSend0"));
/// ```
pub fn is_atomic_type(ty: &str) -> bool {
    let width = |s: &str| -> Option<u16> {
        if s.is_empty() || !s.chars().all(|c| c.is_ascii_digit()) || s.starts_with('0') {
            return None;
        }
        s.parse().ok()
    };
    match ty {
        "string" | "bool" | "address" | "bytes" => true,
        _ => {
            if let Some(bits) = ty.strip_prefix("uint").or_else(|| ty.strip_prefix("int")) {
                width(bits).is_some_and(|bits| (8..=256).contains(&bits) && bits % 8 == 0)
            } else if let Some(len) = ty.strip_prefix("bytes") {
                width(len).is_some_and(|len| (1..=32).contains(&len))
            } else {
                false
            }
        }
    }
}

/// An insertion-ordered EIP-712 `types` object.
///
/// Dereferences to the underlying [`IndexMap`] for lookups and iteration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeTable(IndexMap<String, Vec<Eip712Field>>);

impl TypeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insertion of a struct type.
    pub fn with_struct<N: Into<String>>(mut self, name: N, fields: Vec<Eip712Field>) -> Self {
        self.0.insert(name.into(), fields);
        self
    }

    /// Members of the struct type `name`, if declared.
    pub fn fields(&self, name: &str) -> Option<&[Eip712Field]> {
        self.0.get(name).map(Vec::as_slice)
    }

    /// Field types that are neither atomic nor declared in this table.
    ///
    /// A well-formed schema returns an empty list.
    pub fn unresolved_references(&self) -> Vec<&str> {
        self.0
            .values()
            .flatten()
            .map(Eip712Field::base_type)
            .filter(|ty| !is_atomic_type(ty) && !self.0.contains_key(*ty))
            .collect()
    }

    pub fn into_inner(self) -> IndexMap<String, Vec<Eip712Field>> {
        self.0
    }
}

impl Deref for TypeTable {
    type Target = IndexMap<String, Vec<Eip712Field>>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for TypeTable {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl FromIterator<(String, Vec<Eip712Field>)> for TypeTable {
    fn from_iter<I: IntoIterator<Item = (String, Vec<Eip712Field>)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for TypeTable {
    type Item = (String, Vec<Eip712Field>);
    type IntoIter = indexmap::map::IntoIter<String, Vec<Eip712Field>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_serialize() {
        let field = Eip712Field::new("fee", "Fee");
        let serialized = serde_json::to_value(&field).unwrap();
        assert_eq!(serialized, serde_json::json!({"name": "fee", "type": "Fee"}));
    }

    #[test]
    fn test_field_deserialize() {
        let field: Eip712Field =
            serde_json::from_str(r#"{"type": "Coin[]", "name": "amount"}"#).unwrap();
        assert_eq!(field, Eip712Field::new("amount", "Coin[]"));
        assert_eq!(field.base_type(), "Coin");
        assert_eq!(field.to_string(), "Coin[] amount");
    }

    #[test]
    fn test_atomic_types() {
        for ty in [
            "string", "bool", "address", "bytes", "int8", "int64", "uint256", "bytes1", "bytes32",
        ] {
            assert!(is_atomic_type(ty), "{ty} should be atomic");
        }
        for ty in [
            "Fee", "TypeValue0", "bytesX", "uintX", "strings", "int", "uint", "uint7", "int264",
            "uint0", "uint08", "bytes0", "bytes33", "int+8",
        ] {
            assert!(!is_atomic_type(ty), "{ty} should not be atomic");
        }
    }

    #[test]
    fn test_table_preserves_insertion_order() {
        let table = TypeTable::new()
            .with_struct("Zeta", vec![Eip712Field::new("a", "string")])
            .with_struct("Alpha", vec![Eip712Field::new("b", "Zeta")]);
        let names: Vec<&str> = table.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["Zeta", "Alpha"]);

        let serialized = serde_json::to_string(&table).unwrap();
        assert!(serialized.find("Zeta").unwrap() < serialized.find("Alpha").unwrap());
    }

    #[test]
    fn test_unresolved_references() {
        let table = TypeTable::new()
            .with_struct("Fee", vec![Eip712Field::new("amount", "Coin[]")])
            .with_struct("Tx", vec![Eip712Field::new("fee", "Fee")]);
        assert_eq!(table.unresolved_references(), vec!["Coin"]);

        let table = table.with_struct("Coin", vec![Eip712Field::new("denom", "string")]);
        assert!(table.unresolved_references().is_empty());
    }

    #[test]
    fn test_invalid_widths_are_unresolved() {
        let table = TypeTable::new().with_struct(
            "Tx",
            vec![
                Eip712Field::new("gas", "uint7"),
                Eip712Field::new("hash", "bytes33"),
                Eip712Field::new("nonce", "uint64"),
            ],
        );
        assert_eq!(table.unresolved_references(), vec!["uint7", "bytes33"]);
    }
}
