//! Fixed, non-generated portion of a Cosmos EIP-712 schema.
//!
//! Generated message types are merged into a base table supplied by a
//! [`BaseTypes`] implementation. The base table must contain an envelope type
//! whose member list is extended with one `msg<i>` field per message.

use crate::schema::{Eip712Field, TypeTable};

/// Name of the transaction envelope type in [`CosmosBaseTypes`].
pub const TX_TYPE: &str = "Tx";
/// Name of the EIP-712 domain separator type.
pub const DOMAIN_TYPE: &str = "EIP712Domain";

/// Source of the fixed types a generated schema coexists with.
pub trait BaseTypes {
    /// Returns a fresh copy of the fixed type table.
    ///
    /// Called once per schema generation, so callers may extend the result freely.
    fn base_types(&self) -> TypeTable;

    /// Name of the type in [`BaseTypes::base_types`] that receives the `msg<i>` members.
    fn envelope_type(&self) -> &str;
}

/// Base types for legacy amino-JSON Cosmos transactions signed via EIP-712.
///
/// ```
/// use eip712_schema::{BaseTypes, CosmosBaseTypes};
///
/// let types = CosmosBaseTypes.base_types();
/// let names: Vec<&str> = types.keys().map(String::as_str).collect();
/// assert_eq!(names, vec!["EIP712Domain", "Tx", "Fee", "Coin"]);
/// assert_eq!(CosmosBaseTypes.envelope_type(), "Tx");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct CosmosBaseTypes;

impl BaseTypes for CosmosBaseTypes {
    fn base_types(&self) -> TypeTable {
        TypeTable::new()
            .with_struct(
                DOMAIN_TYPE,
                vec![
                    Eip712Field::new("name", "string"),
                    Eip712Field::new("version", "string"),
                    Eip712Field::new("chainId", "uint256"),
                    Eip712Field::new("verifyingContract", "string"),
                    Eip712Field::new("salt", "string"),
                ],
            )
            .with_struct(
                TX_TYPE,
                vec![
                    Eip712Field::new("account_number", "string"),
                    Eip712Field::new("chain_id", "string"),
                    Eip712Field::new("fee", "Fee"),
                    Eip712Field::new("memo", "string"),
                    Eip712Field::new("sequence", "string"),
                    Eip712Field::new("timeout_height", "string"),
                ],
            )
            .with_struct(
                "Fee",
                vec![
                    Eip712Field::new("amount", "Coin[]"),
                    Eip712Field::new("gas", "string"),
                ],
            )
            .with_struct(
                "Coin",
                vec![
                    Eip712Field::new("denom", "string"),
                    Eip712Field::new("amount", "string"),
                ],
            )
    }

    fn envelope_type(&self) -> &str {
        TX_TYPE
    }
}
