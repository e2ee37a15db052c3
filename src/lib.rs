//! EIP-712 type generation for Cosmos transaction payloads.
//!
//! Legacy amino-JSON transactions can be signed by Ethereum wallets once their
//! messages are described as EIP-712 struct types. This crate infers those types
//! from the JSON shape of each message.
//!
//! # Overview
//!
//! For every message slot `msg<i>` of a payload:
//!
//! 1. Every JSON value is classified into a primitive, an array, or an object
//!    ([`infer`]).
//! 2. Objects become named struct types, built depth-first with members sorted
//!    by name ([`builder`]).
//! 3. Each struct is stored under `<base><index>`, sharing the name with an
//!    identical earlier definition or taking the next free index ([`registry`]).
//! 4. The message's root type is attached to the `Tx` envelope as `msg<i>`, and
//!    all generated types are merged into the base types ([`driver`]).
//!
//! Generation is deterministic: the same payload always yields the same schema,
//! byte for byte.
//!
//! # Modules
//!
//! - [`infer`]: Classification of JSON values into EIP-712 shapes.
//! - [`builder`]: Expansion of one message into named struct types.
//! - [`registry`]: Deduplicating store of generated struct types.
//! - [`driver`]: Schema generation for a whole payload.
//! - [`error`]: The [`TypegenError`] type.
//!
//! # Example
//!
//! ```
//! use eip712_typegen::{TypesParams, create_types};
//! use serde_json::json;
//!
//! let payload = json!({
//!     "msg0": { "type": "cosmos-sdk/MsgVote", "value": { "option": 1, "voter": "evmos1" } }
//! });
//! let types = create_types(TypesParams { payload: &payload, num_messages: 1 }).unwrap();
//!
//! let value = types.fields("TypeValue0").unwrap();
//! assert_eq!(value[0].to_string(), "int64 option");
//! assert_eq!(value[1].to_string(), "string voter");
//! ```

pub mod builder;
pub mod driver;
pub mod error;
pub mod infer;
pub mod registry;

pub use driver::{TypeGenerator, TypesParams, create_types};
pub use error::TypegenError;
pub use registry::{DEFAULT_MAX_DUPLICATES, MAX_DUPL_TYPEDEFS};

pub use eip712_schema as schema;
