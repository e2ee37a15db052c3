//! Schema generation for a whole payload.
//!
//! [`TypeGenerator`] walks the message slots `msg0..msg<n>` of a payload,
//! builds the struct types of every message into one [`TypeRegistry`], and
//! merges the result into the base types:
//!
//! - the envelope type gains one `msg<i>` member per message, typed with the
//!   message's root struct;
//! - the generated struct types follow the base types, in discovery order.
//!
//! # Example
//!
//! ```
//! use eip712_typegen::{TypesParams, create_types};
//! use serde_json::json;
//!
//! let payload = json!({
//!     "msg0": {
//!         "type": "cosmos-sdk/MsgSend",
//!         "value": { "to_address": "evmos1", "amount": { "denom": "aevmos", "amount": "1" } }
//!     }
//! });
//! let types = create_types(TypesParams { payload: &payload, num_messages: 1 }).unwrap();
//!
//! let tx = types.fields("Tx").unwrap();
//! assert_eq!(tx.last().unwrap().to_string(), "TypeMsgSend0 msg0");
//! assert!(types.contains_key("TypeValueAmount0"));
//! ```

use eip712_schema::payload::{Message, msg_field_for_index};
use eip712_schema::{BaseTypes, CosmosBaseTypes, Eip712Field, TypeTable};
use serde_json::Value;
use std::num::NonZeroUsize;
use tracing::instrument;

use crate::builder::MessageTypeBuilder;
use crate::error::TypegenError;
use crate::registry::{DEFAULT_MAX_DUPLICATES, TypeRegistry};

/// Input of a schema generation.
#[derive(Debug, Clone, Copy)]
pub struct TypesParams<'a> {
    /// Payload holding the messages at `msg0`, `msg1`, ...
    pub payload: &'a Value,
    /// Number of message slots to process.
    pub num_messages: usize,
}

/// Generates EIP-712 schemas against a fixed set of base types.
///
/// Each call to [`TypeGenerator::generate`] starts from a fresh registry and a
/// fresh copy of the base types, so one generator can serve any number of
/// independent payloads.
#[derive(Debug, Clone)]
pub struct TypeGenerator<B = CosmosBaseTypes> {
    base: B,
    max_duplicates: NonZeroUsize,
}

impl<B: BaseTypes> TypeGenerator<B> {
    pub fn new(base: B) -> Self {
        Self {
            base,
            max_duplicates: DEFAULT_MAX_DUPLICATES,
        }
    }

    /// Overrides the number of distinct definitions allowed per type name.
    pub fn with_max_duplicates(mut self, max_duplicates: NonZeroUsize) -> Self {
        self.max_duplicates = max_duplicates;
        self
    }

    /// Builds the complete `types` object for `params`.
    ///
    /// Generated names never replace a base type: a base name is reused when
    /// the definitions match and skipped otherwise.
    #[instrument(skip_all, err, fields(num_messages = params.num_messages))]
    pub fn generate(&self, params: TypesParams<'_>) -> Result<TypeTable, TypegenError> {
        let mut types = self.base.base_types();
        let mut registry =
            TypeRegistry::with_max_duplicates(self.max_duplicates).with_reserved(types.clone());
        let mut msg_fields = Vec::new();

        for index in 0..params.num_messages {
            let field = msg_field_for_index(index);
            let msg = Message::from_payload(params.payload, &field)?;
            let root = MessageTypeBuilder::new(&mut registry).build(&field, &msg)?;
            tracing::debug!(
                msg = %field,
                type_url = msg.type_url(),
                members = msg.value().len(),
                root = %root,
                "message typed"
            );
            msg_fields.push(Eip712Field::new(field, root));
        }

        let envelope = self.base.envelope_type();
        types
            .get_mut(envelope)
            .ok_or_else(|| TypegenError::MissingEnvelope(envelope.to_owned()))?
            .extend(msg_fields);

        let generated = registry.into_types();
        tracing::debug!(generated = generated.len(), "merging generated types");
        types.extend(generated);
        Ok(types)
    }
}

/// Builds the `types` object for `params` against [`CosmosBaseTypes`].
pub fn create_types(params: TypesParams<'_>) -> Result<TypeTable, TypegenError> {
    TypeGenerator::new(CosmosBaseTypes).generate(params)
}
