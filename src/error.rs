//! Error types for EIP-712 type generation.

use eip712_schema::payload::PayloadError;

use crate::infer::ShapeError;

/// Reasons a payload cannot be turned into an EIP-712 schema.
///
/// Generation is all-or-nothing: any of these aborts the whole call.
#[derive(Debug, thiserror::Error)]
pub enum TypegenError {
    /// A message slot is missing, not an object, or lacks a usable `type` or `value`.
    #[error("Malformed payload: {0}")]
    MalformedPayload(#[from] PayloadError),
    /// A value cannot be expressed as an EIP-712 type.
    #[error("Unsupported value at `{path}`: {source}")]
    UnsupportedShape {
        /// Dotted path of the offending value, starting with its message slot.
        path: String,
        source: ShapeError,
    },
    /// Too many structurally different definitions share one type name.
    #[error("Exceeded maximum of {max} duplicates for type definition {type_def}")]
    DuplicateCapacity { type_def: String, max: usize },
    /// The base types do not declare the envelope the messages are attached to.
    #[error("Base types do not declare envelope type {0}")]
    MissingEnvelope(String),
}
