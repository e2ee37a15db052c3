//! Access to the messages of an amino-JSON transaction payload.
//!
//! Messages live at positional slots of the payload object:
//!
//! ```json
//! {
//!   "msg0": { "type": "cosmos-sdk/MsgSend", "value": { ... } },
//!   "msg1": { "type": "cosmos-sdk/MsgVote", "value": { ... } }
//! }
//! ```
//!
//! Sign docs carry their messages as a `msgs` array instead; [`flatten_payload`]
//! rewrites such a payload into the positional form.

use serde_json::{Map, Value};

/// Key of the message array in an unflattened sign doc.
pub const MSGS_FIELD: &str = "msgs";
/// Key of the message type label inside a message.
pub const MSG_TYPE_FIELD: &str = "type";
/// Key of the message body inside a message.
pub const MSG_VALUE_FIELD: &str = "value";

/// Errors raised when a payload or one of its messages is malformed.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PayloadError {
    #[error("payload is not a JSON object")]
    NotAnObject,
    #[error("payload is missing the `msgs` array")]
    MissingMessages,
    #[error("payload field `msgs` is not an array")]
    MessagesNotArray,
    #[error("payload already contains a message at `{0}`")]
    SlotOccupied(String),
    #[error("payload has no message at `{0}`")]
    MissingSlot(String),
    #[error("message at `{0}` is not a JSON object")]
    MessageNotAnObject(String),
    #[error("message at `{0}` has no non-empty string `type`")]
    InvalidMessageType(String),
    #[error("message at `{0}` has no object `value`")]
    InvalidMessageValue(String),
}

/// Payload key of the `index`-th message.
///
/// ```
/// use eip712_schema::payload::msg_field_for_index;
///
/// assert_eq!(msg_field_for_index(0), "msg0");
/// assert_eq!(msg_field_for_index(12), "msg12");
/// ```
pub fn msg_field_for_index(index: usize) -> String {
    format!("msg{index}")
}

/// Moves the `msgs` array of a sign doc into positional `msg<i>` slots.
///
/// Returns the number of messages moved. The payload is left untouched on error.
///
/// ```
/// use eip712_schema::payload::flatten_payload;
/// use serde_json::json;
///
/// let mut payload = json!({ "memo": "", "msgs": [{ "type": "a" }, { "type": "b" }] });
/// assert_eq!(flatten_payload(&mut payload).unwrap(), 2);
/// assert_eq!(payload, json!({ "memo": "", "msg0": { "type": "a" }, "msg1": { "type": "b" } }));
/// ```
pub fn flatten_payload(payload: &mut Value) -> Result<usize, PayloadError> {
    let object = payload.as_object_mut().ok_or(PayloadError::NotAnObject)?;
    let msgs = object
        .get(MSGS_FIELD)
        .ok_or(PayloadError::MissingMessages)?
        .as_array()
        .ok_or(PayloadError::MessagesNotArray)?;

    for index in 0..msgs.len() {
        let field = msg_field_for_index(index);
        if object.contains_key(&field) {
            return Err(PayloadError::SlotOccupied(field));
        }
    }

    let msgs = match object.remove(MSGS_FIELD) {
        Some(Value::Array(msgs)) => msgs,
        _ => return Err(PayloadError::MessagesNotArray),
    };
    let count = msgs.len();
    for (index, msg) in msgs.into_iter().enumerate() {
        object.insert(msg_field_for_index(index), msg);
    }
    Ok(count)
}

/// Number of consecutive message slots `msg0`, `msg1`, ... present in `payload`.
pub fn count_message_slots(payload: &Value) -> usize {
    (0..)
        .take_while(|index| payload.get(msg_field_for_index(*index)).is_some())
        .count()
}

/// A validated view over one message of a payload.
#[derive(Debug, Clone, Copy)]
pub struct Message<'a> {
    type_url: &'a str,
    value: &'a Map<String, Value>,
    object: &'a Map<String, Value>,
}

impl<'a> Message<'a> {
    /// Looks up and validates the message stored at `field` of `payload`.
    pub fn from_payload(payload: &'a Value, field: &str) -> Result<Self, PayloadError> {
        let raw = payload
            .get(field)
            .ok_or_else(|| PayloadError::MissingSlot(field.to_owned()))?;
        Self::parse(raw, field)
    }

    /// Validates `raw` as a message. `field` is only used for error reporting.
    pub fn parse(raw: &'a Value, field: &str) -> Result<Self, PayloadError> {
        let object = raw
            .as_object()
            .ok_or_else(|| PayloadError::MessageNotAnObject(field.to_owned()))?;
        let type_url = object
            .get(MSG_TYPE_FIELD)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| PayloadError::InvalidMessageType(field.to_owned()))?;
        let value = object
            .get(MSG_VALUE_FIELD)
            .and_then(Value::as_object)
            .ok_or_else(|| PayloadError::InvalidMessageValue(field.to_owned()))?;
        Ok(Self {
            type_url,
            value,
            object,
        })
    }

    /// The message type label, e.g. `cosmos-sdk/MsgSend`.
    pub fn type_url(&self) -> &'a str {
        self.type_url
    }

    /// Last `/`-separated segment of the type label, e.g. `MsgSend`.
    pub fn signature(&self) -> &'a str {
        self.type_url.rsplit('/').next().unwrap_or(self.type_url)
    }

    /// The message body.
    pub fn value(&self) -> &'a Map<String, Value> {
        self.value
    }

    /// The whole message object, including `type`, `value` and any extra keys.
    pub fn as_object(&self) -> &'a Map<String, Value> {
        self.object
    }
}
