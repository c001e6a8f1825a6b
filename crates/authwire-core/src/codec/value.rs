//! Dynamic field values exchanged between messages and the interpreter.

use std::fmt;

use serde_json::Value as JsonValue;

use crate::codec::descriptor::DynMessage;
use crate::well_known::Timestamp;

/// Borrowed view of one field, produced by [`crate::codec::Message::field`].
pub enum FieldView<'a> {
    Bool(bool),
    Int32(i32),
    Int64(i64),
    Uint32(u32),
    Uint64(u64),
    Str(&'a str),
    Bytes(&'a [u8]),
    /// Enum as its wire number (`-1` for the `Unrecognized` sentinel).
    Enum(i32),
    Message(&'a dyn DynMessage),
    Timestamp(Timestamp),
    Struct(&'a serde_json::Map<String, JsonValue>),
    /// Elements of a repeated field, in order.
    List(Vec<FieldView<'a>>),
}

impl FieldView<'_> {
    /// Whether this view holds the field kind's default value.
    ///
    /// Message, timestamp, and struct fields always track presence
    /// explicitly, so a view of one is never "default".
    pub fn is_default(&self) -> bool {
        match self {
            FieldView::Bool(value) => !value,
            FieldView::Int32(value) => *value == 0,
            FieldView::Int64(value) => *value == 0,
            FieldView::Uint32(value) => *value == 0,
            FieldView::Uint64(value) => *value == 0,
            FieldView::Str(value) => value.is_empty(),
            FieldView::Bytes(value) => value.is_empty(),
            FieldView::Enum(value) => *value == 0,
            FieldView::List(items) => items.is_empty(),
            FieldView::Message(_) | FieldView::Timestamp(_) | FieldView::Struct(_) => false,
        }
    }

    /// Deep-copies this view into an owned value.
    ///
    /// Returns `None` for [`FieldView::List`]: repeated fields are copied
    /// element-wise by the caller, because owned values carry single
    /// elements only.
    pub fn to_owned_value(&self) -> Option<FieldValue> {
        Some(match self {
            FieldView::Bool(value) => FieldValue::Bool(*value),
            FieldView::Int32(value) => FieldValue::Int32(*value),
            FieldView::Int64(value) => FieldValue::Int64(*value),
            FieldView::Uint32(value) => FieldValue::Uint32(*value),
            FieldView::Uint64(value) => FieldValue::Uint64(*value),
            FieldView::Str(value) => FieldValue::String((*value).to_string()),
            FieldView::Bytes(value) => FieldValue::Bytes(value.to_vec()),
            FieldView::Enum(value) => FieldValue::Enum(*value),
            FieldView::Message(message) => FieldValue::Message(message.clone_boxed()),
            FieldView::Timestamp(value) => FieldValue::Timestamp(*value),
            FieldView::Struct(map) => FieldValue::Struct((*map).clone()),
            FieldView::List(_) => return None,
        })
    }
}

/// Owned value handed to [`crate::codec::Message::set_field`].
///
/// Repeated fields receive one `FieldValue` per element, in wire order.
pub enum FieldValue {
    Bool(bool),
    Int32(i32),
    Int64(i64),
    Uint32(u32),
    Uint64(u64),
    String(String),
    Bytes(Vec<u8>),
    Enum(i32),
    Message(Box<dyn DynMessage>),
    Timestamp(Timestamp),
    Struct(serde_json::Map<String, JsonValue>),
}

impl fmt::Debug for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Bool(value) => write!(f, "Bool({value})"),
            FieldValue::Int32(value) => write!(f, "Int32({value})"),
            FieldValue::Int64(value) => write!(f, "Int64({value})"),
            FieldValue::Uint32(value) => write!(f, "Uint32({value})"),
            FieldValue::Uint64(value) => write!(f, "Uint64({value})"),
            FieldValue::String(value) => write!(f, "String({value:?})"),
            FieldValue::Bytes(value) => write!(f, "Bytes({} bytes)", value.len()),
            FieldValue::Enum(value) => write!(f, "Enum({value})"),
            FieldValue::Message(message) => {
                write!(f, "Message({})", message.dyn_descriptor().name)
            }
            FieldValue::Timestamp(value) => write!(f, "Timestamp({value:?})"),
            FieldValue::Struct(map) => write!(f, "Struct({} keys)", map.len()),
        }
    }
}
