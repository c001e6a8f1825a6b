//! Generic JSON interchange: the textual twin of the binary wire form.
//!
//! Conventions, matching the service's public JSON surface:
//!
//! - keys are the camelCase names from the descriptor table;
//! - a key is emitted only when the field is present (optional fields) or
//!   non-default (singular fields);
//! - enums appear as their symbolic name (`"USER_STATE_ACTIVE"`), with
//!   `"UNRECOGNIZED"` for the sentinel;
//! - bytes are standard base64 strings;
//! - 64-bit integers are decimal strings, because JSON numbers lose
//!   precision past 2^53;
//! - timestamps are RFC 3339 strings;
//! - struct-typed fields pass through verbatim.
//!
//! Reading is forgiving in the same places the wire decoder is: unknown
//! keys are ignored, `null` means absent, unknown enum names or numbers
//! resolve to the `Unrecognized` sentinel, and scalar values are coerced
//! to string fields.  Only values that cannot be converted at all — a
//! non-numeric string in a numeric field, invalid base64 — are errors.

use serde_json::{Map, Value as JsonValue};

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

use crate::codec::descriptor::{DynMessage, FieldDescriptor, FieldKind, Message, Presence};
use crate::codec::value::{FieldValue, FieldView};
use crate::error::JsonError;
use crate::well_known::Timestamp;

/// Converts a message to its JSON object form.
///
/// # Errors
///
/// [`JsonError::TimestampOutOfRange`] if a timestamp field cannot be
/// formatted as RFC 3339; nothing else fails.
pub fn message_to_json<M: Message>(message: &M) -> Result<JsonValue, JsonError> {
    json_object(message)
}

/// Builds a message from its JSON object form.
///
/// # Errors
///
/// [`JsonError`] when a present key cannot be converted to the field's
/// semantic type.
pub fn message_from_json<M: Message>(value: &JsonValue) -> Result<M, JsonError> {
    let mut message = M::default();
    fill_from_json(&mut message, value)?;
    Ok(message)
}

// ── Writing ───────────────────────────────────────────────────────────────────

pub(crate) fn json_object(message: &dyn DynMessage) -> Result<JsonValue, JsonError> {
    let mut object = Map::new();
    for field in message.dyn_descriptor().fields {
        let Some(view) = message.dyn_field(field.number) else {
            continue;
        };
        match field.presence {
            Presence::Implicit | Presence::Repeated if view.is_default() => continue,
            _ => {}
        }
        object.insert(field.json_name.to_string(), view_to_json(field, &view)?);
    }
    Ok(JsonValue::Object(object))
}

fn view_to_json(field: &FieldDescriptor, view: &FieldView<'_>) -> Result<JsonValue, JsonError> {
    Ok(match view {
        FieldView::Bool(value) => JsonValue::Bool(*value),
        FieldView::Int32(value) => JsonValue::Number((*value).into()),
        FieldView::Uint32(value) => JsonValue::Number((*value).into()),
        FieldView::Int64(value) => JsonValue::String(value.to_string()),
        FieldView::Uint64(value) => JsonValue::String(value.to_string()),
        FieldView::Str(value) => JsonValue::String((*value).to_string()),
        FieldView::Bytes(value) => JsonValue::String(BASE64.encode(value)),
        FieldView::Enum(number) => JsonValue::String(enum_name(field, *number).to_string()),
        FieldView::Message(nested) => json_object(*nested)?,
        FieldView::Timestamp(timestamp) => JsonValue::String(timestamp.to_rfc3339().ok_or(
            JsonError::TimestampOutOfRange {
                field: field.json_name,
            },
        )?),
        FieldView::Struct(map) => JsonValue::Object((*map).clone()),
        FieldView::List(items) => JsonValue::Array(
            items
                .iter()
                .map(|item| view_to_json(field, item))
                .collect::<Result<_, _>>()?,
        ),
    })
}

fn enum_name(field: &FieldDescriptor, number: i32) -> &'static str {
    match &field.kind {
        FieldKind::Enum(descriptor) => descriptor.name_of(number).unwrap_or("UNRECOGNIZED"),
        _ => "UNRECOGNIZED",
    }
}

// ── Reading ───────────────────────────────────────────────────────────────────

pub(crate) fn fill_from_json(
    message: &mut dyn DynMessage,
    value: &JsonValue,
) -> Result<(), JsonError> {
    let descriptor = message.dyn_descriptor();
    let Some(object) = value.as_object() else {
        return Err(JsonError::ExpectedObject {
            message: descriptor.name,
        });
    };
    for field in descriptor.fields {
        let Some(raw) = object.get(field.json_name) else {
            continue;
        };
        if raw.is_null() {
            continue;
        }
        if field.presence == Presence::Repeated {
            let Some(items) = raw.as_array() else {
                return Err(JsonError::ExpectedArray {
                    field: field.json_name,
                });
            };
            for item in items {
                if let Some(converted) = json_to_value(field, item)? {
                    message.dyn_set_field(field.number, converted)?;
                }
            }
            continue;
        }
        if let Some(converted) = json_to_value(field, raw)? {
            message.dyn_set_field(field.number, converted)?;
        }
    }
    Ok(())
}

/// Converts one JSON value to the field's semantic type.
///
/// Returns `Ok(None)` when the value should be treated as absent (only
/// struct fields do this, for non-object values).
fn json_to_value(
    field: &FieldDescriptor,
    raw: &JsonValue,
) -> Result<Option<FieldValue>, JsonError> {
    let converted = match &field.kind {
        FieldKind::Bool => match raw {
            JsonValue::Bool(value) => FieldValue::Bool(*value),
            _ => {
                return Err(JsonError::WrongType {
                    field: field.json_name,
                    expected: "boolean",
                })
            }
        },
        FieldKind::String => match raw {
            JsonValue::String(value) => FieldValue::String(value.clone()),
            // Scalars coerce to their text rendering.
            JsonValue::Number(value) => FieldValue::String(value.to_string()),
            JsonValue::Bool(value) => FieldValue::String(value.to_string()),
            _ => {
                return Err(JsonError::WrongType {
                    field: field.json_name,
                    expected: "string",
                })
            }
        },
        FieldKind::Int32 => FieldValue::Int32(parse_number::<i64>(field, raw)?.try_into().map_err(
            |_| JsonError::InvalidNumber {
                field: field.json_name,
            },
        )?),
        FieldKind::Uint32 => FieldValue::Uint32(
            parse_number::<u64>(field, raw)?
                .try_into()
                .map_err(|_| JsonError::InvalidNumber {
                    field: field.json_name,
                })?,
        ),
        FieldKind::Int64 => FieldValue::Int64(parse_number::<i64>(field, raw)?),
        FieldKind::Uint64 => FieldValue::Uint64(parse_number::<u64>(field, raw)?),
        FieldKind::Bytes => match raw {
            JsonValue::String(encoded) => FieldValue::Bytes(BASE64.decode(encoded).map_err(
                |source| JsonError::InvalidBase64 {
                    field: field.json_name,
                    source,
                },
            )?),
            _ => {
                return Err(JsonError::WrongType {
                    field: field.json_name,
                    expected: "base64 string",
                })
            }
        },
        FieldKind::Enum(descriptor) => {
            // Symbolic name or number; anything unknown is the sentinel.
            let number = match raw {
                JsonValue::String(name) => descriptor.number_of(name).unwrap_or(-1),
                JsonValue::Number(value) => {
                    value.as_i64().map(|wide| wide as i32).unwrap_or(-1)
                }
                _ => -1,
            };
            FieldValue::Enum(number)
        }
        FieldKind::Message(descriptor) => {
            let mut nested = (descriptor.new_instance)();
            fill_from_json(&mut *nested, raw)?;
            FieldValue::Message(nested)
        }
        FieldKind::Timestamp => match raw {
            JsonValue::String(text) => FieldValue::Timestamp(
                Timestamp::from_rfc3339(text).ok_or(JsonError::InvalidTimestamp {
                    field: field.json_name,
                })?,
            ),
            _ => {
                return Err(JsonError::WrongType {
                    field: field.json_name,
                    expected: "RFC 3339 string",
                })
            }
        },
        FieldKind::Struct => match raw.as_object() {
            Some(map) => FieldValue::Struct(map.clone()),
            // Opaque payloads only exist as objects; anything else is
            // treated as absent rather than rejected.
            None => return Ok(None),
        },
    };
    Ok(Some(converted))
}

fn parse_number<N>(field: &FieldDescriptor, raw: &JsonValue) -> Result<N, JsonError>
where
    N: TryFrom<i64> + TryFrom<u64> + std::str::FromStr,
{
    let error = || JsonError::InvalidNumber {
        field: field.json_name,
    };
    match raw {
        JsonValue::Number(value) => {
            if let Some(signed) = value.as_i64() {
                return N::try_from(signed).map_err(|_| error());
            }
            if let Some(unsigned) = value.as_u64() {
                return N::try_from(unsigned).map_err(|_| error());
            }
            Err(error())
        }
        // 64-bit values travel as decimal strings.
        JsonValue::String(text) => text.parse::<N>().map_err(|_| error()),
        _ => Err(JsonError::WrongType {
            field: field.json_name,
            expected: "number or decimal string",
        }),
    }
}
