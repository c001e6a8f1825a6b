//! Generic decoder: reads tags and applies values through the field table.
//!
//! The decode loop is deliberately lenient.  A tag is only *applied* when
//! the field number is in the descriptor table **and** the wire type agrees
//! with what that field expects; everything else is skipped with generic
//! wire-type skipping.  This is how a decoder built against one revision of
//! the schema keeps working against buffers produced by a newer one.  Only
//! structural damage — truncated varints, length delimiters past the end of
//! the buffer, unskippable wire types — fails the decode.

use tracing::trace;

use crate::codec::descriptor::{DynMessage, FieldDescriptor, FieldKind, Message, Presence};
use crate::codec::value::FieldValue;
use crate::error::DecodeError;
use crate::well_known::dynamic::decode_struct;
use crate::well_known::Timestamp;
use crate::wire::{Reader, WireType};

/// Decodes a message from a byte slice.
///
/// # Errors
///
/// [`DecodeError`] when the buffer is structurally malformed.
pub fn decode_message<M: Message>(bytes: &[u8]) -> Result<M, DecodeError> {
    let mut reader = Reader::new(bytes);
    decode_message_from(&mut reader, None)
}

/// Decodes a message from a reader, bounded by `length` bytes when given.
///
/// # Errors
///
/// [`DecodeError`] when the buffer is structurally malformed or `length`
/// exceeds the bytes remaining.
pub fn decode_message_from<M: Message>(
    reader: &mut Reader<'_>,
    length: Option<usize>,
) -> Result<M, DecodeError> {
    let mut message = M::default();
    decode_fields(&mut message, reader, length)?;
    Ok(message)
}

pub(crate) fn decode_fields(
    message: &mut dyn DynMessage,
    reader: &mut Reader<'_>,
    length: Option<usize>,
) -> Result<(), DecodeError> {
    let end = match length {
        Some(length) => {
            if length > reader.remaining() {
                return Err(DecodeError::LengthOverrun {
                    declared: length,
                    available: reader.remaining(),
                });
            }
            reader.pos() + length
        }
        None => reader.len(),
    };

    let descriptor = message.dyn_descriptor();
    while reader.pos() < end {
        let tag = reader.read_tag()?;
        if tag.field_number == 0 || tag.wire_type == WireType::EndGroup as u8 {
            break;
        }
        match descriptor.field(tag.field_number) {
            Some(field) if wire_type_matches(field, tag.wire_type) => {
                apply_field(message, field, tag.wire_type, reader)?;
            }
            _ => {
                trace!(
                    message = descriptor.name,
                    field = tag.field_number,
                    wire_type = tag.wire_type,
                    "skipping unknown or mismatched field"
                );
                reader.skip(tag.wire_type)?;
            }
        }
    }
    Ok(())
}

/// A field accepts its own wire type; repeated varint-backed fields also
/// accept a length-delimited packed run.
fn wire_type_matches(field: &FieldDescriptor, wire_type: u8) -> bool {
    let expected = field.kind.wire_type();
    wire_type == expected as u8
        || (field.presence == Presence::Repeated
            && expected == WireType::Varint
            && wire_type == WireType::LengthDelimited as u8)
}

fn apply_field(
    message: &mut dyn DynMessage,
    field: &FieldDescriptor,
    wire_type: u8,
    reader: &mut Reader<'_>,
) -> Result<(), DecodeError> {
    let packed_run = field.presence == Presence::Repeated
        && field.kind.wire_type() == WireType::Varint
        && wire_type == WireType::LengthDelimited as u8;
    if packed_run {
        let length = reader.read_length()?;
        let end = reader.pos() + length;
        while reader.pos() < end {
            let value = read_varint_value(field, reader)?;
            message.dyn_set_field(field.number, value)?;
        }
        return Ok(());
    }
    let value = read_value(field, reader)?;
    message.dyn_set_field(field.number, value)
}

fn read_value(
    field: &FieldDescriptor,
    reader: &mut Reader<'_>,
) -> Result<FieldValue, DecodeError> {
    match &field.kind {
        FieldKind::Bool
        | FieldKind::Int32
        | FieldKind::Int64
        | FieldKind::Uint32
        | FieldKind::Uint64
        | FieldKind::Enum(_) => read_varint_value(field, reader),
        FieldKind::String => Ok(FieldValue::String(reader.read_string()?.to_string())),
        FieldKind::Bytes => Ok(FieldValue::Bytes(reader.read_bytes()?.to_vec())),
        FieldKind::Message(descriptor) => {
            let length = reader.read_length()?;
            let mut nested = (descriptor.new_instance)();
            decode_fields(&mut *nested, reader, Some(length))?;
            Ok(FieldValue::Message(nested))
        }
        FieldKind::Timestamp => {
            let length = reader.read_length()?;
            Ok(FieldValue::Timestamp(Timestamp::decode_from(
                reader, length,
            )?))
        }
        FieldKind::Struct => {
            let length = reader.read_length()?;
            Ok(FieldValue::Struct(decode_struct(reader, length)?))
        }
    }
}

fn read_varint_value(
    field: &FieldDescriptor,
    reader: &mut Reader<'_>,
) -> Result<FieldValue, DecodeError> {
    let raw = reader.read_varint64()?;
    match &field.kind {
        FieldKind::Bool => Ok(FieldValue::Bool(raw != 0)),
        FieldKind::Int32 => Ok(FieldValue::Int32(raw as i32)),
        FieldKind::Int64 => Ok(FieldValue::Int64(raw as i64)),
        FieldKind::Uint32 => Ok(FieldValue::Uint32(raw as u32)),
        FieldKind::Uint64 => Ok(FieldValue::Uint64(raw)),
        FieldKind::Enum(_) => Ok(FieldValue::Enum(raw as i32)),
        // Length-delimited kinds never take the varint path; reaching this
        // arm means a descriptor declared an impossible combination.
        _ => Err(DecodeError::UnexpectedValue {
            message: "<varint>",
            field: field.number,
        }),
    }
}
