//! Generic encoder: walks a message's field table and writes the wire form.

use crate::codec::descriptor::{DynMessage, FieldDescriptor, Message, Presence};
use crate::codec::value::FieldView;
use crate::well_known::dynamic::encode_struct;
use crate::wire::{WireType, Writer};

/// Encodes a message into a fresh byte vector.
pub fn encode_message<M: Message>(message: &M) -> Vec<u8> {
    let mut writer = Writer::new();
    encode_message_to(message, &mut writer);
    writer.into_bytes()
}

/// Encodes a message into an existing writer.
pub fn encode_message_to<M: Message>(message: &M, writer: &mut Writer) {
    encode_fields(message, writer);
}

/// Walks the descriptor table in ascending field-number order, emitting a
/// tag/payload pair for every present (or non-default) field.
pub(crate) fn encode_fields(message: &dyn DynMessage, writer: &mut Writer) {
    for field in message.dyn_descriptor().fields {
        let Some(view) = message.dyn_field(field.number) else {
            continue;
        };
        match field.presence {
            // Implicit-presence scalars skip their default value; an empty
            // repeated field likewise emits nothing.
            Presence::Implicit | Presence::Repeated if view.is_default() => continue,
            Presence::Repeated => {
                encode_repeated(field, &view, writer);
                continue;
            }
            _ => {}
        }
        encode_single(field, &view, writer);
    }
}

fn encode_single(field: &FieldDescriptor, view: &FieldView<'_>, writer: &mut Writer) {
    match view {
        FieldView::Bool(value) => {
            writer.write_tag(field.number, WireType::Varint);
            writer.write_bool(*value);
        }
        FieldView::Int32(value) => {
            writer.write_tag(field.number, WireType::Varint);
            writer.write_int32(*value);
        }
        FieldView::Int64(value) => {
            writer.write_tag(field.number, WireType::Varint);
            writer.write_int64(*value);
        }
        FieldView::Uint32(value) => {
            writer.write_tag(field.number, WireType::Varint);
            writer.write_varint32(*value);
        }
        FieldView::Uint64(value) => {
            writer.write_tag(field.number, WireType::Varint);
            writer.write_varint64(*value);
        }
        FieldView::Enum(number) => {
            writer.write_tag(field.number, WireType::Varint);
            writer.write_int32(*number);
        }
        FieldView::Str(value) => {
            writer.write_tag(field.number, WireType::LengthDelimited);
            writer.write_string(value);
        }
        FieldView::Bytes(value) => {
            writer.write_tag(field.number, WireType::LengthDelimited);
            writer.write_len_prefixed(value);
        }
        FieldView::Message(nested) => {
            let mut sub = Writer::new();
            encode_fields(*nested, &mut sub);
            writer.write_tag(field.number, WireType::LengthDelimited);
            writer.write_len_prefixed(sub.as_slice());
        }
        FieldView::Timestamp(timestamp) => {
            let mut sub = Writer::new();
            timestamp.encode_to(&mut sub);
            writer.write_tag(field.number, WireType::LengthDelimited);
            writer.write_len_prefixed(sub.as_slice());
        }
        FieldView::Struct(map) => {
            let mut sub = Writer::new();
            encode_struct(map, &mut sub);
            writer.write_tag(field.number, WireType::LengthDelimited);
            writer.write_len_prefixed(sub.as_slice());
        }
        // Repeated fields are routed through encode_repeated and never
        // reach here.
        FieldView::List(_) => {}
    }
}

fn encode_repeated(field: &FieldDescriptor, view: &FieldView<'_>, writer: &mut Writer) {
    let FieldView::List(items) = view else {
        return;
    };
    if field.kind.wire_type() == WireType::Varint {
        // Varint-backed elements (enums, integers, bools) use the packed
        // form: one tag, then the concatenated varint run.
        let mut run = Writer::new();
        for item in items {
            match item {
                FieldView::Bool(value) => run.write_bool(*value),
                FieldView::Int32(value) => run.write_int32(*value),
                FieldView::Int64(value) => run.write_int64(*value),
                FieldView::Uint32(value) => run.write_varint32(*value),
                FieldView::Uint64(value) => run.write_varint64(*value),
                FieldView::Enum(number) => run.write_int32(*number),
                _ => {}
            }
        }
        writer.write_tag(field.number, WireType::LengthDelimited);
        writer.write_len_prefixed(run.as_slice());
        return;
    }
    // Length-delimited elements emit one tag/payload pair each.
    for item in items {
        encode_single(field, item, writer);
    }
}
