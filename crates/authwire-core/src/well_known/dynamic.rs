//! Wire codec for opaque struct payloads.
//!
//! Fields such as an identity provider's raw profile are arbitrary
//! key/value documents the protocol carries without interpreting.  In
//! memory they are `serde_json::Map` values — already the tagged dynamic
//! shape (null / bool / number / string / sequence / string-keyed map)
//! the JSON form needs — and on the wire they are encoded as the standard
//! `google.protobuf.Struct` message:
//!
//! ```text
//! Struct    { fields: map<string, Value> = 1 }
//! Value     { oneof kind:
//!               null_value   = 1 (varint)
//!               number_value = 2 (double)
//!               string_value = 3
//!               bool_value   = 4 (varint)
//!               struct_value = 5
//!               list_value   = 6 }
//! ListValue { values: repeated Value = 1 }
//! ```
//!
//! Decoding is lenient like the rest of the codec: unknown fields inside a
//! struct payload are skipped, never rejected.

use serde_json::{Map, Number, Value as JsonValue};

use crate::error::DecodeError;
use crate::wire::{Reader, WireType, Writer};

const STRUCT_FIELD_ENTRY: u32 = 1;
const ENTRY_FIELD_KEY: u32 = 1;
const ENTRY_FIELD_VALUE: u32 = 2;
const VALUE_FIELD_NULL: u32 = 1;
const VALUE_FIELD_NUMBER: u32 = 2;
const VALUE_FIELD_STRING: u32 = 3;
const VALUE_FIELD_BOOL: u32 = 4;
const VALUE_FIELD_STRUCT: u32 = 5;
const VALUE_FIELD_LIST: u32 = 6;
const LIST_FIELD_VALUE: u32 = 1;

// ── Encoding ──────────────────────────────────────────────────────────────────

/// Writes a key/value document as a `Struct` payload (without a tag or
/// length prefix; the caller wraps it).
pub(crate) fn encode_struct(map: &Map<String, JsonValue>, writer: &mut Writer) {
    for (key, value) in map {
        let mut entry = Writer::new();
        entry.write_tag(ENTRY_FIELD_KEY, WireType::LengthDelimited);
        entry.write_string(key);
        let mut encoded_value = Writer::new();
        encode_value(value, &mut encoded_value);
        entry.write_tag(ENTRY_FIELD_VALUE, WireType::LengthDelimited);
        entry.write_len_prefixed(encoded_value.as_slice());

        writer.write_tag(STRUCT_FIELD_ENTRY, WireType::LengthDelimited);
        writer.write_len_prefixed(entry.as_slice());
    }
}

fn encode_value(value: &JsonValue, writer: &mut Writer) {
    match value {
        JsonValue::Null => {
            writer.write_tag(VALUE_FIELD_NULL, WireType::Varint);
            writer.write_varint64(0);
        }
        JsonValue::Bool(flag) => {
            writer.write_tag(VALUE_FIELD_BOOL, WireType::Varint);
            writer.write_bool(*flag);
        }
        JsonValue::Number(number) => {
            writer.write_tag(VALUE_FIELD_NUMBER, WireType::Fixed64);
            writer.write_double(number.as_f64().unwrap_or(0.0));
        }
        JsonValue::String(text) => {
            writer.write_tag(VALUE_FIELD_STRING, WireType::LengthDelimited);
            writer.write_string(text);
        }
        JsonValue::Array(items) => {
            let mut list = Writer::new();
            for item in items {
                let mut encoded_item = Writer::new();
                encode_value(item, &mut encoded_item);
                list.write_tag(LIST_FIELD_VALUE, WireType::LengthDelimited);
                list.write_len_prefixed(encoded_item.as_slice());
            }
            writer.write_tag(VALUE_FIELD_LIST, WireType::LengthDelimited);
            writer.write_len_prefixed(list.as_slice());
        }
        JsonValue::Object(map) => {
            let mut nested = Writer::new();
            encode_struct(map, &mut nested);
            writer.write_tag(VALUE_FIELD_STRUCT, WireType::LengthDelimited);
            writer.write_len_prefixed(nested.as_slice());
        }
    }
}

// ── Decoding ──────────────────────────────────────────────────────────────────

/// Reads a `Struct` payload of `length` bytes.
pub(crate) fn decode_struct(
    reader: &mut Reader<'_>,
    length: usize,
) -> Result<Map<String, JsonValue>, DecodeError> {
    let end = reader.pos() + length;
    let mut map = Map::new();
    while reader.pos() < end {
        let tag = reader.read_tag()?;
        if tag.field_number == 0 || tag.wire_type == WireType::EndGroup as u8 {
            break;
        }
        match (tag.field_number, tag.wire_type) {
            (STRUCT_FIELD_ENTRY, 2) => {
                let entry_length = reader.read_length()?;
                let (key, value) = decode_entry(reader, entry_length)?;
                map.insert(key, value);
            }
            (_, wire_type) => reader.skip(wire_type)?,
        }
    }
    Ok(map)
}

fn decode_entry(
    reader: &mut Reader<'_>,
    length: usize,
) -> Result<(String, JsonValue), DecodeError> {
    let end = reader.pos() + length;
    let mut key = String::new();
    let mut value = JsonValue::Null;
    while reader.pos() < end {
        let tag = reader.read_tag()?;
        if tag.field_number == 0 || tag.wire_type == WireType::EndGroup as u8 {
            break;
        }
        match (tag.field_number, tag.wire_type) {
            (ENTRY_FIELD_KEY, 2) => key = reader.read_string()?.to_string(),
            (ENTRY_FIELD_VALUE, 2) => {
                let value_length = reader.read_length()?;
                value = decode_value(reader, value_length)?;
            }
            (_, wire_type) => reader.skip(wire_type)?,
        }
    }
    Ok((key, value))
}

fn decode_value(reader: &mut Reader<'_>, length: usize) -> Result<JsonValue, DecodeError> {
    let end = reader.pos() + length;
    let mut value = JsonValue::Null;
    while reader.pos() < end {
        let tag = reader.read_tag()?;
        if tag.field_number == 0 || tag.wire_type == WireType::EndGroup as u8 {
            break;
        }
        match (tag.field_number, tag.wire_type) {
            (VALUE_FIELD_NULL, 0) => {
                reader.read_varint64()?;
                value = JsonValue::Null;
            }
            (VALUE_FIELD_NUMBER, 1) => {
                // NaN and infinities have no JSON representation; they
                // collapse to null rather than failing the decode.
                value = Number::from_f64(reader.read_double()?)
                    .map(JsonValue::Number)
                    .unwrap_or(JsonValue::Null);
            }
            (VALUE_FIELD_STRING, 2) => value = JsonValue::String(reader.read_string()?.to_string()),
            (VALUE_FIELD_BOOL, 0) => value = JsonValue::Bool(reader.read_varint64()? != 0),
            (VALUE_FIELD_STRUCT, 2) => {
                let nested_length = reader.read_length()?;
                value = JsonValue::Object(decode_struct(reader, nested_length)?);
            }
            (VALUE_FIELD_LIST, 2) => {
                let list_length = reader.read_length()?;
                value = JsonValue::Array(decode_list(reader, list_length)?);
            }
            (_, wire_type) => reader.skip(wire_type)?,
        }
    }
    Ok(value)
}

fn decode_list(reader: &mut Reader<'_>, length: usize) -> Result<Vec<JsonValue>, DecodeError> {
    let end = reader.pos() + length;
    let mut items = Vec::new();
    while reader.pos() < end {
        let tag = reader.read_tag()?;
        if tag.field_number == 0 || tag.wire_type == WireType::EndGroup as u8 {
            break;
        }
        match (tag.field_number, tag.wire_type) {
            (LIST_FIELD_VALUE, 2) => {
                let item_length = reader.read_length()?;
                items.push(decode_value(reader, item_length)?);
            }
            (_, wire_type) => reader.skip(wire_type)?,
        }
    }
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn round_trip(map: Map<String, JsonValue>) -> Map<String, JsonValue> {
        let mut writer = Writer::new();
        encode_struct(&map, &mut writer);
        let bytes = writer.into_bytes();
        let mut reader = Reader::new(&bytes);
        decode_struct(&mut reader, bytes.len()).expect("decode failed")
    }

    fn as_map(value: JsonValue) -> Map<String, JsonValue> {
        match value {
            JsonValue::Object(map) => map,
            other => panic!("expected object, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_struct_round_trips() {
        assert!(round_trip(Map::new()).is_empty());
    }

    #[test]
    fn test_scalar_values_round_trip() {
        let map = as_map(json!({
            "name": "gitlab",
            "verified": true,
            "score": 2.5,
            "missing": null,
        }));
        assert_eq!(round_trip(map.clone()), map);
    }

    #[test]
    fn test_nested_structures_round_trip() {
        let map = as_map(json!({
            "profile": {
                "emails": ["primary@example.com", "backup@example.com"],
                "groups": [{"id": 1.0}, {"id": 2.0}],
            },
        }));
        assert_eq!(round_trip(map.clone()), map);
    }

    #[test]
    fn test_integer_numbers_survive_as_doubles() {
        // The wire form stores every number as a double; values that fit
        // losslessly come back numerically equal.
        let map = as_map(json!({ "count": 42.0 }));
        assert_eq!(round_trip(map.clone()), map);
    }

    #[test]
    fn test_unknown_fields_inside_struct_are_skipped() {
        let mut writer = Writer::new();
        encode_struct(&as_map(json!({"kept": "yes"})), &mut writer);
        // A field number no Struct revision defines, as a varint.
        writer.write_tag(9, WireType::Varint);
        writer.write_varint64(7);
        let bytes = writer.into_bytes();
        let mut reader = Reader::new(&bytes);
        let decoded = decode_struct(&mut reader, bytes.len()).expect("decode failed");
        assert_eq!(decoded, as_map(json!({"kept": "yes"})));
    }
}
