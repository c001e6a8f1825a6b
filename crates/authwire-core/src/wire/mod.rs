//! Low-level binary wire format: varints, tags, and length delimiters.
//!
//! Every encoded field starts with a *tag* — a varint packing the field
//! number and a wire type:
//!
//! ```text
//! tag = (field_number << 3) | wire_type
//! ```
//!
//! The wire type tells a decoder how to read (or skip) the payload that
//! follows, even when it has never heard of the field number.  That single
//! property is what makes the format forward compatible: an old decoder
//! skips fields added by a newer peer instead of failing.
//!
//! # What is a varint? (for beginners)
//!
//! A varint is a variable-length integer encoding.  Each byte contributes
//! 7 bits of payload, least-significant group first, and the high bit of
//! each byte says "another byte follows".  Small numbers — by far the most
//! common case in practice — take a single byte:
//!
//! ```text
//! 1      -> 0x01
//! 150    -> 0x96 0x01        (150 = 0b1_0010110)
//! u64MAX -> 10 bytes
//! ```
//!
//! Negative `int32`/`int64` values are sign-extended to 64 bits before
//! encoding, so they always occupy the full 10 bytes.

pub mod reader;
pub mod writer;

pub use reader::{Reader, Tag};
pub use writer::Writer;

/// Payload encoding declared by a tag.
///
/// Groups (`StartGroup`/`EndGroup`) are a legacy feature: this codec never
/// emits them, and treats an end-group marker as the end of the current
/// message on decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum WireType {
    /// Variable-length integer payload.
    Varint = 0,
    /// Fixed 8-byte little-endian payload (doubles).
    Fixed64 = 1,
    /// Varint length followed by that many payload bytes.
    LengthDelimited = 2,
    /// Legacy group start marker (never emitted).
    StartGroup = 3,
    /// Legacy group end marker (terminates the enclosing message on decode).
    EndGroup = 4,
    /// Fixed 4-byte little-endian payload.
    Fixed32 = 5,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DecodeError;

    #[test]
    fn test_varint_single_byte_values_round_trip() {
        for value in [0u64, 1, 42, 127] {
            let mut writer = Writer::new();
            writer.write_varint64(value);
            assert_eq!(writer.len(), 1, "{value} should fit in one byte");
            let mut reader = Reader::new(writer.as_slice());
            assert_eq!(reader.read_varint64(), Ok(value));
        }
    }

    #[test]
    fn test_varint_150_matches_reference_encoding() {
        let mut writer = Writer::new();
        writer.write_varint64(150);
        assert_eq!(writer.as_slice(), &[0x96, 0x01]);
    }

    #[test]
    fn test_varint_u64_max_round_trips_in_ten_bytes() {
        let mut writer = Writer::new();
        writer.write_varint64(u64::MAX);
        assert_eq!(writer.len(), 10);
        let mut reader = Reader::new(writer.as_slice());
        assert_eq!(reader.read_varint64(), Ok(u64::MAX));
    }

    #[test]
    fn test_negative_int32_is_sign_extended_to_ten_bytes() {
        let mut writer = Writer::new();
        writer.write_int32(-1);
        assert_eq!(writer.len(), 10);
        let mut reader = Reader::new(writer.as_slice());
        assert_eq!(reader.read_varint64(), Ok(u64::MAX));
    }

    #[test]
    fn test_truncated_varint_is_an_error() {
        // High bit set on the last byte says "more follows", but nothing does.
        let mut reader = Reader::new(&[0x96]);
        assert!(matches!(
            reader.read_varint64(),
            Err(DecodeError::Truncated { .. })
        ));
    }

    #[test]
    fn test_overlong_varint_is_an_error() {
        let bytes = [0xFF; 11];
        let mut reader = Reader::new(&bytes);
        assert_eq!(reader.read_varint64(), Err(DecodeError::VarintOverflow));
    }

    #[test]
    fn test_tag_packs_field_number_and_wire_type() {
        let mut writer = Writer::new();
        writer.write_tag(2, WireType::LengthDelimited);
        assert_eq!(writer.as_slice(), &[0x12]);

        let mut reader = Reader::new(writer.as_slice());
        let tag = reader.read_tag().expect("tag should decode");
        assert_eq!(tag.field_number, 2);
        assert_eq!(tag.wire_type, WireType::LengthDelimited as u8);
    }

    #[test]
    fn test_length_prefixed_string_round_trips() {
        let mut writer = Writer::new();
        writer.write_string("grüße");
        let mut reader = Reader::new(writer.as_slice());
        assert_eq!(reader.read_string(), Ok("grüße"));
    }

    #[test]
    fn test_length_delimiter_past_end_of_buffer_is_an_error() {
        // Declares 100 bytes of payload, provides 2.
        let mut reader = Reader::new(&[100, 0xAA, 0xBB]);
        assert!(matches!(
            reader.read_bytes(),
            Err(DecodeError::LengthOverrun {
                declared: 100,
                available: 2
            })
        ));
    }

    #[test]
    fn test_skip_consumes_each_wire_type() {
        let mut writer = Writer::new();
        writer.write_varint64(300);
        writer.write_double(1.5);
        writer.write_len_prefixed(b"abc");
        let mut reader = Reader::new(writer.as_slice());

        reader.skip(WireType::Varint as u8).expect("skip varint");
        reader.skip(WireType::Fixed64 as u8).expect("skip fixed64");
        reader
            .skip(WireType::LengthDelimited as u8)
            .expect("skip length-delimited");
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn test_skip_rejects_group_wire_types() {
        let mut reader = Reader::new(&[0x00]);
        assert_eq!(
            reader.skip(WireType::StartGroup as u8),
            Err(DecodeError::InvalidWireType(3))
        );
    }
}
