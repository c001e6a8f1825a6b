//! Point-in-time values (`seconds` since the Unix epoch plus `nanos`).

use chrono::{DateTime, SecondsFormat, TimeZone, Utc};

use crate::error::DecodeError;
use crate::wire::{Reader, WireType, Writer};

const FIELD_SECONDS: u32 = 1;
const FIELD_NANOS: u32 = 2;

/// A point in time, independent of time zone or calendar.
///
/// On the wire this is a two-field nested message; in the JSON form it is
/// an RFC 3339 string in UTC (`"2024-05-01T12:00:00Z"`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Timestamp {
    /// Seconds since `1970-01-01T00:00:00Z`.
    pub seconds: i64,
    /// Non-negative sub-second offset in nanoseconds.
    pub nanos: i32,
}

impl Timestamp {
    pub fn new(seconds: i64, nanos: i32) -> Self {
        Self { seconds, nanos }
    }

    /// Writes the two fields into `writer`, skipping zero values.
    pub(crate) fn encode_to(&self, writer: &mut Writer) {
        if self.seconds != 0 {
            writer.write_tag(FIELD_SECONDS, WireType::Varint);
            writer.write_int64(self.seconds);
        }
        if self.nanos != 0 {
            writer.write_tag(FIELD_NANOS, WireType::Varint);
            writer.write_int32(self.nanos);
        }
    }

    /// Decodes a timestamp from the next `length` bytes of `reader`.
    ///
    /// Unknown fields inside the payload are skipped, mirroring the
    /// lenient decode policy of the surrounding codec.
    pub(crate) fn decode_from(reader: &mut Reader<'_>, length: usize) -> Result<Self, DecodeError> {
        let end = reader.pos() + length;
        let mut timestamp = Timestamp::default();
        while reader.pos() < end {
            let tag = reader.read_tag()?;
            if tag.field_number == 0 || tag.wire_type == WireType::EndGroup as u8 {
                break;
            }
            match (tag.field_number, tag.wire_type) {
                (FIELD_SECONDS, 0) => timestamp.seconds = reader.read_varint64()? as i64,
                (FIELD_NANOS, 0) => timestamp.nanos = reader.read_varint64()? as i32,
                (_, wire_type) => reader.skip(wire_type)?,
            }
        }
        Ok(timestamp)
    }

    /// Formats this timestamp as an RFC 3339 string in UTC.
    ///
    /// Returns `None` when the value falls outside the formattable range
    /// (roughly ±262,000 years) or `nanos` is out of `0..1_000_000_000`.
    pub fn to_rfc3339(&self) -> Option<String> {
        let nanos = u32::try_from(self.nanos).ok()?;
        let datetime = Utc.timestamp_opt(self.seconds, nanos).single()?;
        Some(datetime.to_rfc3339_opts(SecondsFormat::AutoSi, true))
    }

    /// Parses an RFC 3339 string, normalizing any offset to UTC.
    pub fn from_rfc3339(value: &str) -> Option<Self> {
        let datetime = DateTime::parse_from_rfc3339(value).ok()?;
        let utc = datetime.with_timezone(&Utc);
        Some(Self {
            seconds: utc.timestamp(),
            nanos: utc.timestamp_subsec_nanos() as i32,
        })
    }
}
