//! Error types shared by the wire layer and the codec.

use thiserror::Error;

/// Errors raised when a binary buffer is structurally malformed.
///
/// Decoding fails *only* on structural problems: a varint that never
/// terminates, a length delimiter that points past the end of the buffer, or
/// a wire type that cannot be skipped.  A field whose wire type disagrees
/// with the schema is skipped instead of rejected, so schema evolution on
/// one side of the wire never breaks the other.
#[derive(Debug, Error, PartialEq)]
pub enum DecodeError {
    /// The buffer ended before the value it was supposed to contain.
    #[error("insufficient data: need at least {needed} bytes, got {available}")]
    Truncated { needed: usize, available: usize },

    /// A varint ran for more than 10 bytes without terminating.
    #[error("varint does not terminate within 10 bytes")]
    VarintOverflow,

    /// A length delimiter declared more bytes than remain in the buffer.
    #[error("length delimiter of {declared} bytes exceeds the {available} bytes remaining")]
    LengthOverrun { declared: usize, available: usize },

    /// The wire type has no defined skip rule (groups are not supported).
    #[error("wire type {0} cannot be skipped")]
    InvalidWireType(u8),

    /// A length-delimited string field held bytes that are not UTF-8.
    #[error("length-delimited field is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),

    /// A field accessor received a value of a kind it does not store.
    ///
    /// This indicates a mismatch between a message's descriptor table and
    /// its accessors, not malformed input.
    #[error("field {field} of {message} received a value of the wrong kind")]
    UnexpectedValue { message: &'static str, field: u32 },

    /// A boxed message could not be downcast to the expected concrete type.
    #[error("expected a {expected} message")]
    WrongMessageType { expected: &'static str },
}

/// Errors raised when converting between messages and their JSON form.
///
/// Unknown JSON keys are ignored and unknown enum names resolve to the
/// `Unrecognized` sentinel; only values that cannot be converted to the
/// target field's semantic type are reported here.
#[derive(Debug, Error, PartialEq)]
pub enum JsonError {
    /// The JSON value for a message position was not an object.
    #[error("expected a JSON object for {message}")]
    ExpectedObject { message: &'static str },

    /// The JSON value for a repeated field was not an array.
    #[error("expected a JSON array for repeated field {field}")]
    ExpectedArray { field: &'static str },

    /// The JSON value has a type the field cannot be converted from.
    #[error("field {field} has the wrong JSON type (expected {expected})")]
    WrongType {
        field: &'static str,
        expected: &'static str,
    },

    /// A numeric field held a value that does not parse or does not fit.
    #[error("field {field} is not a valid number")]
    InvalidNumber { field: &'static str },

    /// A bytes field held a string that is not valid base64.
    #[error("field {field} is not valid base64: {source}")]
    InvalidBase64 {
        field: &'static str,
        source: base64::DecodeError,
    },

    /// A timestamp field held a string that is not RFC 3339.
    #[error("field {field} is not a valid RFC 3339 timestamp")]
    InvalidTimestamp { field: &'static str },

    /// A timestamp field holds a value outside the formattable range.
    #[error("field {field} holds a timestamp outside the representable range")]
    TimestampOutOfRange { field: &'static str },

    /// An accessor rejected a converted value (descriptor/accessor mismatch).
    #[error(transparent)]
    Field(#[from] DecodeError),
}
