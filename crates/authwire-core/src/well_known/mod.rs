//! Well-known value types with dedicated wire and JSON mappings.
//!
//! Two field kinds are handled natively by the interpreter instead of going
//! through a message descriptor:
//!
//! - [`Timestamp`] — `seconds`/`nanos` on the wire, an RFC 3339 string in
//!   the JSON form.
//! - Opaque struct payloads — `google.protobuf.Struct` on the wire, passed
//!   through verbatim as a JSON object.  See [`dynamic`].

pub mod dynamic;
pub mod timestamp;

pub use timestamp::Timestamp;
