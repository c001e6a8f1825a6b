//! # authwire-core
//!
//! Shared protocol library for Authwire: the binary/JSON message codec,
//! the typed message surface of the user-management service, and the
//! service method descriptors.
//!
//! This crate is used by every component that speaks the protocol — the
//! client library, test harnesses, and tooling.  It has zero dependencies
//! on sockets, runtimes, or UI frameworks.
//!
//! # Architecture overview
//!
//! Messages travel in the standard tag/length/value binary wire format and
//! have a parallel JSON form for textual interchange.  Three layers build
//! on each other:
//!
//! - **`wire`** – How bytes are laid out: varints, field tags, and
//!   length-delimited runs.  [`wire::Writer`] and [`wire::Reader`] are the
//!   only types that touch raw buffers.
//!
//! - **`codec`** – One generic interpreter for every message type.  Each
//!   message registers a static field-descriptor table (number, JSON name,
//!   kind, presence) and the interpreter walks it for `encode` / `decode` /
//!   `to_json` / `from_json` / `merge`.  Decoding is lenient by design:
//!   unknown fields and mismatched wire types are skipped so old and new
//!   schema revisions interoperate.
//!
//! - **`user`** – The protocol surface itself: enums, request/response
//!   message types, and the fixed method table of the user service.
//!
//! Plus **`well_known`** for the two value types with special mappings
//! (timestamps, opaque struct payloads).

pub mod codec;
pub mod error;
pub mod user;
pub mod well_known;
pub mod wire;

// Re-export the most-used items at the crate root so callers can write
// `authwire_core::encode_message` instead of the full module path.
pub use codec::{
    decode_message, decode_message_from, encode_message, encode_message_to, merge_message,
    message_from_json, message_to_json, Message,
};
pub use error::{DecodeError, JsonError};
pub use well_known::Timestamp;
pub use wire::{Reader, Writer};
