//! Client-side error types.

use authwire_core::DecodeError;
use thiserror::Error;

use crate::transport::TransportError;

/// Errors surfaced by [`crate::client::UserServiceClient`] calls.
///
/// The client does not translate these for end users; the embedding
/// application decides how (and whether) to present them.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The transport failed to deliver the request or returned an error
    /// status.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The response payload could not be decoded.
    #[error("malformed response: {0}")]
    Decode(#[from] DecodeError),

    /// The configured deadline elapsed before a response arrived.
    #[error("{method} timed out after {timeout_secs}s")]
    Timeout {
        method: &'static str,
        timeout_secs: u64,
    },
}
