//! Pluggable request/response transport.
//!
//! The client encodes messages and hands the bytes to a [`Transport`];
//! what carries them — an HTTP/2 channel, a unix socket, an in-process
//! fake — is the embedder's choice.  The trait is deliberately narrow:
//! one unary call, encoded request in, encoded response out.

pub mod scripted;

use std::net::SocketAddr;

use async_trait::async_trait;
use thiserror::Error;

use authwire_core::user::MethodDescriptor;

pub use scripted::ScriptedTransport;

/// Errors a transport can report.
///
/// Decode failures are *not* transport errors; the client raises those
/// itself after the transport returns bytes.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The remote endpoint could not be reached.
    #[error("failed to connect to {addr}: {source}")]
    ConnectFailed {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    /// An I/O error occurred on an established connection.
    #[error("connection I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The server answered with an error status instead of a response
    /// message.
    #[error("server returned status {code}: {message}")]
    Status { code: u32, message: String },

    /// The connection (or scripted response queue) was exhausted.
    #[error("transport closed")]
    Closed,
}

/// Carries one encoded request to the service and returns the encoded
/// response.
///
/// Implementations must be safe to share across tasks; the client issues
/// calls through a shared reference.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    /// Performs one unary call.
    async fn call(
        &self,
        method: &'static MethodDescriptor,
        request: Vec<u8>,
    ) -> Result<Vec<u8>, TransportError>;
}
