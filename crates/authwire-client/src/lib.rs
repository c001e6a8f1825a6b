//! # authwire-client
//!
//! Typed async client for the Authwire user service.
//!
//! The client turns each service method into an async Rust method: the
//! request message is encoded with `authwire-core`, handed to a pluggable
//! [`transport::Transport`] under the configured deadline, and the
//! response bytes are decoded back into the typed response message.
//!
//! What this crate deliberately does *not* do:
//!
//! - implement a concrete network channel (embedders bring their own
//!   [`transport::Transport`]);
//! - retry, authenticate, or present errors to end users;
//! - install a `tracing` subscriber — it only emits events, the embedding
//!   application chooses where they go.

pub mod client;
pub mod config;
pub mod error;
pub mod transport;

pub use client::UserServiceClient;
pub use config::{ClientConfig, ConfigError};
pub use error::ClientError;
pub use transport::{Transport, TransportError};
