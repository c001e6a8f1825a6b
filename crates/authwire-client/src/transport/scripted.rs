//! In-memory transport that serves pre-queued responses.
//!
//! Used by tests and local harnesses to exercise the full client path —
//! request encoding, the call contract, response decoding — without a
//! network.  Responses are served in FIFO order; every call is recorded
//! so tests can assert on what was actually sent.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use authwire_core::codec::Message;
use authwire_core::encode_message;
use authwire_core::user::MethodDescriptor;

use crate::transport::{Transport, TransportError};

/// A recorded call: which method was invoked and the encoded request.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub method: &'static MethodDescriptor,
    pub request: Vec<u8>,
}

/// Serves queued responses and records every call.
///
/// When the queue runs dry, calls fail with [`TransportError::Closed`].
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    responses: Mutex<VecDeque<Result<Vec<u8>, TransportError>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues raw response bytes.
    pub fn push_response(&self, bytes: Vec<u8>) {
        self.lock_responses().push_back(Ok(bytes));
    }

    /// Queues an encoded message as the next response.
    pub fn push_message<M: Message>(&self, message: &M) {
        self.push_response(encode_message(message));
    }

    /// Queues an error outcome.
    pub fn push_error(&self, error: TransportError) {
        self.lock_responses().push_back(Err(error));
    }

    /// Everything the client has sent so far, in call order.
    pub fn recorded_calls(&self) -> Vec<RecordedCall> {
        self.lock_calls().clone()
    }

    fn lock_responses(
        &self,
    ) -> std::sync::MutexGuard<'_, VecDeque<Result<Vec<u8>, TransportError>>> {
        self.responses
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn lock_calls(&self) -> std::sync::MutexGuard<'_, Vec<RecordedCall>> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn call(
        &self,
        method: &'static MethodDescriptor,
        request: Vec<u8>,
    ) -> Result<Vec<u8>, TransportError> {
        self.lock_calls().push(RecordedCall { method, request });
        self.lock_responses()
            .pop_front()
            .unwrap_or(Err(TransportError::Closed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use authwire_core::user::methods;

    #[test]
    fn test_responses_are_served_in_order() {
        tokio_test::block_on(async {
            let transport = ScriptedTransport::new();
            transport.push_response(vec![1]);
            transport.push_response(vec![2]);

            let first = transport
                .call(&methods::VERIFY_EMAIL, Vec::new())
                .await
                .expect("first call failed");
            let second = transport
                .call(&methods::VERIFY_EMAIL, Vec::new())
                .await
                .expect("second call failed");
            assert_eq!(first, vec![1]);
            assert_eq!(second, vec![2]);
        });
    }

    #[test]
    fn test_exhausted_queue_reports_closed() {
        tokio_test::block_on(async {
            let transport = ScriptedTransport::new();
            let result = transport.call(&methods::VERIFY_EMAIL, Vec::new()).await;
            assert!(matches!(result, Err(TransportError::Closed)));
        });
    }

    #[test]
    fn test_calls_are_recorded_with_method_and_payload() {
        tokio_test::block_on(async {
            let transport = ScriptedTransport::new();
            transport.push_response(Vec::new());
            transport
                .call(&methods::DELETE_USER, vec![0x0A, 0x01, b'x'])
                .await
                .expect("call failed");

            let calls = transport.recorded_calls();
            assert_eq!(calls.len(), 1);
            assert_eq!(calls[0].method.name, "DeleteUser");
            assert_eq!(calls[0].request, vec![0x0A, 0x01, b'x']);
        });
    }
}
