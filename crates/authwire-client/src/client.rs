//! Typed client for the user service.
//!
//! Each method encodes its request, applies the configured deadline, hands
//! the bytes to the transport, and decodes the response — nothing more.
//! Retries, authentication, and error presentation belong to the embedding
//! application.

use std::time::Duration;

use tokio::time;
use tracing::{debug, warn};
use uuid::Uuid;

use authwire_core::codec::Message;
use authwire_core::user::{
    methods, AddHumanUserRequest, AddHumanUserResponse, DeactivateUserRequest,
    DeactivateUserResponse, DeleteUserRequest, DeleteUserResponse, GetUserByIdRequest,
    GetUserByIdResponse, ListUsersRequest, ListUsersResponse, LockUserRequest, LockUserResponse,
    MethodDescriptor, ReactivateUserRequest, ReactivateUserResponse, ResendEmailCodeRequest,
    ResendEmailCodeResponse, RetrieveIdentityProviderIntentRequest,
    RetrieveIdentityProviderIntentResponse, SetEmailRequest, SetEmailResponse,
    StartIdentityProviderIntentRequest, StartIdentityProviderIntentResponse, UnlockUserRequest,
    UnlockUserResponse, VerifyEmailRequest, VerifyEmailResponse,
};
use authwire_core::{decode_message, encode_message};

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::transport::Transport;

/// Async client for the user service over a pluggable [`Transport`].
///
/// # Examples
///
/// ```rust,no_run
/// use authwire_client::client::UserServiceClient;
/// use authwire_client::transport::ScriptedTransport;
/// use authwire_core::user::VerifyEmailRequest;
///
/// # async fn example() -> Result<(), authwire_client::error::ClientError> {
/// let client = UserServiceClient::new(ScriptedTransport::new());
/// let response = client
///     .verify_email(&VerifyEmailRequest {
///         user_id: "u1".to_string(),
///         verification_code: "123456".to_string(),
///     })
///     .await?;
/// # Ok(())
/// # }
/// ```
pub struct UserServiceClient<T: Transport> {
    transport: T,
    config: ClientConfig,
}

impl<T: Transport> UserServiceClient<T> {
    /// Creates a client with the default configuration.
    pub fn new(transport: T) -> Self {
        Self::with_config(transport, ClientConfig::default())
    }

    /// Creates a client with an explicit configuration.
    pub fn with_config(transport: T, config: ClientConfig) -> Self {
        Self { transport, config }
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The transport behind this client.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Performs one unary call: encode, send with deadline, decode.
    async fn unary<Req: Message, Resp: Message>(
        &self,
        method: &'static MethodDescriptor,
        request: &Req,
    ) -> Result<Resp, ClientError> {
        let request_id = Uuid::new_v4();
        let payload = encode_message(request);
        debug!(
            %request_id,
            method = method.name,
            request_bytes = payload.len(),
            "calling user service"
        );

        let deadline = Duration::from_secs(self.config.request_timeout_secs);
        let response = match time::timeout(deadline, self.transport.call(method, payload)).await {
            Ok(outcome) => outcome?,
            Err(_) => {
                warn!(
                    %request_id,
                    method = method.name,
                    timeout_secs = self.config.request_timeout_secs,
                    "request timed out"
                );
                return Err(ClientError::Timeout {
                    method: method.name,
                    timeout_secs: self.config.request_timeout_secs,
                });
            }
        };

        debug!(%request_id, response_bytes = response.len(), "received response");
        Ok(decode_message(&response)?)
    }

    // ── Account creation and lookup ───────────────────────────────────────────

    pub async fn add_human_user(
        &self,
        request: &AddHumanUserRequest,
    ) -> Result<AddHumanUserResponse, ClientError> {
        self.unary(&methods::ADD_HUMAN_USER, request).await
    }

    pub async fn get_user_by_id(
        &self,
        request: &GetUserByIdRequest,
    ) -> Result<GetUserByIdResponse, ClientError> {
        self.unary(&methods::GET_USER_BY_ID, request).await
    }

    pub async fn list_users(
        &self,
        request: &ListUsersRequest,
    ) -> Result<ListUsersResponse, ClientError> {
        self.unary(&methods::LIST_USERS, request).await
    }

    // ── Email lifecycle ───────────────────────────────────────────────────────

    pub async fn set_email(
        &self,
        request: &SetEmailRequest,
    ) -> Result<SetEmailResponse, ClientError> {
        self.unary(&methods::SET_EMAIL, request).await
    }

    pub async fn resend_email_code(
        &self,
        request: &ResendEmailCodeRequest,
    ) -> Result<ResendEmailCodeResponse, ClientError> {
        self.unary(&methods::RESEND_EMAIL_CODE, request).await
    }

    pub async fn verify_email(
        &self,
        request: &VerifyEmailRequest,
    ) -> Result<VerifyEmailResponse, ClientError> {
        self.unary(&methods::VERIFY_EMAIL, request).await
    }

    // ── Lifecycle transitions ─────────────────────────────────────────────────

    pub async fn deactivate_user(
        &self,
        request: &DeactivateUserRequest,
    ) -> Result<DeactivateUserResponse, ClientError> {
        self.unary(&methods::DEACTIVATE_USER, request).await
    }

    pub async fn reactivate_user(
        &self,
        request: &ReactivateUserRequest,
    ) -> Result<ReactivateUserResponse, ClientError> {
        self.unary(&methods::REACTIVATE_USER, request).await
    }

    pub async fn lock_user(
        &self,
        request: &LockUserRequest,
    ) -> Result<LockUserResponse, ClientError> {
        self.unary(&methods::LOCK_USER, request).await
    }

    pub async fn unlock_user(
        &self,
        request: &UnlockUserRequest,
    ) -> Result<UnlockUserResponse, ClientError> {
        self.unary(&methods::UNLOCK_USER, request).await
    }

    pub async fn delete_user(
        &self,
        request: &DeleteUserRequest,
    ) -> Result<DeleteUserResponse, ClientError> {
        self.unary(&methods::DELETE_USER, request).await
    }

    // ── Identity-provider intents ─────────────────────────────────────────────

    pub async fn start_identity_provider_intent(
        &self,
        request: &StartIdentityProviderIntentRequest,
    ) -> Result<StartIdentityProviderIntentResponse, ClientError> {
        self.unary(&methods::START_IDENTITY_PROVIDER_INTENT, request)
            .await
    }

    pub async fn retrieve_identity_provider_intent(
        &self,
        request: &RetrieveIdentityProviderIntentRequest,
    ) -> Result<RetrieveIdentityProviderIntentResponse, ClientError> {
        self.unary(&methods::RETRIEVE_IDENTITY_PROVIDER_INTENT, request)
            .await
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::{MockTransport, TransportError};
    use authwire_core::user::ObjectDetails;

    fn details(sequence: u64) -> ObjectDetails {
        ObjectDetails {
            sequence,
            resource_owner: "org-1".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_verify_email_decodes_response() {
        let mut transport = MockTransport::new();
        transport
            .expect_call()
            .withf(|method, _| method.name == "VerifyEmail")
            .returning(|_, _| {
                Ok(encode_message(&VerifyEmailResponse {
                    details: Some(ObjectDetails {
                        sequence: 8,
                        resource_owner: "org-1".to_string(),
                        ..Default::default()
                    }),
                }))
            });

        let client = UserServiceClient::new(transport);
        let response = client
            .verify_email(&VerifyEmailRequest {
                user_id: "u1".to_string(),
                verification_code: "123456".to_string(),
            })
            .await
            .expect("call failed");
        assert_eq!(response.details, Some(details(8)));
    }

    #[tokio::test]
    async fn test_request_bytes_decode_back_to_the_request() {
        let mut transport = MockTransport::new();
        transport.expect_call().returning(|_, request| {
            // The server's view: what arrives must decode to what was sent.
            let decoded: VerifyEmailRequest =
                decode_message(&request).expect("request must decode");
            assert_eq!(decoded.user_id, "u1");
            assert_eq!(decoded.verification_code, "123456");
            Ok(encode_message(&VerifyEmailResponse::default()))
        });

        let client = UserServiceClient::new(transport);
        client
            .verify_email(&VerifyEmailRequest {
                user_id: "u1".to_string(),
                verification_code: "123456".to_string(),
            })
            .await
            .expect("call failed");
    }

    #[tokio::test]
    async fn test_status_errors_surface_as_transport_errors() {
        let mut transport = MockTransport::new();
        transport.expect_call().returning(|_, _| {
            Err(TransportError::Status {
                code: 5,
                message: "user not found".to_string(),
            })
        });

        let client = UserServiceClient::new(transport);
        let result = client
            .get_user_by_id(&GetUserByIdRequest {
                user_id: "missing".to_string(),
            })
            .await;
        assert!(matches!(
            result,
            Err(ClientError::Transport(TransportError::Status { code: 5, .. }))
        ));
    }

    #[tokio::test]
    async fn test_garbage_response_is_a_decode_error() {
        let mut transport = MockTransport::new();
        // 0x0A declares a length-delimited field 1 of 100 bytes, then ends.
        transport
            .expect_call()
            .returning(|_, _| Ok(vec![0x0A, 100]));

        let client = UserServiceClient::new(transport);
        let result = client
            .delete_user(&DeleteUserRequest {
                user_id: "u1".to_string(),
            })
            .await;
        assert!(matches!(result, Err(ClientError::Decode(_))));
    }

    /// Transport that never answers; only the client deadline ends the call.
    struct StalledTransport;

    #[async_trait::async_trait]
    impl Transport for StalledTransport {
        async fn call(
            &self,
            _method: &'static MethodDescriptor,
            _request: Vec<u8>,
        ) -> Result<Vec<u8>, TransportError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(Vec::new())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_deadline_elapsing_yields_timeout() {
        let config = ClientConfig {
            request_timeout_secs: 2,
            ..Default::default()
        };
        let client = UserServiceClient::with_config(StalledTransport, config);
        let result = client
            .lock_user(&LockUserRequest {
                user_id: "u1".to_string(),
            })
            .await;
        assert!(matches!(
            result,
            Err(ClientError::Timeout {
                method: "LockUser",
                timeout_secs: 2
            })
        ));
    }
}
