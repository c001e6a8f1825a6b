//! Integration tests exercising the client through its public API with a
//! scripted transport: encode, call, decode, and the error paths in
//! between — everything except a real network.

use authwire_client::client::UserServiceClient;
use authwire_client::error::ClientError;
use authwire_client::transport::{ScriptedTransport, TransportError};

use authwire_core::codec::message_to_json;
use authwire_core::user::{
    AddHumanUserRequest, AddHumanUserResponse, Gender, ObjectDetails, SetHumanEmail,
    SetHumanProfile, VerifyEmailRequest, VerifyEmailResponse,
};
use authwire_core::{decode_message, Timestamp};

fn sample_details() -> ObjectDetails {
    ObjectDetails {
        sequence: 42,
        change_date: Some(Timestamp::new(1_714_560_000, 0)),
        resource_owner: "org-1".to_string(),
    }
}

// ── Happy path ────────────────────────────────────────────────────────────────

/// The full round trip: the request the transport records must decode back
/// to what the caller sent, and the scripted response must come back typed.
#[tokio::test]
async fn test_verify_email_full_round_trip() {
    let transport = ScriptedTransport::new();
    transport.push_message(&VerifyEmailResponse {
        details: Some(sample_details()),
    });

    let client = UserServiceClient::new(transport);
    let request = VerifyEmailRequest {
        user_id: "u1".to_string(),
        verification_code: "123456".to_string(),
    };
    let response = client.verify_email(&request).await.expect("call failed");
    assert_eq!(response.details, Some(sample_details()));

    // Inspect what actually crossed the call boundary.
    let calls = client_calls(&client);
    assert_eq!(calls.len(), 1);
    assert_eq!(
        calls[0].0,
        "/authwire.user.v1.UserService/VerifyEmail"
    );
    let sent: VerifyEmailRequest = decode_message(&calls[0].1).expect("request must decode");
    assert_eq!(sent, request);
}

#[tokio::test]
async fn test_add_human_user_carries_nested_payload() {
    let transport = ScriptedTransport::new();
    transport.push_message(&AddHumanUserResponse {
        user_id: "217647145235".to_string(),
        details: Some(sample_details()),
        email_code: None,
    });

    let client = UserServiceClient::new(transport);
    let request = AddHumanUserRequest {
        username: Some("ada@example.com".to_string()),
        profile: Some(SetHumanProfile {
            given_name: "Ada".to_string(),
            family_name: "Lovelace".to_string(),
            gender: Some(Gender::Female),
            ..Default::default()
        }),
        email: Some(SetHumanEmail {
            email: "ada@example.com".to_string(),
            is_verified: Some(true),
            ..Default::default()
        }),
        ..Default::default()
    };

    let response = client.add_human_user(&request).await.expect("call failed");
    assert_eq!(response.user_id, "217647145235");
    assert_eq!(response.email_code, None);

    let calls = client_calls(&client);
    let sent: AddHumanUserRequest = decode_message(&calls[0].1).expect("request must decode");
    assert_eq!(sent, request);

    // The wire payload and the JSON form describe the same value.
    let json = message_to_json(&sent).expect("to_json failed");
    assert_eq!(json["profile"]["givenName"], "Ada");
    assert_eq!(json["email"]["isVerified"], true);
}

// ── Error paths ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_server_status_is_reported_as_transport_error() {
    let transport = ScriptedTransport::new();
    transport.push_error(TransportError::Status {
        code: 7,
        message: "permission denied".to_string(),
    });

    let client = UserServiceClient::new(transport);
    let result = client
        .verify_email(&VerifyEmailRequest {
            user_id: "u1".to_string(),
            verification_code: "999999".to_string(),
        })
        .await;
    match result {
        Err(ClientError::Transport(TransportError::Status { code, message })) => {
            assert_eq!(code, 7);
            assert_eq!(message, "permission denied");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_truncated_response_is_a_decode_error() {
    let transport = ScriptedTransport::new();
    // Declares a 100-byte nested message, provides nothing.
    transport.push_response(vec![0x0A, 100]);

    let client = UserServiceClient::new(transport);
    let result = client
        .verify_email(&VerifyEmailRequest {
            user_id: "u1".to_string(),
            verification_code: "123456".to_string(),
        })
        .await;
    assert!(matches!(result, Err(ClientError::Decode(_))));
}

#[tokio::test]
async fn test_exhausted_transport_reports_closed() {
    let client = UserServiceClient::new(ScriptedTransport::new());
    let result = client
        .verify_email(&VerifyEmailRequest::default())
        .await;
    assert!(matches!(
        result,
        Err(ClientError::Transport(TransportError::Closed))
    ));
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Extracts `(path, request_bytes)` pairs from the scripted transport
/// behind a client.
fn client_calls(client: &UserServiceClient<ScriptedTransport>) -> Vec<(String, Vec<u8>)> {
    client
        .transport()
        .recorded_calls()
        .into_iter()
        .map(|call| (call.method.path(), call.request))
        .collect()
}
