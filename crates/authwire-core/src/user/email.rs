//! Email lifecycle messages: set, verify, and re-send verification codes.

use crate::codec::{
    downcast, new_boxed, DynMessage, FieldDescriptor, FieldKind, FieldValue, FieldView, Message,
    MessageDescriptor,
};
use crate::error::DecodeError;
use crate::user::common::{ObjectDetails, OBJECT_DETAILS_DESC};

// ── Verification delivery options ─────────────────────────────────────────────

/// Ask the service to send the verification code by mail.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SendEmailVerificationCode {
    /// Template for the link in the mail, e.g.
    /// `"https://accounts.example.com/verify?code={{.Code}}"`.  The
    /// service's default template is used when absent.
    pub url_template: Option<String>,
}

pub(crate) static SEND_EMAIL_VERIFICATION_CODE_FIELDS: &[FieldDescriptor] =
    &[FieldDescriptor::optional(1, "urlTemplate", FieldKind::String)];

pub(crate) static SEND_EMAIL_VERIFICATION_CODE_DESC: MessageDescriptor = MessageDescriptor::new(
    "SendEmailVerificationCode",
    SEND_EMAIL_VERIFICATION_CODE_FIELDS,
    new_boxed::<SendEmailVerificationCode>,
);

impl Message for SendEmailVerificationCode {
    fn descriptor() -> &'static MessageDescriptor {
        &SEND_EMAIL_VERIFICATION_CODE_DESC
    }

    fn field(&self, number: u32) -> Option<FieldView<'_>> {
        match number {
            1 => self.url_template.as_deref().map(FieldView::Str),
            _ => None,
        }
    }

    fn set_field(&mut self, number: u32, value: FieldValue) -> Result<(), DecodeError> {
        match (number, value) {
            (1, FieldValue::String(v)) => self.url_template = Some(v),
            (number, _) => {
                return Err(DecodeError::UnexpectedValue {
                    message: "SendEmailVerificationCode",
                    field: number,
                })
            }
        }
        Ok(())
    }
}

/// Ask the service to return the verification code in the response instead
/// of delivering it.  Carries no fields; its presence is the signal.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReturnEmailVerificationCode {}

pub(crate) static RETURN_EMAIL_VERIFICATION_CODE_FIELDS: &[FieldDescriptor] = &[];

pub(crate) static RETURN_EMAIL_VERIFICATION_CODE_DESC: MessageDescriptor = MessageDescriptor::new(
    "ReturnEmailVerificationCode",
    RETURN_EMAIL_VERIFICATION_CODE_FIELDS,
    new_boxed::<ReturnEmailVerificationCode>,
);

impl Message for ReturnEmailVerificationCode {
    fn descriptor() -> &'static MessageDescriptor {
        &RETURN_EMAIL_VERIFICATION_CODE_DESC
    }

    fn field(&self, _number: u32) -> Option<FieldView<'_>> {
        None
    }

    fn set_field(&mut self, number: u32, _value: FieldValue) -> Result<(), DecodeError> {
        Err(DecodeError::UnexpectedValue {
            message: "ReturnEmailVerificationCode",
            field: number,
        })
    }
}

// ── SetHumanEmail ─────────────────────────────────────────────────────────────

/// Email address plus how (or whether) to verify it.
///
/// `send_code`, `return_code`, and `is_verified` are alternatives: the
/// caller sets at most one.  The codec encodes whichever are present and
/// leaves exclusivity to the caller.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SetHumanEmail {
    pub email: String,
    pub send_code: Option<SendEmailVerificationCode>,
    pub return_code: Option<ReturnEmailVerificationCode>,
    /// Mark the address verified without a code exchange.
    pub is_verified: Option<bool>,
}

pub(crate) static SET_HUMAN_EMAIL_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::singular(1, "email", FieldKind::String),
    FieldDescriptor::optional(
        2,
        "sendCode",
        FieldKind::Message(&SEND_EMAIL_VERIFICATION_CODE_DESC),
    ),
    FieldDescriptor::optional(
        3,
        "returnCode",
        FieldKind::Message(&RETURN_EMAIL_VERIFICATION_CODE_DESC),
    ),
    FieldDescriptor::optional(4, "isVerified", FieldKind::Bool),
];

pub(crate) static SET_HUMAN_EMAIL_DESC: MessageDescriptor = MessageDescriptor::new(
    "SetHumanEmail",
    SET_HUMAN_EMAIL_FIELDS,
    new_boxed::<SetHumanEmail>,
);

impl Message for SetHumanEmail {
    fn descriptor() -> &'static MessageDescriptor {
        &SET_HUMAN_EMAIL_DESC
    }

    fn field(&self, number: u32) -> Option<FieldView<'_>> {
        match number {
            1 => Some(FieldView::Str(&self.email)),
            2 => self
                .send_code
                .as_ref()
                .map(|m| FieldView::Message(m as &dyn DynMessage)),
            3 => self
                .return_code
                .as_ref()
                .map(|m| FieldView::Message(m as &dyn DynMessage)),
            4 => self.is_verified.map(FieldView::Bool),
            _ => None,
        }
    }

    fn set_field(&mut self, number: u32, value: FieldValue) -> Result<(), DecodeError> {
        match (number, value) {
            (1, FieldValue::String(v)) => self.email = v,
            (2, FieldValue::Message(m)) => self.send_code = Some(downcast(m)?),
            (3, FieldValue::Message(m)) => self.return_code = Some(downcast(m)?),
            (4, FieldValue::Bool(v)) => self.is_verified = Some(v),
            (number, _) => {
                return Err(DecodeError::UnexpectedValue {
                    message: "SetHumanEmail",
                    field: number,
                })
            }
        }
        Ok(())
    }

    fn nested_mut(&mut self, number: u32) -> Option<&mut dyn DynMessage> {
        match number {
            2 => self.send_code.as_mut().map(|m| m as &mut dyn DynMessage),
            3 => self.return_code.as_mut().map(|m| m as &mut dyn DynMessage),
            _ => None,
        }
    }
}

// ── SetEmail ──────────────────────────────────────────────────────────────────

/// Replaces a user's email address.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SetEmailRequest {
    pub user_id: String,
    pub email: String,
    pub send_code: Option<SendEmailVerificationCode>,
    pub return_code: Option<ReturnEmailVerificationCode>,
    pub is_verified: Option<bool>,
}

pub(crate) static SET_EMAIL_REQUEST_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::singular(1, "userId", FieldKind::String),
    FieldDescriptor::singular(2, "email", FieldKind::String),
    FieldDescriptor::optional(
        3,
        "sendCode",
        FieldKind::Message(&SEND_EMAIL_VERIFICATION_CODE_DESC),
    ),
    FieldDescriptor::optional(
        4,
        "returnCode",
        FieldKind::Message(&RETURN_EMAIL_VERIFICATION_CODE_DESC),
    ),
    FieldDescriptor::optional(5, "isVerified", FieldKind::Bool),
];

pub(crate) static SET_EMAIL_REQUEST_DESC: MessageDescriptor = MessageDescriptor::new(
    "SetEmailRequest",
    SET_EMAIL_REQUEST_FIELDS,
    new_boxed::<SetEmailRequest>,
);

impl Message for SetEmailRequest {
    fn descriptor() -> &'static MessageDescriptor {
        &SET_EMAIL_REQUEST_DESC
    }

    fn field(&self, number: u32) -> Option<FieldView<'_>> {
        match number {
            1 => Some(FieldView::Str(&self.user_id)),
            2 => Some(FieldView::Str(&self.email)),
            3 => self
                .send_code
                .as_ref()
                .map(|m| FieldView::Message(m as &dyn DynMessage)),
            4 => self
                .return_code
                .as_ref()
                .map(|m| FieldView::Message(m as &dyn DynMessage)),
            5 => self.is_verified.map(FieldView::Bool),
            _ => None,
        }
    }

    fn set_field(&mut self, number: u32, value: FieldValue) -> Result<(), DecodeError> {
        match (number, value) {
            (1, FieldValue::String(v)) => self.user_id = v,
            (2, FieldValue::String(v)) => self.email = v,
            (3, FieldValue::Message(m)) => self.send_code = Some(downcast(m)?),
            (4, FieldValue::Message(m)) => self.return_code = Some(downcast(m)?),
            (5, FieldValue::Bool(v)) => self.is_verified = Some(v),
            (number, _) => {
                return Err(DecodeError::UnexpectedValue {
                    message: "SetEmailRequest",
                    field: number,
                })
            }
        }
        Ok(())
    }

    fn nested_mut(&mut self, number: u32) -> Option<&mut dyn DynMessage> {
        match number {
            3 => self.send_code.as_mut().map(|m| m as &mut dyn DynMessage),
            4 => self.return_code.as_mut().map(|m| m as &mut dyn DynMessage),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SetEmailResponse {
    pub details: Option<ObjectDetails>,
}

pub(crate) static SET_EMAIL_RESPONSE_FIELDS: &[FieldDescriptor] = &[FieldDescriptor::optional(
    1,
    "details",
    FieldKind::Message(&OBJECT_DETAILS_DESC),
)];

pub(crate) static SET_EMAIL_RESPONSE_DESC: MessageDescriptor = MessageDescriptor::new(
    "SetEmailResponse",
    SET_EMAIL_RESPONSE_FIELDS,
    new_boxed::<SetEmailResponse>,
);

impl Message for SetEmailResponse {
    fn descriptor() -> &'static MessageDescriptor {
        &SET_EMAIL_RESPONSE_DESC
    }

    fn field(&self, number: u32) -> Option<FieldView<'_>> {
        match number {
            1 => self
                .details
                .as_ref()
                .map(|m| FieldView::Message(m as &dyn DynMessage)),
            _ => None,
        }
    }

    fn set_field(&mut self, number: u32, value: FieldValue) -> Result<(), DecodeError> {
        match (number, value) {
            (1, FieldValue::Message(m)) => self.details = Some(downcast(m)?),
            (number, _) => {
                return Err(DecodeError::UnexpectedValue {
                    message: "SetEmailResponse",
                    field: number,
                })
            }
        }
        Ok(())
    }

    fn nested_mut(&mut self, number: u32) -> Option<&mut dyn DynMessage> {
        match number {
            1 => self.details.as_mut().map(|m| m as &mut dyn DynMessage),
            _ => None,
        }
    }
}

// ── ResendEmailCode ───────────────────────────────────────────────────────────

/// Invalidates any pending code and issues a new one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResendEmailCodeRequest {
    pub user_id: String,
    pub send_code: Option<SendEmailVerificationCode>,
    pub return_code: Option<ReturnEmailVerificationCode>,
}

pub(crate) static RESEND_EMAIL_CODE_REQUEST_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::singular(1, "userId", FieldKind::String),
    FieldDescriptor::optional(
        2,
        "sendCode",
        FieldKind::Message(&SEND_EMAIL_VERIFICATION_CODE_DESC),
    ),
    FieldDescriptor::optional(
        3,
        "returnCode",
        FieldKind::Message(&RETURN_EMAIL_VERIFICATION_CODE_DESC),
    ),
];

pub(crate) static RESEND_EMAIL_CODE_REQUEST_DESC: MessageDescriptor = MessageDescriptor::new(
    "ResendEmailCodeRequest",
    RESEND_EMAIL_CODE_REQUEST_FIELDS,
    new_boxed::<ResendEmailCodeRequest>,
);

impl Message for ResendEmailCodeRequest {
    fn descriptor() -> &'static MessageDescriptor {
        &RESEND_EMAIL_CODE_REQUEST_DESC
    }

    fn field(&self, number: u32) -> Option<FieldView<'_>> {
        match number {
            1 => Some(FieldView::Str(&self.user_id)),
            2 => self
                .send_code
                .as_ref()
                .map(|m| FieldView::Message(m as &dyn DynMessage)),
            3 => self
                .return_code
                .as_ref()
                .map(|m| FieldView::Message(m as &dyn DynMessage)),
            _ => None,
        }
    }

    fn set_field(&mut self, number: u32, value: FieldValue) -> Result<(), DecodeError> {
        match (number, value) {
            (1, FieldValue::String(v)) => self.user_id = v,
            (2, FieldValue::Message(m)) => self.send_code = Some(downcast(m)?),
            (3, FieldValue::Message(m)) => self.return_code = Some(downcast(m)?),
            (number, _) => {
                return Err(DecodeError::UnexpectedValue {
                    message: "ResendEmailCodeRequest",
                    field: number,
                })
            }
        }
        Ok(())
    }

    fn nested_mut(&mut self, number: u32) -> Option<&mut dyn DynMessage> {
        match number {
            2 => self.send_code.as_mut().map(|m| m as &mut dyn DynMessage),
            3 => self.return_code.as_mut().map(|m| m as &mut dyn DynMessage),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResendEmailCodeResponse {
    pub details: Option<ObjectDetails>,
    /// Present only when the request asked for the code to be returned.
    pub verification_code: Option<String>,
}

pub(crate) static RESEND_EMAIL_CODE_RESPONSE_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::optional(1, "details", FieldKind::Message(&OBJECT_DETAILS_DESC)),
    FieldDescriptor::optional(2, "verificationCode", FieldKind::String),
];

pub(crate) static RESEND_EMAIL_CODE_RESPONSE_DESC: MessageDescriptor = MessageDescriptor::new(
    "ResendEmailCodeResponse",
    RESEND_EMAIL_CODE_RESPONSE_FIELDS,
    new_boxed::<ResendEmailCodeResponse>,
);

impl Message for ResendEmailCodeResponse {
    fn descriptor() -> &'static MessageDescriptor {
        &RESEND_EMAIL_CODE_RESPONSE_DESC
    }

    fn field(&self, number: u32) -> Option<FieldView<'_>> {
        match number {
            1 => self
                .details
                .as_ref()
                .map(|m| FieldView::Message(m as &dyn DynMessage)),
            2 => self.verification_code.as_deref().map(FieldView::Str),
            _ => None,
        }
    }

    fn set_field(&mut self, number: u32, value: FieldValue) -> Result<(), DecodeError> {
        match (number, value) {
            (1, FieldValue::Message(m)) => self.details = Some(downcast(m)?),
            (2, FieldValue::String(v)) => self.verification_code = Some(v),
            (number, _) => {
                return Err(DecodeError::UnexpectedValue {
                    message: "ResendEmailCodeResponse",
                    field: number,
                })
            }
        }
        Ok(())
    }

    fn nested_mut(&mut self, number: u32) -> Option<&mut dyn DynMessage> {
        match number {
            1 => self.details.as_mut().map(|m| m as &mut dyn DynMessage),
            _ => None,
        }
    }
}

// ── VerifyEmail ───────────────────────────────────────────────────────────────

/// Confirms an email address with the code its owner received.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VerifyEmailRequest {
    /// User the code was issued for.
    pub user_id: String,
    /// The one-time code from the verification mail.
    pub verification_code: String,
}

pub(crate) static VERIFY_EMAIL_REQUEST_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::singular(1, "userId", FieldKind::String),
    FieldDescriptor::singular(2, "verificationCode", FieldKind::String),
];

pub(crate) static VERIFY_EMAIL_REQUEST_DESC: MessageDescriptor = MessageDescriptor::new(
    "VerifyEmailRequest",
    VERIFY_EMAIL_REQUEST_FIELDS,
    new_boxed::<VerifyEmailRequest>,
);

impl Message for VerifyEmailRequest {
    fn descriptor() -> &'static MessageDescriptor {
        &VERIFY_EMAIL_REQUEST_DESC
    }

    fn field(&self, number: u32) -> Option<FieldView<'_>> {
        match number {
            1 => Some(FieldView::Str(&self.user_id)),
            2 => Some(FieldView::Str(&self.verification_code)),
            _ => None,
        }
    }

    fn set_field(&mut self, number: u32, value: FieldValue) -> Result<(), DecodeError> {
        match (number, value) {
            (1, FieldValue::String(v)) => self.user_id = v,
            (2, FieldValue::String(v)) => self.verification_code = v,
            (number, _) => {
                return Err(DecodeError::UnexpectedValue {
                    message: "VerifyEmailRequest",
                    field: number,
                })
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct VerifyEmailResponse {
    pub details: Option<ObjectDetails>,
}

pub(crate) static VERIFY_EMAIL_RESPONSE_FIELDS: &[FieldDescriptor] = &[FieldDescriptor::optional(
    1,
    "details",
    FieldKind::Message(&OBJECT_DETAILS_DESC),
)];

pub(crate) static VERIFY_EMAIL_RESPONSE_DESC: MessageDescriptor = MessageDescriptor::new(
    "VerifyEmailResponse",
    VERIFY_EMAIL_RESPONSE_FIELDS,
    new_boxed::<VerifyEmailResponse>,
);

impl Message for VerifyEmailResponse {
    fn descriptor() -> &'static MessageDescriptor {
        &VERIFY_EMAIL_RESPONSE_DESC
    }

    fn field(&self, number: u32) -> Option<FieldView<'_>> {
        match number {
            1 => self
                .details
                .as_ref()
                .map(|m| FieldView::Message(m as &dyn DynMessage)),
            _ => None,
        }
    }

    fn set_field(&mut self, number: u32, value: FieldValue) -> Result<(), DecodeError> {
        match (number, value) {
            (1, FieldValue::Message(m)) => self.details = Some(downcast(m)?),
            (number, _) => {
                return Err(DecodeError::UnexpectedValue {
                    message: "VerifyEmailResponse",
                    field: number,
                })
            }
        }
        Ok(())
    }

    fn nested_mut(&mut self, number: u32) -> Option<&mut dyn DynMessage> {
        match number {
            1 => self.details.as_mut().map(|m| m as &mut dyn DynMessage),
            _ => None,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{decode_message, encode_message, message_from_json, message_to_json};
    use serde_json::json;

    fn round_trip<M: Message>(message: &M) -> M {
        decode_message(&encode_message(message)).expect("decode failed")
    }

    #[test]
    fn test_verify_email_request_round_trip() {
        let request = VerifyEmailRequest {
            user_id: "u1".to_string(),
            verification_code: "123456".to_string(),
        };
        assert_eq!(round_trip(&request), request);
    }

    #[test]
    fn test_verify_email_request_exact_wire_bytes() {
        let request = VerifyEmailRequest {
            user_id: "u1".to_string(),
            verification_code: "123456".to_string(),
        };
        assert_eq!(
            encode_message(&request),
            [
                0x0A, 0x02, b'u', b'1', // field 1, "u1"
                0x12, 0x06, b'1', b'2', b'3', b'4', b'5', b'6', // field 2, "123456"
            ]
        );
    }

    #[test]
    fn test_verify_email_request_exact_json_form() {
        let request = VerifyEmailRequest {
            user_id: "u1".to_string(),
            verification_code: "123456".to_string(),
        };
        let encoded = message_to_json(&request).expect("to_json failed");
        assert_eq!(
            serde_json::to_string(&encoded).expect("serialize failed"),
            r#"{"userId":"u1","verificationCode":"123456"}"#
        );
        let decoded: VerifyEmailRequest = message_from_json(&encoded).expect("from_json failed");
        assert_eq!(decoded, request);
    }

    #[test]
    fn test_set_human_email_with_unset_optional_round_trips_as_absent() {
        let email = SetHumanEmail {
            email: "u1@example.com".to_string(),
            ..Default::default()
        };
        let decoded = round_trip(&email);
        assert_eq!(decoded.is_verified, None);
        assert_eq!(decoded.send_code, None);
        assert_eq!(decoded.return_code, None);
    }

    #[test]
    fn test_set_human_email_verification_variants_round_trip() {
        let with_send = SetHumanEmail {
            email: "u1@example.com".to_string(),
            send_code: Some(SendEmailVerificationCode {
                url_template: Some("https://example.com/verify?code={{.Code}}".to_string()),
            }),
            ..Default::default()
        };
        let with_return = SetHumanEmail {
            email: "u1@example.com".to_string(),
            return_code: Some(ReturnEmailVerificationCode {}),
            ..Default::default()
        };
        let with_verified = SetHumanEmail {
            email: "u1@example.com".to_string(),
            is_verified: Some(false),
            ..Default::default()
        };
        for email in [with_send, with_return, with_verified] {
            assert_eq!(round_trip(&email), email);
        }
    }

    #[test]
    fn test_empty_nested_message_emits_tag_and_zero_length() {
        // Presence of the empty ReturnEmailVerificationCode must survive:
        // its tag and zero length are the whole signal.
        let email = SetHumanEmail {
            return_code: Some(ReturnEmailVerificationCode {}),
            ..Default::default()
        };
        let bytes = encode_message(&email);
        assert_eq!(bytes, [0x1A, 0x00]);
        assert_eq!(round_trip(&email), email);
    }

    #[test]
    fn test_is_verified_false_round_trips_as_present_false() {
        let email = SetHumanEmail {
            email: "u1@example.com".to_string(),
            is_verified: Some(false),
            ..Default::default()
        };
        assert_eq!(round_trip(&email).is_verified, Some(false));
    }

    #[test]
    fn test_set_email_request_json_round_trip() {
        let request = SetEmailRequest {
            user_id: "u1".to_string(),
            email: "new@example.com".to_string(),
            return_code: Some(ReturnEmailVerificationCode {}),
            ..Default::default()
        };
        let encoded = message_to_json(&request).expect("to_json failed");
        assert_eq!(
            encoded,
            json!({
                "userId": "u1",
                "email": "new@example.com",
                "returnCode": {},
            })
        );
        let decoded: SetEmailRequest = message_from_json(&encoded).expect("from_json failed");
        assert_eq!(decoded, request);
    }

    #[test]
    fn test_resend_email_code_response_round_trip() {
        let response = ResendEmailCodeResponse {
            details: Some(ObjectDetails {
                sequence: 9,
                resource_owner: "org-1".to_string(),
                ..Default::default()
            }),
            verification_code: Some("424242".to_string()),
        };
        assert_eq!(round_trip(&response), response);
    }

    #[test]
    fn test_from_json_ignores_unknown_keys() {
        let decoded: VerifyEmailRequest = message_from_json(&json!({
            "userId": "u1",
            "verificationCode": "123456",
            "sentAt": "2024-05-01T10:40:00Z",
        }))
        .expect("from_json failed");
        assert_eq!(decoded.user_id, "u1");
        assert_eq!(decoded.verification_code, "123456");
    }

    #[test]
    fn test_from_json_coerces_scalars_to_string_fields() {
        let decoded: VerifyEmailRequest = message_from_json(&json!({
            "userId": 31337,
            "verificationCode": "123456",
        }))
        .expect("from_json failed");
        assert_eq!(decoded.user_id, "31337");
    }

    #[test]
    fn test_from_json_null_means_absent() {
        let decoded: SetHumanEmail = message_from_json(&json!({
            "email": "u1@example.com",
            "isVerified": null,
        }))
        .expect("from_json failed");
        assert_eq!(decoded.is_verified, None);
    }
}
