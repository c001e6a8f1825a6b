//! Descriptor-driven message codec.
//!
//! One generic interpreter handles every message type in the protocol
//! surface.  Message types carry no codec logic of their own: each one
//! registers a static field table (see [`descriptor`]) and the functions in
//! this module walk that table to produce or consume the binary wire form,
//! the JSON form, and deep merges.
//!
//! ```text
//!                 ┌────────────────┐
//!  encode_message │                │ decode_message
//!  ─────────────► │  field tables  │ ◄─────────────
//!                 │ (one static    │
//!  message_to_json│  per message)  │ message_from_json
//!  ─────────────► │                │ ◄─────────────
//!                 └────────────────┘
//! ```
//!
//! Every call owns its [`crate::wire::Writer`] or [`crate::wire::Reader`]
//! exclusively: the codec touches no global state, so concurrent callers
//! need no coordination.
//!
//! # Examples
//!
//! ```rust
//! use authwire_core::codec::{decode_message, encode_message};
//! use authwire_core::user::VerifyEmailRequest;
//!
//! let request = VerifyEmailRequest {
//!     user_id: "u1".to_string(),
//!     verification_code: "123456".to_string(),
//! };
//! let bytes = encode_message(&request);
//! let decoded: VerifyEmailRequest = decode_message(&bytes).unwrap();
//! assert_eq!(decoded, request);
//! ```

pub mod decode;
pub mod descriptor;
pub mod encode;
pub mod json;
pub mod merge;
pub mod value;

pub use decode::{decode_message, decode_message_from};
pub use descriptor::{
    downcast, new_boxed, DynMessage, EnumDescriptor, FieldDescriptor, FieldKind, Message,
    MessageDescriptor, Presence,
};
pub use encode::{encode_message, encode_message_to};
pub use json::{message_from_json, message_to_json};
pub use merge::merge_message;
pub use value::{FieldValue, FieldView};

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::user::{
        AddHumanUserRequest, Gender, ListUsersRequest, SetHumanEmail, SetHumanProfile, UserState,
        VerifyEmailRequest,
    };
    use crate::wire::{WireType, Writer};

    fn round_trip<M: Message>(message: &M) -> M {
        decode_message(&encode_message(message)).expect("decode failed")
    }

    // ── Forward compatibility ─────────────────────────────────────────────────

    #[test]
    fn test_unknown_field_appended_after_message_is_skipped() {
        let request = VerifyEmailRequest {
            user_id: "u1".to_string(),
            verification_code: "123456".to_string(),
        };
        let mut bytes = encode_message(&request);

        // A future schema revision adds field 15 as a varint.
        let mut extra = Writer::new();
        extra.write_tag(15, WireType::Varint);
        extra.write_varint64(42);
        bytes.extend_from_slice(extra.as_slice());

        let decoded: VerifyEmailRequest = decode_message(&bytes).expect("decode failed");
        assert_eq!(decoded, request);
    }

    #[test]
    fn test_unknown_length_delimited_field_is_skipped() {
        let mut writer = Writer::new();
        writer.write_tag(1, WireType::LengthDelimited);
        writer.write_string("u1");
        writer.write_tag(200, WireType::LengthDelimited);
        writer.write_len_prefixed(b"opaque future payload");
        let decoded: VerifyEmailRequest =
            decode_message(writer.as_slice()).expect("decode failed");
        assert_eq!(decoded.user_id, "u1");
        assert_eq!(decoded.verification_code, "");
    }

    #[test]
    fn test_known_field_with_wrong_wire_type_is_skipped_not_applied() {
        // Field 1 of VerifyEmailRequest is a string; send it as a varint.
        let mut writer = Writer::new();
        writer.write_tag(1, WireType::Varint);
        writer.write_varint64(99);
        writer.write_tag(2, WireType::LengthDelimited);
        writer.write_string("123456");

        let decoded: VerifyEmailRequest =
            decode_message(writer.as_slice()).expect("decode failed");
        assert_eq!(decoded.user_id, "", "mismatched field must stay default");
        assert_eq!(decoded.verification_code, "123456");
    }

    #[test]
    fn test_truncated_nested_length_is_an_error() {
        // Field 4 of SetHumanEmail's container: declare a nested message of
        // 100 bytes but supply none.
        let mut writer = Writer::new();
        writer.write_tag(5, WireType::LengthDelimited);
        writer.write_varint64(100);
        let result: Result<AddHumanUserRequest, _> = decode_message(writer.as_slice());
        assert!(result.is_err());
    }

    // ── Presence ──────────────────────────────────────────────────────────────

    #[test]
    fn test_unset_optional_encodes_identically_to_never_declared() {
        let explicit_none = SetHumanEmail {
            email: "user@example.com".to_string(),
            is_verified: None,
            ..Default::default()
        };
        let untouched = SetHumanEmail {
            email: "user@example.com".to_string(),
            ..Default::default()
        };
        assert_eq!(encode_message(&explicit_none), encode_message(&untouched));
    }

    #[test]
    fn test_default_singular_scalars_emit_no_tag() {
        let empty = VerifyEmailRequest::default();
        assert!(encode_message(&empty).is_empty());
    }

    #[test]
    fn test_optional_false_is_longer_than_absent() {
        let absent = SetHumanEmail {
            email: "user@example.com".to_string(),
            ..Default::default()
        };
        for flag in [true, false] {
            let present = SetHumanEmail {
                is_verified: Some(flag),
                ..absent.clone()
            };
            assert!(
                encode_message(&absent).len() < encode_message(&present).len(),
                "absent optional must encode strictly shorter than Some({flag})"
            );
        }
    }

    // ── Packed repeated scalars ───────────────────────────────────────────────

    #[test]
    fn test_repeated_enums_encode_packed() {
        let request = ListUsersRequest {
            states: vec![UserState::Active, UserState::Locked],
            ..Default::default()
        };
        let bytes = encode_message(&request);
        // tag (field 2, length-delimited), length 2, then the two numbers.
        assert_eq!(bytes, vec![0x12, 0x02, 0x01, 0x04]);
        assert_eq!(round_trip(&request), request);
    }

    #[test]
    fn test_unpacked_repeated_enums_are_accepted() {
        let mut writer = Writer::new();
        writer.write_tag(2, WireType::Varint);
        writer.write_varint64(1);
        writer.write_tag(2, WireType::Varint);
        writer.write_varint64(4);
        let decoded: ListUsersRequest = decode_message(writer.as_slice()).expect("decode failed");
        assert_eq!(decoded.states, vec![UserState::Active, UserState::Locked]);
    }

    // ── Enum resilience ───────────────────────────────────────────────────────

    #[test]
    fn test_out_of_range_enum_decodes_to_unrecognized() {
        let mut writer = Writer::new();
        writer.write_tag(2, WireType::Varint);
        writer.write_varint64(250);
        let decoded: ListUsersRequest = decode_message(writer.as_slice()).expect("decode failed");
        assert_eq!(decoded.states, vec![UserState::Unrecognized]);
    }

    #[test]
    fn test_unrecognized_enum_survives_re_encoding() {
        let profile = SetHumanProfile {
            gender: Some(Gender::Unrecognized),
            ..Default::default()
        };
        assert_eq!(round_trip(&profile), profile);
    }

    // ── Merge ─────────────────────────────────────────────────────────────────

    #[test]
    fn test_merge_overlays_scalars_and_keeps_base_values() {
        let mut base = SetHumanProfile {
            given_name: "Ada".to_string(),
            family_name: "Lovelace".to_string(),
            ..Default::default()
        };
        let overlay = SetHumanProfile {
            family_name: "King".to_string(),
            gender: Some(Gender::Female),
            ..Default::default()
        };
        merge_message(&mut base, &overlay).expect("merge failed");
        assert_eq!(base.given_name, "Ada");
        assert_eq!(base.family_name, "King");
        assert_eq!(base.gender, Some(Gender::Female));
    }

    #[test]
    fn test_merge_recurses_into_nested_messages() {
        let mut base = AddHumanUserRequest {
            username: Some("ada".to_string()),
            profile: Some(SetHumanProfile {
                given_name: "Ada".to_string(),
                ..Default::default()
            }),
            ..Default::default()
        };
        let overlay = AddHumanUserRequest {
            profile: Some(SetHumanProfile {
                family_name: "Lovelace".to_string(),
                ..Default::default()
            }),
            ..Default::default()
        };
        merge_message(&mut base, &overlay).expect("merge failed");

        let profile = base.profile.expect("profile must survive the merge");
        assert_eq!(profile.given_name, "Ada");
        assert_eq!(profile.family_name, "Lovelace");
        assert_eq!(base.username.as_deref(), Some("ada"));
    }

    #[test]
    fn test_merge_copies_nested_message_absent_from_base() {
        let mut base = AddHumanUserRequest::default();
        let overlay = AddHumanUserRequest {
            profile: Some(SetHumanProfile {
                given_name: "Grace".to_string(),
                ..Default::default()
            }),
            ..Default::default()
        };
        merge_message(&mut base, &overlay).expect("merge failed");
        assert_eq!(base, overlay);
    }
}
