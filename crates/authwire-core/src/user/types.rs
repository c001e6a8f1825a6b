//! Read-model messages returned by lookups and lists.

use crate::codec::{
    downcast, new_boxed, DynMessage, FieldDescriptor, FieldKind, FieldValue, FieldView, Message,
    MessageDescriptor,
};
use crate::error::DecodeError;
use crate::user::common::{ObjectDetails, OBJECT_DETAILS_DESC};
use crate::user::enums::{
    AccessTokenType, Gender, UserState, ACCESS_TOKEN_TYPE, GENDER, USER_STATE,
};
use crate::well_known::Timestamp;

// ── HumanProfile ──────────────────────────────────────────────────────────────

/// Profile of a human user as stored by the service.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HumanProfile {
    pub given_name: String,
    pub family_name: String,
    pub nick_name: Option<String>,
    pub display_name: Option<String>,
    pub preferred_language: Option<String>,
    pub gender: Option<Gender>,
    /// URL of the stored avatar image; empty when none was uploaded.
    pub avatar_url: String,
}

pub(crate) static HUMAN_PROFILE_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::singular(1, "givenName", FieldKind::String),
    FieldDescriptor::singular(2, "familyName", FieldKind::String),
    FieldDescriptor::optional(3, "nickName", FieldKind::String),
    FieldDescriptor::optional(4, "displayName", FieldKind::String),
    FieldDescriptor::optional(5, "preferredLanguage", FieldKind::String),
    FieldDescriptor::optional(6, "gender", FieldKind::Enum(&GENDER)),
    FieldDescriptor::singular(7, "avatarUrl", FieldKind::String),
];

pub(crate) static HUMAN_PROFILE_DESC: MessageDescriptor =
    MessageDescriptor::new("HumanProfile", HUMAN_PROFILE_FIELDS, new_boxed::<HumanProfile>);

impl Message for HumanProfile {
    fn descriptor() -> &'static MessageDescriptor {
        &HUMAN_PROFILE_DESC
    }

    fn field(&self, number: u32) -> Option<FieldView<'_>> {
        match number {
            1 => Some(FieldView::Str(&self.given_name)),
            2 => Some(FieldView::Str(&self.family_name)),
            3 => self.nick_name.as_deref().map(FieldView::Str),
            4 => self.display_name.as_deref().map(FieldView::Str),
            5 => self.preferred_language.as_deref().map(FieldView::Str),
            6 => self.gender.map(|gender| FieldView::Enum(gender.number())),
            7 => Some(FieldView::Str(&self.avatar_url)),
            _ => None,
        }
    }

    fn set_field(&mut self, number: u32, value: FieldValue) -> Result<(), DecodeError> {
        match (number, value) {
            (1, FieldValue::String(v)) => self.given_name = v,
            (2, FieldValue::String(v)) => self.family_name = v,
            (3, FieldValue::String(v)) => self.nick_name = Some(v),
            (4, FieldValue::String(v)) => self.display_name = Some(v),
            (5, FieldValue::String(v)) => self.preferred_language = Some(v),
            (6, FieldValue::Enum(v)) => self.gender = Some(Gender::from_number(v)),
            (7, FieldValue::String(v)) => self.avatar_url = v,
            (number, _) => {
                return Err(DecodeError::UnexpectedValue {
                    message: "HumanProfile",
                    field: number,
                })
            }
        }
        Ok(())
    }
}

// ── HumanEmail ────────────────────────────────────────────────────────────────

/// Email address and its verification state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HumanEmail {
    pub email: String,
    pub is_verified: bool,
}

pub(crate) static HUMAN_EMAIL_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::singular(1, "email", FieldKind::String),
    FieldDescriptor::singular(2, "isVerified", FieldKind::Bool),
];

pub(crate) static HUMAN_EMAIL_DESC: MessageDescriptor =
    MessageDescriptor::new("HumanEmail", HUMAN_EMAIL_FIELDS, new_boxed::<HumanEmail>);

impl Message for HumanEmail {
    fn descriptor() -> &'static MessageDescriptor {
        &HUMAN_EMAIL_DESC
    }

    fn field(&self, number: u32) -> Option<FieldView<'_>> {
        match number {
            1 => Some(FieldView::Str(&self.email)),
            2 => Some(FieldView::Bool(self.is_verified)),
            _ => None,
        }
    }

    fn set_field(&mut self, number: u32, value: FieldValue) -> Result<(), DecodeError> {
        match (number, value) {
            (1, FieldValue::String(v)) => self.email = v,
            (2, FieldValue::Bool(v)) => self.is_verified = v,
            (number, _) => {
                return Err(DecodeError::UnexpectedValue {
                    message: "HumanEmail",
                    field: number,
                })
            }
        }
        Ok(())
    }
}

// ── HumanUser ─────────────────────────────────────────────────────────────────

/// A human user as returned by lookups.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HumanUser {
    pub user_id: String,
    pub state: UserState,
    pub username: String,
    /// Every login name usable for this user.
    pub login_names: Vec<String>,
    pub preferred_login_name: String,
    pub profile: Option<HumanProfile>,
    pub email: Option<HumanEmail>,
    /// The user must change their password at next login.
    pub password_change_required: bool,
    pub password_changed: Option<Timestamp>,
}

pub(crate) static HUMAN_USER_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::singular(1, "userId", FieldKind::String),
    FieldDescriptor::singular(2, "state", FieldKind::Enum(&USER_STATE)),
    FieldDescriptor::singular(3, "username", FieldKind::String),
    FieldDescriptor::repeated(4, "loginNames", FieldKind::String),
    FieldDescriptor::singular(5, "preferredLoginName", FieldKind::String),
    FieldDescriptor::optional(6, "profile", FieldKind::Message(&HUMAN_PROFILE_DESC)),
    FieldDescriptor::optional(7, "email", FieldKind::Message(&HUMAN_EMAIL_DESC)),
    FieldDescriptor::singular(8, "passwordChangeRequired", FieldKind::Bool),
    FieldDescriptor::optional(9, "passwordChanged", FieldKind::Timestamp),
];

pub(crate) static HUMAN_USER_DESC: MessageDescriptor =
    MessageDescriptor::new("HumanUser", HUMAN_USER_FIELDS, new_boxed::<HumanUser>);

impl Message for HumanUser {
    fn descriptor() -> &'static MessageDescriptor {
        &HUMAN_USER_DESC
    }

    fn field(&self, number: u32) -> Option<FieldView<'_>> {
        match number {
            1 => Some(FieldView::Str(&self.user_id)),
            2 => Some(FieldView::Enum(self.state.number())),
            3 => Some(FieldView::Str(&self.username)),
            4 => Some(FieldView::List(
                self.login_names
                    .iter()
                    .map(|name| FieldView::Str(name))
                    .collect(),
            )),
            5 => Some(FieldView::Str(&self.preferred_login_name)),
            6 => self
                .profile
                .as_ref()
                .map(|m| FieldView::Message(m as &dyn DynMessage)),
            7 => self
                .email
                .as_ref()
                .map(|m| FieldView::Message(m as &dyn DynMessage)),
            8 => Some(FieldView::Bool(self.password_change_required)),
            9 => self.password_changed.map(FieldView::Timestamp),
            _ => None,
        }
    }

    fn set_field(&mut self, number: u32, value: FieldValue) -> Result<(), DecodeError> {
        match (number, value) {
            (1, FieldValue::String(v)) => self.user_id = v,
            (2, FieldValue::Enum(v)) => self.state = UserState::from_number(v),
            (3, FieldValue::String(v)) => self.username = v,
            (4, FieldValue::String(v)) => self.login_names.push(v),
            (5, FieldValue::String(v)) => self.preferred_login_name = v,
            (6, FieldValue::Message(m)) => self.profile = Some(downcast(m)?),
            (7, FieldValue::Message(m)) => self.email = Some(downcast(m)?),
            (8, FieldValue::Bool(v)) => self.password_change_required = v,
            (9, FieldValue::Timestamp(v)) => self.password_changed = Some(v),
            (number, _) => {
                return Err(DecodeError::UnexpectedValue {
                    message: "HumanUser",
                    field: number,
                })
            }
        }
        Ok(())
    }

    fn nested_mut(&mut self, number: u32) -> Option<&mut dyn DynMessage> {
        match number {
            6 => self.profile.as_mut().map(|m| m as &mut dyn DynMessage),
            7 => self.email.as_mut().map(|m| m as &mut dyn DynMessage),
            _ => None,
        }
    }
}

// ── MachineUser ───────────────────────────────────────────────────────────────

/// A machine user (service account).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MachineUser {
    pub name: String,
    pub description: String,
    /// Whether a client secret is configured.
    pub has_secret: bool,
    pub access_token_type: AccessTokenType,
}

pub(crate) static MACHINE_USER_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::singular(1, "name", FieldKind::String),
    FieldDescriptor::singular(2, "description", FieldKind::String),
    FieldDescriptor::singular(3, "hasSecret", FieldKind::Bool),
    FieldDescriptor::singular(4, "accessTokenType", FieldKind::Enum(&ACCESS_TOKEN_TYPE)),
];

pub(crate) static MACHINE_USER_DESC: MessageDescriptor =
    MessageDescriptor::new("MachineUser", MACHINE_USER_FIELDS, new_boxed::<MachineUser>);

impl Message for MachineUser {
    fn descriptor() -> &'static MessageDescriptor {
        &MACHINE_USER_DESC
    }

    fn field(&self, number: u32) -> Option<FieldView<'_>> {
        match number {
            1 => Some(FieldView::Str(&self.name)),
            2 => Some(FieldView::Str(&self.description)),
            3 => Some(FieldView::Bool(self.has_secret)),
            4 => Some(FieldView::Enum(self.access_token_type.number())),
            _ => None,
        }
    }

    fn set_field(&mut self, number: u32, value: FieldValue) -> Result<(), DecodeError> {
        match (number, value) {
            (1, FieldValue::String(v)) => self.name = v,
            (2, FieldValue::String(v)) => self.description = v,
            (3, FieldValue::Bool(v)) => self.has_secret = v,
            (4, FieldValue::Enum(v)) => self.access_token_type = AccessTokenType::from_number(v),
            (number, _) => {
                return Err(DecodeError::UnexpectedValue {
                    message: "MachineUser",
                    field: number,
                })
            }
        }
        Ok(())
    }
}

// ── User ──────────────────────────────────────────────────────────────────────

/// A user of either kind.
///
/// Exactly one of `human`/`machine` is expected to be present; which one is
/// the discriminator.  The codec carries both independently.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct User {
    pub user_id: String,
    pub details: Option<ObjectDetails>,
    pub state: UserState,
    pub username: String,
    pub login_names: Vec<String>,
    pub preferred_login_name: String,
    pub human: Option<HumanUser>,
    pub machine: Option<MachineUser>,
}

pub(crate) static USER_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::singular(1, "userId", FieldKind::String),
    FieldDescriptor::optional(2, "details", FieldKind::Message(&OBJECT_DETAILS_DESC)),
    FieldDescriptor::singular(3, "state", FieldKind::Enum(&USER_STATE)),
    FieldDescriptor::singular(4, "username", FieldKind::String),
    FieldDescriptor::repeated(5, "loginNames", FieldKind::String),
    FieldDescriptor::singular(6, "preferredLoginName", FieldKind::String),
    FieldDescriptor::optional(7, "human", FieldKind::Message(&HUMAN_USER_DESC)),
    FieldDescriptor::optional(8, "machine", FieldKind::Message(&MACHINE_USER_DESC)),
];

pub(crate) static USER_DESC: MessageDescriptor =
    MessageDescriptor::new("User", USER_FIELDS, new_boxed::<User>);

impl Message for User {
    fn descriptor() -> &'static MessageDescriptor {
        &USER_DESC
    }

    fn field(&self, number: u32) -> Option<FieldView<'_>> {
        match number {
            1 => Some(FieldView::Str(&self.user_id)),
            2 => self
                .details
                .as_ref()
                .map(|m| FieldView::Message(m as &dyn DynMessage)),
            3 => Some(FieldView::Enum(self.state.number())),
            4 => Some(FieldView::Str(&self.username)),
            5 => Some(FieldView::List(
                self.login_names
                    .iter()
                    .map(|name| FieldView::Str(name))
                    .collect(),
            )),
            6 => Some(FieldView::Str(&self.preferred_login_name)),
            7 => self
                .human
                .as_ref()
                .map(|m| FieldView::Message(m as &dyn DynMessage)),
            8 => self
                .machine
                .as_ref()
                .map(|m| FieldView::Message(m as &dyn DynMessage)),
            _ => None,
        }
    }

    fn set_field(&mut self, number: u32, value: FieldValue) -> Result<(), DecodeError> {
        match (number, value) {
            (1, FieldValue::String(v)) => self.user_id = v,
            (2, FieldValue::Message(m)) => self.details = Some(downcast(m)?),
            (3, FieldValue::Enum(v)) => self.state = UserState::from_number(v),
            (4, FieldValue::String(v)) => self.username = v,
            (5, FieldValue::String(v)) => self.login_names.push(v),
            (6, FieldValue::String(v)) => self.preferred_login_name = v,
            (7, FieldValue::Message(m)) => self.human = Some(downcast(m)?),
            (8, FieldValue::Message(m)) => self.machine = Some(downcast(m)?),
            (number, _) => {
                return Err(DecodeError::UnexpectedValue {
                    message: "User",
                    field: number,
                })
            }
        }
        Ok(())
    }

    fn nested_mut(&mut self, number: u32) -> Option<&mut dyn DynMessage> {
        match number {
            2 => self.details.as_mut().map(|m| m as &mut dyn DynMessage),
            7 => self.human.as_mut().map(|m| m as &mut dyn DynMessage),
            8 => self.machine.as_mut().map(|m| m as &mut dyn DynMessage),
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

    fn sample_human() -> User {
        User {
            user_id: "u1".to_string(),
            details: Some(ObjectDetails {
                sequence: 12,
                change_date: Some(Timestamp::new(1_714_560_000, 0)),
                resource_owner: "org-1".to_string(),
            }),
            state: UserState::Active,
            username: "ada".to_string(),
            login_names: vec!["ada".to_string(), "ada@example.com".to_string()],
            preferred_login_name: "ada@example.com".to_string(),
            human: Some(HumanUser {
                user_id: "u1".to_string(),
                state: UserState::Active,
                username: "ada".to_string(),
                login_names: vec!["ada".to_string()],
                preferred_login_name: "ada@example.com".to_string(),
                profile: Some(HumanProfile {
                    given_name: "Ada".to_string(),
                    family_name: "Lovelace".to_string(),
                    gender: Some(Gender::Female),
                    avatar_url: "https://example.com/avatar.png".to_string(),
                    ..Default::default()
                }),
                email: Some(HumanEmail {
                    email: "ada@example.com".to_string(),
                    is_verified: true,
                }),
                password_change_required: false,
                password_changed: Some(Timestamp::new(1_700_000_000, 0)),
            }),
            machine: None,
        }
    }

    #[test]
    fn test_human_user_round_trip() {
        let user = sample_human();
        assert_eq!(round_trip(&user), user);
    }

    #[test]
    fn test_human_user_json_round_trip() {
        let user = sample_human();
        let encoded = message_to_json(&user).expect("to_json failed");
        let decoded: User = message_from_json(&encoded).expect("from_json failed");
        assert_eq!(decoded, user);
    }

    #[test]
    fn test_machine_user_round_trip() {
        let user = User {
            user_id: "m1".to_string(),
            state: UserState::Active,
            username: "ci-runner".to_string(),
            machine: Some(MachineUser {
                name: "ci-runner".to_string(),
                description: "deploys on merge".to_string(),
                has_secret: true,
                access_token_type: AccessTokenType::Jwt,
            }),
            ..Default::default()
        };
        let decoded = round_trip(&user);
        assert_eq!(decoded, user);
        assert_eq!(decoded.human, None);
    }

    #[test]
    fn test_login_names_preserve_order() {
        let user = HumanUser {
            login_names: vec!["a".to_string(), "b".to_string(), "c".to_string()],
            ..Default::default()
        };
        assert_eq!(round_trip(&user).login_names, ["a", "b", "c"]);
    }

    #[test]
    fn test_empty_login_names_emit_nothing_and_decode_empty() {
        let user = HumanUser::default();
        assert!(encode_message(&user).is_empty());
        assert!(round_trip(&user).login_names.is_empty());
    }

    #[test]
    fn test_state_serializes_as_name_in_json() {
        let user = User {
            user_id: "u1".to_string(),
            state: UserState::Locked,
            ..Default::default()
        };
        let encoded = message_to_json(&user).expect("to_json failed");
        assert_eq!(
            encoded,
            json!({ "userId": "u1", "state": "USER_STATE_LOCKED" })
        );
    }
}
