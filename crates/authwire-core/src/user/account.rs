//! Account creation and lookup messages.

use crate::codec::{
    downcast, new_boxed, DynMessage, FieldDescriptor, FieldKind, FieldValue, FieldView, Message,
    MessageDescriptor,
};
use crate::error::DecodeError;
use crate::user::common::{
    ListDetails, ListQuery, ObjectDetails, Organization, LIST_DETAILS_DESC, LIST_QUERY_DESC,
    OBJECT_DETAILS_DESC, ORGANIZATION_DESC,
};
use crate::user::email::{SetHumanEmail, SET_HUMAN_EMAIL_DESC};
use crate::user::enums::{Gender, UserState, GENDER, USER_STATE};
use crate::user::types::{User, USER_DESC};

// ── SetHumanProfile ───────────────────────────────────────────────────────────

/// Profile fields applied when creating or updating a human user.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SetHumanProfile {
    pub given_name: String,
    pub family_name: String,
    pub nick_name: Option<String>,
    /// Overrides the computed display name when set.
    pub display_name: Option<String>,
    /// BCP 47 language tag, e.g. `"de-CH"`.
    pub preferred_language: Option<String>,
    pub gender: Option<Gender>,
}

pub(crate) static SET_HUMAN_PROFILE_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::singular(1, "givenName", FieldKind::String),
    FieldDescriptor::singular(2, "familyName", FieldKind::String),
    FieldDescriptor::optional(3, "nickName", FieldKind::String),
    FieldDescriptor::optional(4, "displayName", FieldKind::String),
    FieldDescriptor::optional(5, "preferredLanguage", FieldKind::String),
    FieldDescriptor::optional(6, "gender", FieldKind::Enum(&GENDER)),
];

pub(crate) static SET_HUMAN_PROFILE_DESC: MessageDescriptor = MessageDescriptor::new(
    "SetHumanProfile",
    SET_HUMAN_PROFILE_FIELDS,
    new_boxed::<SetHumanProfile>,
);

impl Message for SetHumanProfile {
    fn descriptor() -> &'static MessageDescriptor {
        &SET_HUMAN_PROFILE_DESC
    }

    fn field(&self, number: u32) -> Option<FieldView<'_>> {
        match number {
            1 => Some(FieldView::Str(&self.given_name)),
            2 => Some(FieldView::Str(&self.family_name)),
            3 => self.nick_name.as_deref().map(FieldView::Str),
            4 => self.display_name.as_deref().map(FieldView::Str),
            5 => self.preferred_language.as_deref().map(FieldView::Str),
            6 => self.gender.map(|gender| FieldView::Enum(gender.number())),
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
            (number, _) => {
                return Err(DecodeError::UnexpectedValue {
                    message: "SetHumanProfile",
                    field: number,
                })
            }
        }
        Ok(())
    }
}

// ── SetMetadataEntry ──────────────────────────────────────────────────────────

/// One key/value pair of caller-defined metadata attached to a user.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SetMetadataEntry {
    pub key: String,
    /// Raw value bytes; the service stores them without interpretation.
    pub value: Vec<u8>,
}

pub(crate) static SET_METADATA_ENTRY_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::singular(1, "key", FieldKind::String),
    FieldDescriptor::singular(2, "value", FieldKind::Bytes),
];

pub(crate) static SET_METADATA_ENTRY_DESC: MessageDescriptor = MessageDescriptor::new(
    "SetMetadataEntry",
    SET_METADATA_ENTRY_FIELDS,
    new_boxed::<SetMetadataEntry>,
);

impl Message for SetMetadataEntry {
    fn descriptor() -> &'static MessageDescriptor {
        &SET_METADATA_ENTRY_DESC
    }

    fn field(&self, number: u32) -> Option<FieldView<'_>> {
        match number {
            1 => Some(FieldView::Str(&self.key)),
            2 => Some(FieldView::Bytes(&self.value)),
            _ => None,
        }
    }

    fn set_field(&mut self, number: u32, value: FieldValue) -> Result<(), DecodeError> {
        match (number, value) {
            (1, FieldValue::String(v)) => self.key = v,
            (2, FieldValue::Bytes(v)) => self.value = v,
            (number, _) => {
                return Err(DecodeError::UnexpectedValue {
                    message: "SetMetadataEntry",
                    field: number,
                })
            }
        }
        Ok(())
    }
}

// ── IdpLink ───────────────────────────────────────────────────────────────────

/// Link between a user and an account at an external identity provider.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IdpLink {
    /// Configured identity provider.
    pub idp_id: String,
    /// The user's id *at the provider*.
    pub user_id: String,
    /// The user's display name at the provider.
    pub user_name: String,
}

pub(crate) static IDP_LINK_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::singular(1, "idpId", FieldKind::String),
    FieldDescriptor::singular(2, "userId", FieldKind::String),
    FieldDescriptor::singular(3, "userName", FieldKind::String),
];

pub(crate) static IDP_LINK_DESC: MessageDescriptor =
    MessageDescriptor::new("IdpLink", IDP_LINK_FIELDS, new_boxed::<IdpLink>);

impl Message for IdpLink {
    fn descriptor() -> &'static MessageDescriptor {
        &IDP_LINK_DESC
    }

    fn field(&self, number: u32) -> Option<FieldView<'_>> {
        match number {
            1 => Some(FieldView::Str(&self.idp_id)),
            2 => Some(FieldView::Str(&self.user_id)),
            3 => Some(FieldView::Str(&self.user_name)),
            _ => None,
        }
    }

    fn set_field(&mut self, number: u32, value: FieldValue) -> Result<(), DecodeError> {
        match (number, value) {
            (1, FieldValue::String(v)) => self.idp_id = v,
            (2, FieldValue::String(v)) => self.user_id = v,
            (3, FieldValue::String(v)) => self.user_name = v,
            (number, _) => {
                return Err(DecodeError::UnexpectedValue {
                    message: "IdpLink",
                    field: number,
                })
            }
        }
        Ok(())
    }
}

// ── AddHumanUser ──────────────────────────────────────────────────────────────

/// Creates a human user with profile, email, metadata, and provider links.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AddHumanUserRequest {
    /// Caller-chosen user id; the service generates one when absent.
    pub user_id: Option<String>,
    /// Login name; defaults to the email address when absent.
    pub username: Option<String>,
    pub organization: Option<Organization>,
    pub profile: Option<SetHumanProfile>,
    pub email: Option<SetHumanEmail>,
    pub metadata: Vec<SetMetadataEntry>,
    pub idp_links: Vec<IdpLink>,
}

pub(crate) static ADD_HUMAN_USER_REQUEST_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::optional(1, "userId", FieldKind::String),
    FieldDescriptor::optional(2, "username", FieldKind::String),
    FieldDescriptor::optional(3, "organization", FieldKind::Message(&ORGANIZATION_DESC)),
    FieldDescriptor::optional(4, "profile", FieldKind::Message(&SET_HUMAN_PROFILE_DESC)),
    FieldDescriptor::optional(5, "email", FieldKind::Message(&SET_HUMAN_EMAIL_DESC)),
    FieldDescriptor::repeated(6, "metadata", FieldKind::Message(&SET_METADATA_ENTRY_DESC)),
    FieldDescriptor::repeated(7, "idpLinks", FieldKind::Message(&IDP_LINK_DESC)),
];

pub(crate) static ADD_HUMAN_USER_REQUEST_DESC: MessageDescriptor = MessageDescriptor::new(
    "AddHumanUserRequest",
    ADD_HUMAN_USER_REQUEST_FIELDS,
    new_boxed::<AddHumanUserRequest>,
);

impl Message for AddHumanUserRequest {
    fn descriptor() -> &'static MessageDescriptor {
        &ADD_HUMAN_USER_REQUEST_DESC
    }

    fn field(&self, number: u32) -> Option<FieldView<'_>> {
        match number {
            1 => self.user_id.as_deref().map(FieldView::Str),
            2 => self.username.as_deref().map(FieldView::Str),
            3 => self
                .organization
                .as_ref()
                .map(|m| FieldView::Message(m as &dyn DynMessage)),
            4 => self
                .profile
                .as_ref()
                .map(|m| FieldView::Message(m as &dyn DynMessage)),
            5 => self
                .email
                .as_ref()
                .map(|m| FieldView::Message(m as &dyn DynMessage)),
            6 => Some(FieldView::List(
                self.metadata
                    .iter()
                    .map(|m| FieldView::Message(m as &dyn DynMessage))
                    .collect(),
            )),
            7 => Some(FieldView::List(
                self.idp_links
                    .iter()
                    .map(|m| FieldView::Message(m as &dyn DynMessage))
                    .collect(),
            )),
            _ => None,
        }
    }

    fn set_field(&mut self, number: u32, value: FieldValue) -> Result<(), DecodeError> {
        match (number, value) {
            (1, FieldValue::String(v)) => self.user_id = Some(v),
            (2, FieldValue::String(v)) => self.username = Some(v),
            (3, FieldValue::Message(m)) => self.organization = Some(downcast(m)?),
            (4, FieldValue::Message(m)) => self.profile = Some(downcast(m)?),
            (5, FieldValue::Message(m)) => self.email = Some(downcast(m)?),
            (6, FieldValue::Message(m)) => self.metadata.push(downcast(m)?),
            (7, FieldValue::Message(m)) => self.idp_links.push(downcast(m)?),
            (number, _) => {
                return Err(DecodeError::UnexpectedValue {
                    message: "AddHumanUserRequest",
                    field: number,
                })
            }
        }
        Ok(())
    }

    fn nested_mut(&mut self, number: u32) -> Option<&mut dyn DynMessage> {
        match number {
            3 => self.organization.as_mut().map(|m| m as &mut dyn DynMessage),
            4 => self.profile.as_mut().map(|m| m as &mut dyn DynMessage),
            5 => self.email.as_mut().map(|m| m as &mut dyn DynMessage),
            _ => None,
        }
    }
}

/// Result of creating a human user.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AddHumanUserResponse {
    pub user_id: String,
    pub details: Option<ObjectDetails>,
    /// Verification code, present only when the request asked for it to be
    /// returned instead of sent.
    pub email_code: Option<String>,
}

pub(crate) static ADD_HUMAN_USER_RESPONSE_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::singular(1, "userId", FieldKind::String),
    FieldDescriptor::optional(2, "details", FieldKind::Message(&OBJECT_DETAILS_DESC)),
    FieldDescriptor::optional(3, "emailCode", FieldKind::String),
];

pub(crate) static ADD_HUMAN_USER_RESPONSE_DESC: MessageDescriptor = MessageDescriptor::new(
    "AddHumanUserResponse",
    ADD_HUMAN_USER_RESPONSE_FIELDS,
    new_boxed::<AddHumanUserResponse>,
);

impl Message for AddHumanUserResponse {
    fn descriptor() -> &'static MessageDescriptor {
        &ADD_HUMAN_USER_RESPONSE_DESC
    }

    fn field(&self, number: u32) -> Option<FieldView<'_>> {
        match number {
            1 => Some(FieldView::Str(&self.user_id)),
            2 => self
                .details
                .as_ref()
                .map(|m| FieldView::Message(m as &dyn DynMessage)),
            3 => self.email_code.as_deref().map(FieldView::Str),
            _ => None,
        }
    }

    fn set_field(&mut self, number: u32, value: FieldValue) -> Result<(), DecodeError> {
        match (number, value) {
            (1, FieldValue::String(v)) => self.user_id = v,
            (2, FieldValue::Message(m)) => self.details = Some(downcast(m)?),
            (3, FieldValue::String(v)) => self.email_code = Some(v),
            (number, _) => {
                return Err(DecodeError::UnexpectedValue {
                    message: "AddHumanUserResponse",
                    field: number,
                })
            }
        }
        Ok(())
    }

    fn nested_mut(&mut self, number: u32) -> Option<&mut dyn DynMessage> {
        match number {
            2 => self.details.as_mut().map(|m| m as &mut dyn DynMessage),
            _ => None,
        }
    }
}

// ── GetUserById ───────────────────────────────────────────────────────────────

/// Fetches a single user by id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GetUserByIdRequest {
    pub user_id: String,
}

pub(crate) static GET_USER_BY_ID_REQUEST_FIELDS: &[FieldDescriptor] =
    &[FieldDescriptor::singular(1, "userId", FieldKind::String)];

pub(crate) static GET_USER_BY_ID_REQUEST_DESC: MessageDescriptor = MessageDescriptor::new(
    "GetUserByIdRequest",
    GET_USER_BY_ID_REQUEST_FIELDS,
    new_boxed::<GetUserByIdRequest>,
);

impl Message for GetUserByIdRequest {
    fn descriptor() -> &'static MessageDescriptor {
        &GET_USER_BY_ID_REQUEST_DESC
    }

    fn field(&self, number: u32) -> Option<FieldView<'_>> {
        match number {
            1 => Some(FieldView::Str(&self.user_id)),
            _ => None,
        }
    }

    fn set_field(&mut self, number: u32, value: FieldValue) -> Result<(), DecodeError> {
        match (number, value) {
            (1, FieldValue::String(v)) => self.user_id = v,
            (number, _) => {
                return Err(DecodeError::UnexpectedValue {
                    message: "GetUserByIdRequest",
                    field: number,
                })
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GetUserByIdResponse {
    pub details: Option<ObjectDetails>,
    pub user: Option<User>,
}

pub(crate) static GET_USER_BY_ID_RESPONSE_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::optional(1, "details", FieldKind::Message(&OBJECT_DETAILS_DESC)),
    FieldDescriptor::optional(2, "user", FieldKind::Message(&USER_DESC)),
];

pub(crate) static GET_USER_BY_ID_RESPONSE_DESC: MessageDescriptor = MessageDescriptor::new(
    "GetUserByIdResponse",
    GET_USER_BY_ID_RESPONSE_FIELDS,
    new_boxed::<GetUserByIdResponse>,
);

impl Message for GetUserByIdResponse {
    fn descriptor() -> &'static MessageDescriptor {
        &GET_USER_BY_ID_RESPONSE_DESC
    }

    fn field(&self, number: u32) -> Option<FieldView<'_>> {
        match number {
            1 => self
                .details
                .as_ref()
                .map(|m| FieldView::Message(m as &dyn DynMessage)),
            2 => self
                .user
                .as_ref()
                .map(|m| FieldView::Message(m as &dyn DynMessage)),
            _ => None,
        }
    }

    fn set_field(&mut self, number: u32, value: FieldValue) -> Result<(), DecodeError> {
        match (number, value) {
            (1, FieldValue::Message(m)) => self.details = Some(downcast(m)?),
            (2, FieldValue::Message(m)) => self.user = Some(downcast(m)?),
            (number, _) => {
                return Err(DecodeError::UnexpectedValue {
                    message: "GetUserByIdResponse",
                    field: number,
                })
            }
        }
        Ok(())
    }

    fn nested_mut(&mut self, number: u32) -> Option<&mut dyn DynMessage> {
        match number {
            1 => self.details.as_mut().map(|m| m as &mut dyn DynMessage),
            2 => self.user.as_mut().map(|m| m as &mut dyn DynMessage),
            _ => None,
        }
    }
}

// ── ListUsers ─────────────────────────────────────────────────────────────────

/// Lists users, optionally windowed and filtered by state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListUsersRequest {
    pub query: Option<ListQuery>,
    /// Keep only users in one of these states.  Empty means no filter.
    pub states: Vec<UserState>,
}

pub(crate) static LIST_USERS_REQUEST_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::optional(1, "query", FieldKind::Message(&LIST_QUERY_DESC)),
    FieldDescriptor::repeated(2, "states", FieldKind::Enum(&USER_STATE)),
];

pub(crate) static LIST_USERS_REQUEST_DESC: MessageDescriptor = MessageDescriptor::new(
    "ListUsersRequest",
    LIST_USERS_REQUEST_FIELDS,
    new_boxed::<ListUsersRequest>,
);

impl Message for ListUsersRequest {
    fn descriptor() -> &'static MessageDescriptor {
        &LIST_USERS_REQUEST_DESC
    }

    fn field(&self, number: u32) -> Option<FieldView<'_>> {
        match number {
            1 => self
                .query
                .as_ref()
                .map(|m| FieldView::Message(m as &dyn DynMessage)),
            2 => Some(FieldView::List(
                self.states
                    .iter()
                    .map(|state| FieldView::Enum(state.number()))
                    .collect(),
            )),
            _ => None,
        }
    }

    fn set_field(&mut self, number: u32, value: FieldValue) -> Result<(), DecodeError> {
        match (number, value) {
            (1, FieldValue::Message(m)) => self.query = Some(downcast(m)?),
            (2, FieldValue::Enum(v)) => self.states.push(UserState::from_number(v)),
            (number, _) => {
                return Err(DecodeError::UnexpectedValue {
                    message: "ListUsersRequest",
                    field: number,
                })
            }
        }
        Ok(())
    }

    fn nested_mut(&mut self, number: u32) -> Option<&mut dyn DynMessage> {
        match number {
            1 => self.query.as_mut().map(|m| m as &mut dyn DynMessage),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListUsersResponse {
    pub details: Option<ListDetails>,
    pub result: Vec<User>,
}

pub(crate) static LIST_USERS_RESPONSE_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::optional(1, "details", FieldKind::Message(&LIST_DETAILS_DESC)),
    FieldDescriptor::repeated(2, "result", FieldKind::Message(&USER_DESC)),
];

pub(crate) static LIST_USERS_RESPONSE_DESC: MessageDescriptor = MessageDescriptor::new(
    "ListUsersResponse",
    LIST_USERS_RESPONSE_FIELDS,
    new_boxed::<ListUsersResponse>,
);

impl Message for ListUsersResponse {
    fn descriptor() -> &'static MessageDescriptor {
        &LIST_USERS_RESPONSE_DESC
    }

    fn field(&self, number: u32) -> Option<FieldView<'_>> {
        match number {
            1 => self
                .details
                .as_ref()
                .map(|m| FieldView::Message(m as &dyn DynMessage)),
            2 => Some(FieldView::List(
                self.result
                    .iter()
                    .map(|m| FieldView::Message(m as &dyn DynMessage))
                    .collect(),
            )),
            _ => None,
        }
    }

    fn set_field(&mut self, number: u32, value: FieldValue) -> Result<(), DecodeError> {
        match (number, value) {
            (1, FieldValue::Message(m)) => self.details = Some(downcast(m)?),
            (2, FieldValue::Message(m)) => self.result.push(downcast(m)?),
            (number, _) => {
                return Err(DecodeError::UnexpectedValue {
                    message: "ListUsersResponse",
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
