//! Identity-provider intent messages.
//!
//! An *intent* is one sign-in attempt at an external provider: the caller
//! starts it (receiving an auth URL or posting credentials directly) and
//! later retrieves what the provider reported about the user.  Whatever
//! the provider sent back verbatim travels in opaque struct payloads
//! (`raw_information`, `attributes`) that the codec never interprets.

use serde_json::Value as JsonValue;

use crate::codec::{
    downcast, new_boxed, DynMessage, FieldDescriptor, FieldKind, FieldValue, FieldView, Message,
    MessageDescriptor,
};
use crate::error::DecodeError;
use crate::user::common::{ObjectDetails, OBJECT_DETAILS_DESC};

// ── Intent inputs ─────────────────────────────────────────────────────────────

/// Where the browser lands after the provider redirect.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RedirectUrls {
    pub success_url: String,
    pub failure_url: String,
}

pub(crate) static REDIRECT_URLS_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::singular(1, "successUrl", FieldKind::String),
    FieldDescriptor::singular(2, "failureUrl", FieldKind::String),
];

pub(crate) static REDIRECT_URLS_DESC: MessageDescriptor =
    MessageDescriptor::new("RedirectUrls", REDIRECT_URLS_FIELDS, new_boxed::<RedirectUrls>);

impl Message for RedirectUrls {
    fn descriptor() -> &'static MessageDescriptor {
        &REDIRECT_URLS_DESC
    }

    fn field(&self, number: u32) -> Option<FieldView<'_>> {
        match number {
            1 => Some(FieldView::Str(&self.success_url)),
            2 => Some(FieldView::Str(&self.failure_url)),
            _ => None,
        }
    }

    fn set_field(&mut self, number: u32, value: FieldValue) -> Result<(), DecodeError> {
        match (number, value) {
            (1, FieldValue::String(v)) => self.success_url = v,
            (2, FieldValue::String(v)) => self.failure_url = v,
            (number, _) => {
                return Err(DecodeError::UnexpectedValue {
                    message: "RedirectUrls",
                    field: number,
                })
            }
        }
        Ok(())
    }
}

/// Credentials for a direct LDAP bind, the non-redirect flow.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LdapCredentials {
    pub username: String,
    pub password: String,
}

pub(crate) static LDAP_CREDENTIALS_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::singular(1, "username", FieldKind::String),
    FieldDescriptor::singular(2, "password", FieldKind::String),
];

pub(crate) static LDAP_CREDENTIALS_DESC: MessageDescriptor = MessageDescriptor::new(
    "LdapCredentials",
    LDAP_CREDENTIALS_FIELDS,
    new_boxed::<LdapCredentials>,
);

impl Message for LdapCredentials {
    fn descriptor() -> &'static MessageDescriptor {
        &LDAP_CREDENTIALS_DESC
    }

    fn field(&self, number: u32) -> Option<FieldView<'_>> {
        match number {
            1 => Some(FieldView::Str(&self.username)),
            2 => Some(FieldView::Str(&self.password)),
            _ => None,
        }
    }

    fn set_field(&mut self, number: u32, value: FieldValue) -> Result<(), DecodeError> {
        match (number, value) {
            (1, FieldValue::String(v)) => self.username = v,
            (2, FieldValue::String(v)) => self.password = v,
            (number, _) => {
                return Err(DecodeError::UnexpectedValue {
                    message: "LdapCredentials",
                    field: number,
                })
            }
        }
        Ok(())
    }
}

// ── StartIdentityProviderIntent ───────────────────────────────────────────────

/// Begins a sign-in attempt at the given provider.
///
/// `urls` (redirect flows) and `ldap` (direct bind) are alternatives; the
/// caller sets the one matching the provider type.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StartIdentityProviderIntentRequest {
    pub idp_id: String,
    pub urls: Option<RedirectUrls>,
    pub ldap: Option<LdapCredentials>,
}

pub(crate) static START_IDP_INTENT_REQUEST_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::singular(1, "idpId", FieldKind::String),
    FieldDescriptor::optional(2, "urls", FieldKind::Message(&REDIRECT_URLS_DESC)),
    FieldDescriptor::optional(3, "ldap", FieldKind::Message(&LDAP_CREDENTIALS_DESC)),
];

pub(crate) static START_IDP_INTENT_REQUEST_DESC: MessageDescriptor = MessageDescriptor::new(
    "StartIdentityProviderIntentRequest",
    START_IDP_INTENT_REQUEST_FIELDS,
    new_boxed::<StartIdentityProviderIntentRequest>,
);

impl Message for StartIdentityProviderIntentRequest {
    fn descriptor() -> &'static MessageDescriptor {
        &START_IDP_INTENT_REQUEST_DESC
    }

    fn field(&self, number: u32) -> Option<FieldView<'_>> {
        match number {
            1 => Some(FieldView::Str(&self.idp_id)),
            2 => self
                .urls
                .as_ref()
                .map(|m| FieldView::Message(m as &dyn DynMessage)),
            3 => self
                .ldap
                .as_ref()
                .map(|m| FieldView::Message(m as &dyn DynMessage)),
            _ => None,
        }
    }

    fn set_field(&mut self, number: u32, value: FieldValue) -> Result<(), DecodeError> {
        match (number, value) {
            (1, FieldValue::String(v)) => self.idp_id = v,
            (2, FieldValue::Message(m)) => self.urls = Some(downcast(m)?),
            (3, FieldValue::Message(m)) => self.ldap = Some(downcast(m)?),
            (number, _) => {
                return Err(DecodeError::UnexpectedValue {
                    message: "StartIdentityProviderIntentRequest",
                    field: number,
                })
            }
        }
        Ok(())
    }

    fn nested_mut(&mut self, number: u32) -> Option<&mut dyn DynMessage> {
        match number {
            2 => self.urls.as_mut().map(|m| m as &mut dyn DynMessage),
            3 => self.ldap.as_mut().map(|m| m as &mut dyn DynMessage),
            _ => None,
        }
    }
}

/// What to do next after starting an intent.
///
/// Redirect flows return `auth_url`; SAML POST bindings return a form in
/// `post_form`; a direct LDAP bind returns neither and the intent is
/// immediately retrievable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StartIdentityProviderIntentResponse {
    pub details: Option<ObjectDetails>,
    /// Provider authorization URL to send the browser to.
    pub auth_url: Option<String>,
    /// Self-submitting HTML form, for POST-binding providers.
    pub post_form: Option<Vec<u8>>,
}

pub(crate) static START_IDP_INTENT_RESPONSE_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::optional(1, "details", FieldKind::Message(&OBJECT_DETAILS_DESC)),
    FieldDescriptor::optional(2, "authUrl", FieldKind::String),
    FieldDescriptor::optional(3, "postForm", FieldKind::Bytes),
];

pub(crate) static START_IDP_INTENT_RESPONSE_DESC: MessageDescriptor = MessageDescriptor::new(
    "StartIdentityProviderIntentResponse",
    START_IDP_INTENT_RESPONSE_FIELDS,
    new_boxed::<StartIdentityProviderIntentResponse>,
);

impl Message for StartIdentityProviderIntentResponse {
    fn descriptor() -> &'static MessageDescriptor {
        &START_IDP_INTENT_RESPONSE_DESC
    }

    fn field(&self, number: u32) -> Option<FieldView<'_>> {
        match number {
            1 => self
                .details
                .as_ref()
                .map(|m| FieldView::Message(m as &dyn DynMessage)),
            2 => self.auth_url.as_deref().map(FieldView::Str),
            3 => self.post_form.as_deref().map(FieldView::Bytes),
            _ => None,
        }
    }

    fn set_field(&mut self, number: u32, value: FieldValue) -> Result<(), DecodeError> {
        match (number, value) {
            (1, FieldValue::Message(m)) => self.details = Some(downcast(m)?),
            (2, FieldValue::String(v)) => self.auth_url = Some(v),
            (3, FieldValue::Bytes(v)) => self.post_form = Some(v),
            (number, _) => {
                return Err(DecodeError::UnexpectedValue {
                    message: "StartIdentityProviderIntentResponse",
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

// ── Access information ────────────────────────────────────────────────────────

/// Tokens obtained from an OAuth/OIDC provider.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IdpOauthAccessInformation {
    pub access_token: String,
    /// Present for OIDC providers only.
    pub id_token: Option<String>,
}

pub(crate) static IDP_OAUTH_ACCESS_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::singular(1, "accessToken", FieldKind::String),
    FieldDescriptor::optional(2, "idToken", FieldKind::String),
];

pub(crate) static IDP_OAUTH_ACCESS_DESC: MessageDescriptor = MessageDescriptor::new(
    "IdpOauthAccessInformation",
    IDP_OAUTH_ACCESS_FIELDS,
    new_boxed::<IdpOauthAccessInformation>,
);

impl Message for IdpOauthAccessInformation {
    fn descriptor() -> &'static MessageDescriptor {
        &IDP_OAUTH_ACCESS_DESC
    }

    fn field(&self, number: u32) -> Option<FieldView<'_>> {
        match number {
            1 => Some(FieldView::Str(&self.access_token)),
            2 => self.id_token.as_deref().map(FieldView::Str),
            _ => None,
        }
    }

    fn set_field(&mut self, number: u32, value: FieldValue) -> Result<(), DecodeError> {
        match (number, value) {
            (1, FieldValue::String(v)) => self.access_token = v,
            (2, FieldValue::String(v)) => self.id_token = Some(v),
            (number, _) => {
                return Err(DecodeError::UnexpectedValue {
                    message: "IdpOauthAccessInformation",
                    field: number,
                })
            }
        }
        Ok(())
    }
}

/// Directory attributes returned by an LDAP bind.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IdpLdapAccessInformation {
    /// Attribute map exactly as the directory returned it.
    pub attributes: Option<serde_json::Map<String, JsonValue>>,
}

pub(crate) static IDP_LDAP_ACCESS_FIELDS: &[FieldDescriptor] =
    &[FieldDescriptor::optional(1, "attributes", FieldKind::Struct)];

pub(crate) static IDP_LDAP_ACCESS_DESC: MessageDescriptor = MessageDescriptor::new(
    "IdpLdapAccessInformation",
    IDP_LDAP_ACCESS_FIELDS,
    new_boxed::<IdpLdapAccessInformation>,
);

impl Message for IdpLdapAccessInformation {
    fn descriptor() -> &'static MessageDescriptor {
        &IDP_LDAP_ACCESS_DESC
    }

    fn field(&self, number: u32) -> Option<FieldView<'_>> {
        match number {
            1 => self.attributes.as_ref().map(FieldView::Struct),
            _ => None,
        }
    }

    fn set_field(&mut self, number: u32, value: FieldValue) -> Result<(), DecodeError> {
        match (number, value) {
            (1, FieldValue::Struct(v)) => self.attributes = Some(v),
            (number, _) => {
                return Err(DecodeError::UnexpectedValue {
                    message: "IdpLdapAccessInformation",
                    field: number,
                })
            }
        }
        Ok(())
    }
}

/// The raw SAML assertion backing a federated sign-in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IdpSamlAccessInformation {
    /// Assertion XML; empty until the provider responds, never absent.
    pub assertion: Vec<u8>,
}

pub(crate) static IDP_SAML_ACCESS_FIELDS: &[FieldDescriptor] =
    &[FieldDescriptor::singular(1, "assertion", FieldKind::Bytes)];

pub(crate) static IDP_SAML_ACCESS_DESC: MessageDescriptor = MessageDescriptor::new(
    "IdpSamlAccessInformation",
    IDP_SAML_ACCESS_FIELDS,
    new_boxed::<IdpSamlAccessInformation>,
);

impl Message for IdpSamlAccessInformation {
    fn descriptor() -> &'static MessageDescriptor {
        &IDP_SAML_ACCESS_DESC
    }

    fn field(&self, number: u32) -> Option<FieldView<'_>> {
        match number {
            1 => Some(FieldView::Bytes(&self.assertion)),
            _ => None,
        }
    }

    fn set_field(&mut self, number: u32, value: FieldValue) -> Result<(), DecodeError> {
        match (number, value) {
            (1, FieldValue::Bytes(v)) => self.assertion = v,
            (number, _) => {
                return Err(DecodeError::UnexpectedValue {
                    message: "IdpSamlAccessInformation",
                    field: number,
                })
            }
        }
        Ok(())
    }
}

// ── IdpInformation ────────────────────────────────────────────────────────────

/// Everything a provider reported about the signed-in user.
///
/// One of `oauth`/`ldap`/`saml` is present depending on the provider type;
/// `raw_information` carries the provider's profile payload verbatim.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IdpInformation {
    pub oauth: Option<IdpOauthAccessInformation>,
    pub idp_id: String,
    /// The user's id at the provider.
    pub user_id: String,
    pub user_name: String,
    pub raw_information: Option<serde_json::Map<String, JsonValue>>,
    pub ldap: Option<IdpLdapAccessInformation>,
    pub saml: Option<IdpSamlAccessInformation>,
}

pub(crate) static IDP_INFORMATION_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::optional(1, "oauth", FieldKind::Message(&IDP_OAUTH_ACCESS_DESC)),
    FieldDescriptor::singular(2, "idpId", FieldKind::String),
    FieldDescriptor::singular(3, "userId", FieldKind::String),
    FieldDescriptor::singular(4, "userName", FieldKind::String),
    FieldDescriptor::optional(5, "rawInformation", FieldKind::Struct),
    FieldDescriptor::optional(6, "ldap", FieldKind::Message(&IDP_LDAP_ACCESS_DESC)),
    FieldDescriptor::optional(7, "saml", FieldKind::Message(&IDP_SAML_ACCESS_DESC)),
];

pub(crate) static IDP_INFORMATION_DESC: MessageDescriptor = MessageDescriptor::new(
    "IdpInformation",
    IDP_INFORMATION_FIELDS,
    new_boxed::<IdpInformation>,
);

impl Message for IdpInformation {
    fn descriptor() -> &'static MessageDescriptor {
        &IDP_INFORMATION_DESC
    }

    fn field(&self, number: u32) -> Option<FieldView<'_>> {
        match number {
            1 => self
                .oauth
                .as_ref()
                .map(|m| FieldView::Message(m as &dyn DynMessage)),
            2 => Some(FieldView::Str(&self.idp_id)),
            3 => Some(FieldView::Str(&self.user_id)),
            4 => Some(FieldView::Str(&self.user_name)),
            5 => self.raw_information.as_ref().map(FieldView::Struct),
            6 => self
                .ldap
                .as_ref()
                .map(|m| FieldView::Message(m as &dyn DynMessage)),
            7 => self
                .saml
                .as_ref()
                .map(|m| FieldView::Message(m as &dyn DynMessage)),
            _ => None,
        }
    }

    fn set_field(&mut self, number: u32, value: FieldValue) -> Result<(), DecodeError> {
        match (number, value) {
            (1, FieldValue::Message(m)) => self.oauth = Some(downcast(m)?),
            (2, FieldValue::String(v)) => self.idp_id = v,
            (3, FieldValue::String(v)) => self.user_id = v,
            (4, FieldValue::String(v)) => self.user_name = v,
            (5, FieldValue::Struct(v)) => self.raw_information = Some(v),
            (6, FieldValue::Message(m)) => self.ldap = Some(downcast(m)?),
            (7, FieldValue::Message(m)) => self.saml = Some(downcast(m)?),
            (number, _) => {
                return Err(DecodeError::UnexpectedValue {
                    message: "IdpInformation",
                    field: number,
                })
            }
        }
        Ok(())
    }

    fn nested_mut(&mut self, number: u32) -> Option<&mut dyn DynMessage> {
        match number {
            1 => self.oauth.as_mut().map(|m| m as &mut dyn DynMessage),
            6 => self.ldap.as_mut().map(|m| m as &mut dyn DynMessage),
            7 => self.saml.as_mut().map(|m| m as &mut dyn DynMessage),
            _ => None,
        }
    }
}

// ── RetrieveIdentityProviderIntent ────────────────────────────────────────────

/// Identifies a started intent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IdpIntent {
    pub idp_intent_id: String,
    /// One-time token proving the caller owns the intent.
    pub idp_intent_token: String,
    /// Set when the provider account is already linked to a local user.
    pub user_id: String,
}

pub(crate) static IDP_INTENT_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::singular(1, "idpIntentId", FieldKind::String),
    FieldDescriptor::singular(2, "idpIntentToken", FieldKind::String),
    FieldDescriptor::singular(3, "userId", FieldKind::String),
];

pub(crate) static IDP_INTENT_DESC: MessageDescriptor =
    MessageDescriptor::new("IdpIntent", IDP_INTENT_FIELDS, new_boxed::<IdpIntent>);

impl Message for IdpIntent {
    fn descriptor() -> &'static MessageDescriptor {
        &IDP_INTENT_DESC
    }

    fn field(&self, number: u32) -> Option<FieldView<'_>> {
        match number {
            1 => Some(FieldView::Str(&self.idp_intent_id)),
            2 => Some(FieldView::Str(&self.idp_intent_token)),
            3 => Some(FieldView::Str(&self.user_id)),
            _ => None,
        }
    }

    fn set_field(&mut self, number: u32, value: FieldValue) -> Result<(), DecodeError> {
        match (number, value) {
            (1, FieldValue::String(v)) => self.idp_intent_id = v,
            (2, FieldValue::String(v)) => self.idp_intent_token = v,
            (3, FieldValue::String(v)) => self.user_id = v,
            (number, _) => {
                return Err(DecodeError::UnexpectedValue {
                    message: "IdpIntent",
                    field: number,
                })
            }
        }
        Ok(())
    }
}

/// Fetches the outcome of a completed intent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RetrieveIdentityProviderIntentRequest {
    pub idp_intent_id: String,
    pub idp_intent_token: String,
}

pub(crate) static RETRIEVE_IDP_INTENT_REQUEST_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::singular(1, "idpIntentId", FieldKind::String),
    FieldDescriptor::singular(2, "idpIntentToken", FieldKind::String),
];

pub(crate) static RETRIEVE_IDP_INTENT_REQUEST_DESC: MessageDescriptor = MessageDescriptor::new(
    "RetrieveIdentityProviderIntentRequest",
    RETRIEVE_IDP_INTENT_REQUEST_FIELDS,
    new_boxed::<RetrieveIdentityProviderIntentRequest>,
);

impl Message for RetrieveIdentityProviderIntentRequest {
    fn descriptor() -> &'static MessageDescriptor {
        &RETRIEVE_IDP_INTENT_REQUEST_DESC
    }

    fn field(&self, number: u32) -> Option<FieldView<'_>> {
        match number {
            1 => Some(FieldView::Str(&self.idp_intent_id)),
            2 => Some(FieldView::Str(&self.idp_intent_token)),
            _ => None,
        }
    }

    fn set_field(&mut self, number: u32, value: FieldValue) -> Result<(), DecodeError> {
        match (number, value) {
            (1, FieldValue::String(v)) => self.idp_intent_id = v,
            (2, FieldValue::String(v)) => self.idp_intent_token = v,
            (number, _) => {
                return Err(DecodeError::UnexpectedValue {
                    message: "RetrieveIdentityProviderIntentRequest",
                    field: number,
                })
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RetrieveIdentityProviderIntentResponse {
    pub details: Option<ObjectDetails>,
    pub idp_information: Option<IdpInformation>,
}

pub(crate) static RETRIEVE_IDP_INTENT_RESPONSE_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::optional(1, "details", FieldKind::Message(&OBJECT_DETAILS_DESC)),
    FieldDescriptor::optional(2, "idpInformation", FieldKind::Message(&IDP_INFORMATION_DESC)),
];

pub(crate) static RETRIEVE_IDP_INTENT_RESPONSE_DESC: MessageDescriptor = MessageDescriptor::new(
    "RetrieveIdentityProviderIntentResponse",
    RETRIEVE_IDP_INTENT_RESPONSE_FIELDS,
    new_boxed::<RetrieveIdentityProviderIntentResponse>,
);

impl Message for RetrieveIdentityProviderIntentResponse {
    fn descriptor() -> &'static MessageDescriptor {
        &RETRIEVE_IDP_INTENT_RESPONSE_DESC
    }

    fn field(&self, number: u32) -> Option<FieldView<'_>> {
        match number {
            1 => self
                .details
                .as_ref()
                .map(|m| FieldView::Message(m as &dyn DynMessage)),
            2 => self
                .idp_information
                .as_ref()
                .map(|m| FieldView::Message(m as &dyn DynMessage)),
            _ => None,
        }
    }

    fn set_field(&mut self, number: u32, value: FieldValue) -> Result<(), DecodeError> {
        match (number, value) {
            (1, FieldValue::Message(m)) => self.details = Some(downcast(m)?),
            (2, FieldValue::Message(m)) => self.idp_information = Some(downcast(m)?),
            (number, _) => {
                return Err(DecodeError::UnexpectedValue {
                    message: "RetrieveIdentityProviderIntentResponse",
                    field: number,
                })
            }
        }
        Ok(())
    }

    fn nested_mut(&mut self, number: u32) -> Option<&mut dyn DynMessage> {
        match number {
            1 => self.details.as_mut().map(|m| m as &mut dyn DynMessage),
            2 => self
                .idp_information
                .as_mut()
                .map(|m| m as &mut dyn DynMessage),
            _ => None,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
