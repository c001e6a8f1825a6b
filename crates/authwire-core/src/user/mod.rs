//! The user-management protocol surface.
//!
//! Message and enum definitions plus the fixed method table of the user
//! service.  Every type here is a plain value — construction, comparison,
//! and cloning carry no protocol logic; the codec drives everything through
//! the static descriptor tables each type registers.

pub mod account;
pub mod admin;
pub mod common;
pub mod email;
pub mod enums;
pub mod idp;
pub mod service;
pub mod types;

pub use account::{
    AddHumanUserRequest, AddHumanUserResponse, GetUserByIdRequest, GetUserByIdResponse, IdpLink,
    ListUsersRequest, ListUsersResponse, SetHumanProfile, SetMetadataEntry,
};
pub use admin::{
    DeactivateUserRequest, DeactivateUserResponse, DeleteUserRequest, DeleteUserResponse,
    LockUserRequest, LockUserResponse, ReactivateUserRequest, ReactivateUserResponse,
    UnlockUserRequest, UnlockUserResponse,
};
pub use common::{ListDetails, ListQuery, ObjectDetails, Organization};
pub use email::{
    ResendEmailCodeRequest, ResendEmailCodeResponse, ReturnEmailVerificationCode,
    SendEmailVerificationCode, SetEmailRequest, SetEmailResponse, SetHumanEmail,
    VerifyEmailRequest, VerifyEmailResponse,
};
pub use enums::{AccessTokenType, Gender, UserState};
pub use idp::{
    IdpInformation, IdpIntent, IdpLdapAccessInformation, IdpOauthAccessInformation,
    IdpSamlAccessInformation, LdapCredentials, RedirectUrls,
    RetrieveIdentityProviderIntentRequest, RetrieveIdentityProviderIntentResponse,
    StartIdentityProviderIntentRequest, StartIdentityProviderIntentResponse,
};
pub use service::{methods, MethodDescriptor, SERVICE_NAME};
pub use types::{HumanEmail, HumanProfile, HumanUser, MachineUser, User};
