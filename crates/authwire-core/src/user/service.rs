//! The user service's method table.
//!
//! Each method maps one request message type to one response message type
//! over a unary request/response call; there is no streaming.  The actual
//! channel (and its timeouts, retries, and authentication) lives in the
//! client crate — this table only names the contract.

/// One unary method of a service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MethodDescriptor {
    /// Fully qualified service name.
    pub service: &'static str,
    /// Method name within the service.
    pub name: &'static str,
}

impl MethodDescriptor {
    /// Full request path, `/{service}/{method}`.
    pub fn path(&self) -> String {
        format!("/{}/{}", self.service, self.name)
    }
}

/// Fully qualified name of the user service.
pub const SERVICE_NAME: &str = "authwire.user.v1.UserService";

/// All methods of the user service.
pub mod methods {
    use super::{MethodDescriptor, SERVICE_NAME};

    const fn method(name: &'static str) -> MethodDescriptor {
        MethodDescriptor {
            service: SERVICE_NAME,
            name,
        }
    }

    pub const ADD_HUMAN_USER: MethodDescriptor = method("AddHumanUser");
    pub const GET_USER_BY_ID: MethodDescriptor = method("GetUserByID");
    pub const LIST_USERS: MethodDescriptor = method("ListUsers");
    pub const SET_EMAIL: MethodDescriptor = method("SetEmail");
    pub const RESEND_EMAIL_CODE: MethodDescriptor = method("ResendEmailCode");
    pub const VERIFY_EMAIL: MethodDescriptor = method("VerifyEmail");
    pub const DEACTIVATE_USER: MethodDescriptor = method("DeactivateUser");
    pub const REACTIVATE_USER: MethodDescriptor = method("ReactivateUser");
    pub const LOCK_USER: MethodDescriptor = method("LockUser");
    pub const UNLOCK_USER: MethodDescriptor = method("UnlockUser");
    pub const DELETE_USER: MethodDescriptor = method("DeleteUser");
    pub const START_IDENTITY_PROVIDER_INTENT: MethodDescriptor =
        method("StartIdentityProviderIntent");
    pub const RETRIEVE_IDENTITY_PROVIDER_INTENT: MethodDescriptor =
        method("RetrieveIdentityProviderIntent");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_is_slash_service_slash_method() {
        assert_eq!(
            methods::VERIFY_EMAIL.path(),
            "/authwire.user.v1.UserService/VerifyEmail"
        );
    }

    #[test]
    fn test_all_methods_share_the_service_name() {
        for method in [
            methods::ADD_HUMAN_USER,
            methods::GET_USER_BY_ID,
            methods::LIST_USERS,
            methods::SET_EMAIL,
            methods::RESEND_EMAIL_CODE,
            methods::VERIFY_EMAIL,
            methods::DEACTIVATE_USER,
            methods::REACTIVATE_USER,
            methods::LOCK_USER,
            methods::UNLOCK_USER,
            methods::DELETE_USER,
            methods::START_IDENTITY_PROVIDER_INTENT,
            methods::RETRIEVE_IDENTITY_PROVIDER_INTENT,
        ] {
            assert_eq!(method.service, SERVICE_NAME);
        }
    }
}
