//! User lifecycle transitions: deactivate, reactivate, lock, unlock, delete.
//!
//! Every request carries just the user id; every response carries the
//! change bookkeeping.  They stay distinct types because each belongs to a
//! distinct method contract that can grow fields independently.

use crate::codec::{
    downcast, new_boxed, DynMessage, FieldDescriptor, FieldKind, FieldValue, FieldView, Message,
    MessageDescriptor,
};
use crate::error::DecodeError;
use crate::user::common::{ObjectDetails, OBJECT_DETAILS_DESC};

macro_rules! user_id_request {
    ($(#[$doc:meta])* $name:ident, $desc:ident, $fields:ident, $type_name:literal) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Default, PartialEq)]
        pub struct $name {
            pub user_id: String,
        }

        pub(crate) static $fields: &[FieldDescriptor] =
            &[FieldDescriptor::singular(1, "userId", FieldKind::String)];

        pub(crate) static $desc: MessageDescriptor =
            MessageDescriptor::new($type_name, $fields, new_boxed::<$name>);

        impl Message for $name {
            fn descriptor() -> &'static MessageDescriptor {
                &$desc
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
                            message: $type_name,
                            field: number,
                        })
                    }
                }
                Ok(())
            }
        }
    };
}

macro_rules! details_response {
    ($(#[$doc:meta])* $name:ident, $desc:ident, $fields:ident, $type_name:literal) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Default, PartialEq)]
        pub struct $name {
            pub details: Option<ObjectDetails>,
        }

        pub(crate) static $fields: &[FieldDescriptor] = &[FieldDescriptor::optional(
            1,
            "details",
            FieldKind::Message(&OBJECT_DETAILS_DESC),
        )];

        pub(crate) static $desc: MessageDescriptor =
            MessageDescriptor::new($type_name, $fields, new_boxed::<$name>);

        impl Message for $name {
            fn descriptor() -> &'static MessageDescriptor {
                &$desc
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
                            message: $type_name,
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
    };
}

user_id_request!(
    /// Puts an active user into the inactive state.
    DeactivateUserRequest,
    DEACTIVATE_USER_REQUEST_DESC,
    DEACTIVATE_USER_REQUEST_FIELDS,
    "DeactivateUserRequest"
);
details_response!(
    DeactivateUserResponse,
    DEACTIVATE_USER_RESPONSE_DESC,
    DEACTIVATE_USER_RESPONSE_FIELDS,
    "DeactivateUserResponse"
);

user_id_request!(
    /// Returns an inactive user to the active state.
    ReactivateUserRequest,
    REACTIVATE_USER_REQUEST_DESC,
    REACTIVATE_USER_REQUEST_FIELDS,
    "ReactivateUserRequest"
);
details_response!(
    ReactivateUserResponse,
    REACTIVATE_USER_RESPONSE_DESC,
    REACTIVATE_USER_RESPONSE_FIELDS,
    "ReactivateUserResponse"
);

user_id_request!(
    /// Locks a user out of every authentication flow.
    LockUserRequest,
    LOCK_USER_REQUEST_DESC,
    LOCK_USER_REQUEST_FIELDS,
    "LockUserRequest"
);
details_response!(
    LockUserResponse,
    LOCK_USER_RESPONSE_DESC,
    LOCK_USER_RESPONSE_FIELDS,
    "LockUserResponse"
);

user_id_request!(
    /// Lifts a lock placed by [`LockUserRequest`].
    UnlockUserRequest,
    UNLOCK_USER_REQUEST_DESC,
    UNLOCK_USER_REQUEST_FIELDS,
    "UnlockUserRequest"
);
details_response!(
    UnlockUserResponse,
    UNLOCK_USER_RESPONSE_DESC,
    UNLOCK_USER_RESPONSE_FIELDS,
    "UnlockUserResponse"
);

user_id_request!(
    /// Removes a user permanently.
    DeleteUserRequest,
    DELETE_USER_REQUEST_DESC,
    DELETE_USER_REQUEST_FIELDS,
    "DeleteUserRequest"
);
details_response!(
    DeleteUserResponse,
    DELETE_USER_RESPONSE_DESC,
    DELETE_USER_RESPONSE_FIELDS,
    "DeleteUserResponse"
);
