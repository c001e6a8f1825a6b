//! Open enums used across the user service.
//!
//! All protocol enums are *open*: a wire value outside the declared range
//! decodes to the `Unrecognized` sentinel instead of failing, so a client
//! built against an older schema keeps working when the server starts
//! sending values it has never heard of.  `Unrecognized` re-encodes as
//! `-1`, and appears as the string `"UNRECOGNIZED"` in the JSON form.

use crate::codec::EnumDescriptor;

// ── UserState ─────────────────────────────────────────────────────────────────

/// Lifecycle state of a user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum UserState {
    /// No state recorded.
    #[default]
    Unspecified,
    Active,
    Inactive,
    Deleted,
    Locked,
    Suspended,
    /// Created but has not completed initial setup.
    Initial,
    /// Wire value outside the known range, preserved for forward
    /// compatibility.
    Unrecognized,
}

pub(crate) static USER_STATE: EnumDescriptor = EnumDescriptor {
    name: "UserState",
    values: &[
        (0, "USER_STATE_UNSPECIFIED"),
        (1, "USER_STATE_ACTIVE"),
        (2, "USER_STATE_INACTIVE"),
        (3, "USER_STATE_DELETED"),
        (4, "USER_STATE_LOCKED"),
        (5, "USER_STATE_SUSPENDED"),
        (6, "USER_STATE_INITIAL"),
    ],
};

impl UserState {
    /// Maps a wire number to a state; anything unknown is `Unrecognized`.
    pub fn from_number(number: i32) -> Self {
        match number {
            0 => UserState::Unspecified,
            1 => UserState::Active,
            2 => UserState::Inactive,
            3 => UserState::Deleted,
            4 => UserState::Locked,
            5 => UserState::Suspended,
            6 => UserState::Initial,
            _ => UserState::Unrecognized,
        }
    }

    /// The wire number for this state (`-1` for `Unrecognized`).
    pub fn number(self) -> i32 {
        match self {
            UserState::Unspecified => 0,
            UserState::Active => 1,
            UserState::Inactive => 2,
            UserState::Deleted => 3,
            UserState::Locked => 4,
            UserState::Suspended => 5,
            UserState::Initial => 6,
            UserState::Unrecognized => -1,
        }
    }

    /// The symbolic name used in the JSON form.
    pub fn as_str_name(self) -> &'static str {
        USER_STATE.name_of(self.number()).unwrap_or("UNRECOGNIZED")
    }
}

// ── Gender ────────────────────────────────────────────────────────────────────

/// Self-reported gender on a human profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Gender {
    #[default]
    Unspecified,
    Female,
    Male,
    Diverse,
    Unrecognized,
}

pub(crate) static GENDER: EnumDescriptor = EnumDescriptor {
    name: "Gender",
    values: &[
        (0, "GENDER_UNSPECIFIED"),
        (1, "GENDER_FEMALE"),
        (2, "GENDER_MALE"),
        (3, "GENDER_DIVERSE"),
    ],
};

impl Gender {
    pub fn from_number(number: i32) -> Self {
        match number {
            0 => Gender::Unspecified,
            1 => Gender::Female,
            2 => Gender::Male,
            3 => Gender::Diverse,
            _ => Gender::Unrecognized,
        }
    }

    pub fn number(self) -> i32 {
        match self {
            Gender::Unspecified => 0,
            Gender::Female => 1,
            Gender::Male => 2,
            Gender::Diverse => 3,
            Gender::Unrecognized => -1,
        }
    }

    pub fn as_str_name(self) -> &'static str {
        GENDER.name_of(self.number()).unwrap_or("UNRECOGNIZED")
    }
}

// ── AccessTokenType ───────────────────────────────────────────────────────────

/// Token format issued for a machine user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AccessTokenType {
    #[default]
    Bearer,
    Jwt,
    Unrecognized,
}

pub(crate) static ACCESS_TOKEN_TYPE: EnumDescriptor = EnumDescriptor {
    name: "AccessTokenType",
    values: &[
        (0, "ACCESS_TOKEN_TYPE_BEARER"),
        (1, "ACCESS_TOKEN_TYPE_JWT"),
    ],
};

impl AccessTokenType {
    pub fn from_number(number: i32) -> Self {
        match number {
            0 => AccessTokenType::Bearer,
            1 => AccessTokenType::Jwt,
            _ => AccessTokenType::Unrecognized,
        }
    }

    pub fn number(self) -> i32 {
        match self {
            AccessTokenType::Bearer => 0,
            AccessTokenType::Jwt => 1,
            AccessTokenType::Unrecognized => -1,
        }
    }

    pub fn as_str_name(self) -> &'static str {
        ACCESS_TOKEN_TYPE
            .name_of(self.number())
            .unwrap_or("UNRECOGNIZED")
    }
}
