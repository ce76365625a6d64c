//! User accounts.
//!
//! Users carry a bcrypt password hash which never leaves the domain: views
//! built by inbound adapters expose every field except `password_hash`.
//! Plain-text passwords only exist inside [`UserDraft`] and are wiped on
//! drop.

use std::fmt;
use std::ops::RangeInclusive;

use uuid::Uuid;
use zeroize::Zeroizing;

use super::search::SortField;
use super::validation::{DraftValidationError, FieldChecks};

pub const PERSON_NAME_LENGTH: RangeInclusive<usize> = 3..=255;
pub const USERNAME_LENGTH: RangeInclusive<usize> = 3..=50;
pub const EMAIL_LENGTH: RangeInclusive<usize> = 3..=50;
/// Minimum password length, in characters.
pub const PASSWORD_MIN: usize = 8;
/// bcrypt ignores input past this many bytes.
pub const PASSWORD_MAX_BYTES: usize = 72;

/// Stored user account. `username` and `email` are each unique.
#[derive(Clone, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Raw user input prior to validation.
#[derive(Default)]
pub struct UserFields {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    pub password: Option<String>,
}

/// Validated user input.
///
/// `password` is mandatory for new accounts and optional on update, where
/// its absence keeps the stored hash.
pub struct UserDraft {
    first_name: String,
    last_name: String,
    username: String,
    email: String,
    password: Option<Zeroizing<String>>,
}

impl UserDraft {
    /// Validate input for a new account.
    pub fn for_create(fields: UserFields) -> Result<Self, DraftValidationError> {
        Self::validate(fields, true)
    }

    /// Validate input for replacing an existing account.
    pub fn for_update(fields: UserFields) -> Result<Self, DraftValidationError> {
        Self::validate(fields, false)
    }

    fn validate(fields: UserFields, password_required: bool) -> Result<Self, DraftValidationError> {
        let UserFields {
            first_name,
            last_name,
            username,
            email,
            password,
        } = fields;
        let password = password.map(Zeroizing::new);

        let mut checks = FieldChecks::new();
        let first_name = checks.required_text("firstName", &first_name, PERSON_NAME_LENGTH);
        let last_name = checks.required_text("lastName", &last_name, PERSON_NAME_LENGTH);
        let username = checks.required_text("username", &username, USERNAME_LENGTH);
        let email = checks.required_text("email", &email, EMAIL_LENGTH);
        if !email.is_empty() {
            checks.format("email", email.contains('@'), "email must contain '@'");
        }
        match password.as_deref() {
            None if password_required => checks.missing("password"),
            None => {}
            Some(value) if value.chars().count() < PASSWORD_MIN => checks.length_at_least(
                "password",
                PASSWORD_MIN,
            ),
            Some(value) if value.len() > PASSWORD_MAX_BYTES => {
                checks.length_at_most_bytes("password", PASSWORD_MAX_BYTES);
            }
            Some(_) => {}
        }

        checks.finish(Self {
            first_name,
            last_name,
            username,
            email,
            password,
        })
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// Plain-text password, when one was supplied.
    pub fn password(&self) -> Option<&str> {
        self.password.as_deref().map(String::as_str)
    }

    /// Materialise the draft with an already computed hash.
    pub fn into_user(self, id: Uuid, password_hash: String) -> User {
        User {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            username: self.username,
            email: self.email,
            password_hash,
        }
    }
}

impl fmt::Debug for UserDraft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserDraft")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserSort {
    Id,
    FirstName,
    LastName,
    Username,
    Email,
}

impl SortField for UserSort {
    const DEFAULT: Self = Self::FirstName;
    const DEFAULT_PAGE_SIZE: u32 = 10;
    const ALL: &'static [Self] = &[
        Self::Id,
        Self::FirstName,
        Self::LastName,
        Self::Username,
        Self::Email,
    ];

    fn wire_name(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::Username => "username",
            Self::Email => "email",
        }
    }
}
