use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::user::errors::UserIdError;
use crate::user::errors::ValidationError;

/// User aggregate entity.
///
/// Represents a registered user as persisted. Tokens stay empty until the
/// first issuance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub username: Username,
    pub email: EmailAddress,
    pub password_hash: PasswordHash,
    pub token_access: Option<String>,
    pub token_refresh: Option<String>,
    pub user_type: UserType,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a freshly registered user.
    ///
    /// # Arguments
    /// * `username` - Validated username
    /// * `email` - Validated email address
    /// * `password_hash` - bcrypt hash of the password
    /// * `now` - Creation time, used for both timestamps
    ///
    /// # Returns
    /// User with a new random ID, `USER` role and no tokens
    pub fn register(
        username: Username,
        email: EmailAddress,
        password_hash: PasswordHash,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: UserId::new(),
            username,
            email,
            password_hash,
            token_access: None,
            token_refresh: None,
            user_type: UserType::default(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Generate a new random user ID.
    ///
    /// # Returns
    /// UserId with random UUID v4
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a user ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, UserIdError> {
        Uuid::parse_str(s)
            .map(UserId)
            .map_err(|e| UserIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Username value type
///
/// Surrounding whitespace is dropped; whatever remains must be non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Username(String);

impl Username {
    /// Create a new valid username.
    ///
    /// # Errors
    /// * `MissingUsername` - Username is empty or whitespace only
    pub fn new(username: &str) -> Result<Self, ValidationError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(ValidationError::MissingUsername);
        }
        Ok(Self(username.to_string()))
    }

    /// Get username as string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Only a minimal format check: the address must contain `@` and `.`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `MissingEmail` - Email is empty or whitespace only
    /// * `InvalidEmail` - Email lacks `@` or `.`
    pub fn new(email: &str) -> Result<Self, ValidationError> {
        let email = email.trim();
        if email.is_empty() {
            return Err(ValidationError::MissingEmail);
        }
        if !(email.contains('@') && email.contains('.')) {
            return Err(ValidationError::InvalidEmail);
        }
        Ok(Self(email.to_string()))
    }

    /// Get email as string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Plaintext password accepted for hashing. Never printed.
#[derive(Clone)]
pub struct Password(String);

impl Password {
    pub const MIN_LENGTH: usize = 6;
    pub const MAX_BYTES: usize = auth::password::bcrypt::MAX_PASSWORD_BYTES;

    /// # Errors
    /// * `MissingPassword` - Password absent or empty
    /// * `PasswordTooShort` - Fewer than 6 characters
    /// * `PasswordTooLong` - More than 72 bytes, the most bcrypt reads
    pub fn new(password: Option<String>) -> Result<Self, ValidationError> {
        let password = match password {
            Some(p) if !p.is_empty() => p,
            _ => return Err(ValidationError::MissingPassword),
        };

        let length = password.chars().count();
        if length < Self::MIN_LENGTH {
            return Err(ValidationError::PasswordTooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            });
        }

        if password.len() > Self::MAX_BYTES {
            return Err(ValidationError::PasswordTooLong {
                max: Self::MAX_BYTES,
                actual: password.len(),
            });
        }

        Ok(Self(password))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

/// bcrypt output for a stored password. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    pub fn new(hash: String) -> Self {
        Self(hash)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(***)")
    }
}

/// Role of a user account
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UserType {
    Admin,
    #[default]
    User,
}

impl UserType {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserType::Admin => "ADMIN",
            UserType::User => "USER",
        }
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ADMIN" => Ok(UserType::Admin),
            "USER" => Ok(UserType::User),
            other => Err(format!("unknown user type: {}", other)),
        }
    }
}

/// Raw signup payload as received
#[derive(Debug, Clone, Default)]
pub struct SignupInput {
    pub username: String,
    pub email: String,
    pub password: Option<String>,
}

/// User data safe to hand back to callers: no password material.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub id: UserId,
    pub username: Username,
    pub email: EmailAddress,
    pub user_type: UserType,
    pub token_access: Option<String>,
    pub token_refresh: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            user_type: user.user_type,
            token_access: user.token_access,
            token_refresh: user.token_refresh,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}
