use std::fmt;

use thiserror::Error;

/// Error for signup input that fails shape validation
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("invalid input data")]
    InvalidInput,

    #[error("user name is required")]
    MissingUsername,

    #[error("email is required")]
    MissingEmail,

    #[error("invalid email format")]
    InvalidEmail,

    #[error("password is required")]
    MissingPassword,

    #[error("password must be at least {min} characters")]
    PasswordTooShort { min: usize, actual: usize },

    #[error("password must be at most {max} bytes")]
    PasswordTooLong { max: usize, actual: usize },
}

/// Error for UserId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Unique index a write collided with
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UniqueKey {
    Id,
    Email,
    Username,
    Other(String),
}

impl fmt::Display for UniqueKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UniqueKey::Id => f.write_str("id"),
            UniqueKey::Email => f.write_str("email"),
            UniqueKey::Username => f.write_str("username"),
            UniqueKey::Other(name) => f.write_str(name),
        }
    }
}

/// Error for user store operations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Duplicate key on {0}")]
    DuplicateKey(UniqueKey),

    #[error("Corrupt user record {id}: {reason}")]
    CorruptRecord { id: String, reason: String },

    #[error("Database error: {0}")]
    Backend(String),
}

/// Classification of a [`UserError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Conflict,
    Credential,
    Store,
    Token,
}

impl ErrorKind {
    /// Whether the caller, not the service, is at fault.
    pub fn is_client_error(self) -> bool {
        matches!(
            self,
            ErrorKind::Validation | ErrorKind::Conflict | ErrorKind::Token
        )
    }
}

/// Top-level error for all user-related operations
#[derive(Debug, Clone, Error)]
pub enum UserError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Invalid user ID: {0}")]
    InvalidUserId(#[from] UserIdError),

    #[error("user with this email already exists")]
    DuplicateEmail,

    #[error("username already taken")]
    DuplicateUsername,

    #[error("user already exists")]
    DuplicateRecord,

    #[error("failed to hash password: {0}")]
    Credential(#[from] auth::PasswordError),

    #[error("{0}")]
    Store(StoreError),

    #[error("{0}")]
    Token(#[from] auth::JwtError),
}

impl UserError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            UserError::Validation(_) | UserError::InvalidUserId(_) => ErrorKind::Validation,
            UserError::DuplicateEmail | UserError::DuplicateUsername | UserError::DuplicateRecord => {
                ErrorKind::Conflict
            }
            UserError::Credential(_) => ErrorKind::Credential,
            UserError::Store(_) => ErrorKind::Store,
            UserError::Token(_) => ErrorKind::Token,
        }
    }

    pub fn is_client_error(&self) -> bool {
        self.kind().is_client_error()
    }
}

/// Unique-index violations surface as the same conflicts the pre-insert checks report.
impl From<StoreError> for UserError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateKey(UniqueKey::Email) => UserError::DuplicateEmail,
            StoreError::DuplicateKey(UniqueKey::Username) => UserError::DuplicateUsername,
            StoreError::DuplicateKey(_) => UserError::DuplicateRecord,
            other => UserError::Store(other),
        }
    }
}
