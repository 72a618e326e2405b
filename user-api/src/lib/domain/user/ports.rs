use async_trait::async_trait;
use auth::TokenClaims;
use auth::TokenPair;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::SignupInput;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserProfile;
use crate::domain::user::models::Username;
use crate::user::errors::StoreError;
use crate::user::errors::UserError;

/// Port for user domain service operations.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Register a new user.
    ///
    /// # Arguments
    /// * `input` - Raw signup payload, `None` when the request carried none
    ///
    /// # Returns
    /// Sanitized profile of the created user
    ///
    /// # Errors
    /// * `Validation` - Payload absent, or username/email/password invalid
    /// * `DuplicateEmail` - Email is already registered
    /// * `DuplicateUsername` - Username is already taken
    /// * `Credential` - Password hashing failed
    /// * `Store` - Store operation failed
    async fn sign_up(&self, input: Option<SignupInput>) -> Result<UserProfile, UserError>;
}

/// Port for issuing and checking session tokens.
#[async_trait]
pub trait TokenServicePort: Send + Sync + 'static {
    /// Issue an access/refresh pair for a user and store it on the user record.
    ///
    /// # Errors
    /// * `Token` - Signing failed
    /// * `Store` - Persisting the tokens failed
    async fn issue_tokens(&self, user: &User) -> Result<TokenPair, UserError>;

    /// Validate a token issued by this service.
    ///
    /// # Errors
    /// * `Token` - Token invalid or expired
    fn validate_token(&self, token: &str) -> Result<TokenClaims, UserError>;
}

/// Persistence operations for user aggregate.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Retrieve user by email address.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `Backend` - Store operation failed
    /// * `CorruptRecord` - Stored record could not be decoded
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, StoreError>;

    /// Retrieve user by username.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `Backend` - Store operation failed
    /// * `CorruptRecord` - Stored record could not be decoded
    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, StoreError>;

    /// Persist new user to storage.
    ///
    /// # Errors
    /// * `DuplicateKey` - A unique index (id, email, username) rejected the record
    /// * `Backend` - Store operation failed
    async fn insert(&self, user: &User) -> Result<(), StoreError>;

    /// Store a token pair against a user id, creating the record if absent.
    ///
    /// Also moves `updated_at` to the pair's issuance time.
    ///
    /// # Errors
    /// * `Backend` - Store operation failed
    async fn update_tokens(&self, id: &UserId, tokens: &TokenPair) -> Result<(), StoreError>;
}
