use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Password;
use crate::domain::user::models::PasswordHash;
use crate::domain::user::models::SignupInput;
use crate::domain::user::models::User;
use crate::domain::user::models::UserProfile;
use crate::domain::user::models::Username;
use crate::user::errors::UserError;
use crate::user::errors::ValidationError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for user operations.
///
/// Concrete implementation of UserServicePort with dependency injection.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    password_hasher: auth::PasswordHasher,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `password_hasher` - bcrypt hasher carrying the configured work factor
    pub fn new(repository: Arc<UR>, password_hasher: auth::PasswordHasher) -> Self {
        Self {
            repository,
            password_hasher,
        }
    }

    async fn hash_password(&self, password: Password) -> Result<PasswordHash, UserError> {
        let hasher = self.password_hasher;

        // bcrypt is deliberately slow; keep it off the async workers
        let hash = tokio::task::spawn_blocking(move || hasher.hash(password.expose()))
            .await
            .map_err(|e| auth::PasswordError::HashingFailed(e.to_string()))??;

        Ok(PasswordHash::new(hash))
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn sign_up(&self, input: Option<SignupInput>) -> Result<UserProfile, UserError> {
        let input = input.ok_or(ValidationError::InvalidInput)?;

        let username = Username::new(&input.username)?;
        let email = EmailAddress::new(&input.email)?;

        if self.repository.find_by_email(&email).await?.is_some() {
            tracing::debug!(email = %email, "Signup rejected: email already registered");
            return Err(UserError::DuplicateEmail);
        }

        if self.repository.find_by_username(&username).await?.is_some() {
            tracing::debug!(username = %username, "Signup rejected: username taken");
            return Err(UserError::DuplicateUsername);
        }

        let password = Password::new(input.password)?;
        let password_hash = self.hash_password(password).await?;

        let user = User::register(username, email, password_hash, Utc::now());

        // A concurrent signup may win between the checks and this insert;
        // the unique index reports it as DuplicateKey, mapped to the same conflicts.
        self.repository.insert(&user).await?;

        tracing::info!(
            user_id = %user.id,
            username = %user.username,
            "User signed up"
        );

        Ok(UserProfile::from(user))
    }
}
