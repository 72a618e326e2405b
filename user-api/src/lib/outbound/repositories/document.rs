use auth::TokenPair;
use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::PasswordHash;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserType;
use crate::domain::user::models::Username;
use crate::user::errors::StoreError;

/// Stored shape of a user record.
///
/// Identity columns are optional because a token upsert may create a record
/// for an id that never signed up. Such records fail conversion to [`User`].
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct UserDocument {
    pub id: Uuid,
    pub username: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub token_access: Option<String>,
    pub token_refresh: Option<String>,
    pub user_type: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserDocument {
    /// Record holding nothing but a token pair.
    pub fn from_tokens(id: &UserId, tokens: &TokenPair) -> Self {
        Self {
            id: id.0,
            username: None,
            email: None,
            password_hash: None,
            token_access: Some(tokens.access_token.clone()),
            token_refresh: Some(tokens.refresh_token.clone()),
            user_type: UserType::default().as_str().to_string(),
            created_at: tokens.issued_at,
            updated_at: tokens.issued_at,
        }
    }

    /// Overwrite the stored tokens and bump `updated_at`.
    pub fn apply_tokens(&mut self, tokens: &TokenPair) {
        self.token_access = Some(tokens.access_token.clone());
        self.token_refresh = Some(tokens.refresh_token.clone());
        self.updated_at = tokens.issued_at;
    }

    fn corrupt(&self, reason: impl Into<String>) -> StoreError {
        StoreError::CorruptRecord {
            id: self.id.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<&User> for UserDocument {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.0,
            username: Some(user.username.as_str().to_string()),
            email: Some(user.email.as_str().to_string()),
            password_hash: Some(user.password_hash.as_str().to_string()),
            token_access: user.token_access.clone(),
            token_refresh: user.token_refresh.clone(),
            user_type: user.user_type.as_str().to_string(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl TryFrom<UserDocument> for User {
    type Error = StoreError;

    fn try_from(document: UserDocument) -> Result<Self, Self::Error> {
        let username = document
            .username
            .as_deref()
            .ok_or_else(|| document.corrupt("missing username"))
            .and_then(|u| Username::new(u).map_err(|e| document.corrupt(e.to_string())))?;

        let email = document
            .email
            .as_deref()
            .ok_or_else(|| document.corrupt("missing email"))
            .and_then(|e| EmailAddress::new(e).map_err(|err| document.corrupt(err.to_string())))?;

        let password_hash = document
            .password_hash
            .clone()
            .map(PasswordHash::new)
            .ok_or_else(|| document.corrupt("missing password hash"))?;

        let user_type = document
            .user_type
            .parse::<UserType>()
            .map_err(|e| document.corrupt(e))?;

        Ok(User {
            id: UserId(document.id),
            username,
            email,
            password_hash,
            token_access: document.token_access,
            token_refresh: document.token_refresh,
            user_type,
            created_at: document.created_at,
            updated_at: document.updated_at,
        })
    }
}
