use std::sync::Arc;

use async_trait::async_trait;
use auth::TokenClaims;
use auth::TokenIssuer;
use auth::TokenPair;
use auth::TokenSubject;

use crate::domain::user::models::User;
use crate::user::errors::UserError;
use crate::user::ports::TokenServicePort;
use crate::user::ports::UserRepository;

/// Issues session tokens for users and records them in the store.
pub struct TokenService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    issuer: Arc<TokenIssuer>,
}

impl<UR> TokenService<UR>
where
    UR: UserRepository,
{
    pub fn new(repository: Arc<UR>, issuer: Arc<TokenIssuer>) -> Self {
        Self { repository, issuer }
    }
}

#[async_trait]
impl<UR> TokenServicePort for TokenService<UR>
where
    UR: UserRepository,
{
    async fn issue_tokens(&self, user: &User) -> Result<TokenPair, UserError> {
        let subject = TokenSubject::new(user.id, user.email.as_str())
            .with_user_type(user.user_type.as_str());

        let tokens = self.issuer.issue(&subject)?;
        self.repository.update_tokens(&user.id, &tokens).await?;

        tracing::debug!(user_id = %user.id, "Issued session tokens");

        Ok(tokens)
    }

    fn validate_token(&self, token: &str) -> Result<TokenClaims, UserError> {
        Ok(self.issuer.validate(token)?)
    }
}
