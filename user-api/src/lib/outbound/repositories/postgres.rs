use async_trait::async_trait;
use auth::TokenPair;
use sqlx::PgPool;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserRepository;
use crate::outbound::repositories::document::UserDocument;
use crate::user::errors::StoreError;
use crate::user::errors::UniqueKey;

const SELECT_USER: &str = r#"
    SELECT id, username, email, password_hash, token_access, token_refresh,
           user_type, created_at, updated_at
    FROM users
"#;

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_one_where(
        &self,
        column: &str,
        value: &str,
    ) -> Result<Option<User>, StoreError> {
        let query = format!("{} WHERE {} = $1 LIMIT 1", SELECT_USER, column);

        let document = sqlx::query_as::<_, UserDocument>(&query)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        document.map(User::try_from).transpose()
    }
}

/// Translate driver errors, naming the unique index on violations.
fn map_sqlx_error(e: sqlx::Error) -> StoreError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            let key = match db_err.constraint() {
                Some("users_pkey") => UniqueKey::Id,
                Some("users_email_key") => UniqueKey::Email,
                Some("users_username_key") => UniqueKey::Username,
                other => UniqueKey::Other(other.unwrap_or("unknown").to_string()),
            };
            return StoreError::DuplicateKey(key);
        }
    }
    StoreError::Backend(e.to_string())
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, StoreError> {
        self.fetch_one_where("email", email.as_str()).await
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, StoreError> {
        self.fetch_one_where("username", username.as_str()).await
    }

    async fn insert(&self, user: &User) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, username, email, password_hash, token_access,
                               token_refresh, user_type, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(user.id.0)
        .bind(user.username.as_str())
        .bind(user.email.as_str())
        .bind(user.password_hash.as_str())
        .bind(user.token_access.as_deref())
        .bind(user.token_refresh.as_deref())
        .bind(user.user_type.as_str())
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(())
    }

    async fn update_tokens(&self, id: &UserId, tokens: &TokenPair) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, token_access, token_refresh, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $4)
            ON CONFLICT (id) DO UPDATE
            SET token_access = EXCLUDED.token_access,
                token_refresh = EXCLUDED.token_refresh,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(id.0)
        .bind(tokens.access_token.as_str())
        .bind(tokens.refresh_token.as_str())
        .bind(tokens.issued_at)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(())
    }
}
