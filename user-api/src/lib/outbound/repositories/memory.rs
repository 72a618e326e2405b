use std::collections::HashMap;

use async_trait::async_trait;
use auth::TokenPair;
use tokio::sync::RwLock;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::outbound::repositories::document::UserDocument;
use crate::user::errors::StoreError;
use crate::user::errors::UniqueKey;
use crate::user::ports::UserRepository;

/// Process-local user store.
///
/// Enforces the same unique keys as the database schema (id, email,
/// username) so both backends reject duplicates identically.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<UserId, UserDocument>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }

    pub async fn contains(&self, id: &UserId) -> bool {
        self.users.read().await.contains_key(id)
    }

    /// Raw stored record, including token-only records.
    pub async fn document(&self, id: &UserId) -> Option<UserDocument> {
        self.users.read().await.get(id).cloned()
    }

    async fn find_by<F>(&self, predicate: F) -> Result<Option<User>, StoreError>
    where
        F: Fn(&UserDocument) -> bool,
    {
        let users = self.users.read().await;
        users
            .values()
            .find(|document| predicate(document))
            .cloned()
            .map(User::try_from)
            .transpose()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, StoreError> {
        self.find_by(|document| document.email.as_deref() == Some(email.as_str()))
            .await
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, StoreError> {
        self.find_by(|document| document.username.as_deref() == Some(username.as_str()))
            .await
    }

    async fn insert(&self, user: &User) -> Result<(), StoreError> {
        let mut users = self.users.write().await;

        if users.contains_key(&user.id) {
            return Err(StoreError::DuplicateKey(UniqueKey::Id));
        }

        for existing in users.values() {
            if existing.email.as_deref() == Some(user.email.as_str()) {
                return Err(StoreError::DuplicateKey(UniqueKey::Email));
            }
            if existing.username.as_deref() == Some(user.username.as_str()) {
                return Err(StoreError::DuplicateKey(UniqueKey::Username));
            }
        }

        users.insert(user.id, UserDocument::from(user));
        Ok(())
    }

    async fn update_tokens(&self, id: &UserId, tokens: &TokenPair) -> Result<(), StoreError> {
        let mut users = self.users.write().await;

        users
            .entry(*id)
            .and_modify(|document| document.apply_tokens(tokens))
            .or_insert_with(|| UserDocument::from_tokens(id, tokens));

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::Duration;
    use chrono::Utc;

    use super::*;
    use crate::domain::user::models::PasswordHash;

    fn user(username: &str, email: &str) -> User {
        User::register(
            Username::new(username).unwrap(),
            EmailAddress::new(email).unwrap(),
            PasswordHash::new("$2b$04$hash".to_string()),
            Utc::now(),
        )
    }

    fn tokens(offset_minutes: i64) -> TokenPair {
        TokenPair {
            access_token: format!("access-{}", offset_minutes),
            refresh_token: format!("refresh-{}", offset_minutes),
            issued_at: Utc::now() + Duration::minutes(offset_minutes),
        }
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let repository = InMemoryUserRepository::new();
        let alice = user("alice", "alice@example.com");

        repository.insert(&alice).await.unwrap();

        let by_email = repository
            .find_by_email(&EmailAddress::new("alice@example.com").unwrap())
            .await
            .unwrap();
        let by_username = repository
            .find_by_username(&Username::new("alice").unwrap())
            .await
            .unwrap();

        assert_eq!(by_email, Some(alice.clone()));
        assert_eq!(by_username, Some(alice));
        assert!(repository
            .find_by_email(&EmailAddress::new("bob@example.com").unwrap())
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_lookups_are_case_sensitive() {
        let repository = InMemoryUserRepository::new();
        repository
            .insert(&user("alice", "alice@example.com"))
            .await
            .unwrap();

        let found = repository
            .find_by_username(&Username::new("Alice").unwrap())
            .await
            .unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_insert_rejects_duplicates() {
        let repository = InMemoryUserRepository::new();
        let alice = user("alice", "alice@example.com");
        repository.insert(&alice).await.unwrap();

        assert_eq!(
            repository.insert(&alice).await,
            Err(StoreError::DuplicateKey(UniqueKey::Id))
        );
        assert_eq!(
            repository
                .insert(&user("other", "alice@example.com"))
                .await,
            Err(StoreError::DuplicateKey(UniqueKey::Email))
        );
        assert_eq!(
            repository
                .insert(&user("alice", "other@example.com"))
                .await,
            Err(StoreError::DuplicateKey(UniqueKey::Username))
        );
        assert_eq!(repository.len().await, 1);
    }

    #[tokio::test]
    async fn test_concurrent_inserts_single_winner() {
        let repository = Arc::new(InMemoryUserRepository::new());

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let repository = repository.clone();
                tokio::spawn(async move {
                    repository
                        .insert(&user(&format!("user{}", i), "same@example.com"))
                        .await
                })
            })
            .collect();

        let mut successes = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                successes += 1;
            }
        }

        assert_eq!(successes, 1);
        assert_eq!(repository.len().await, 1);
    }

    #[tokio::test]
    async fn test_update_tokens_existing_user() {
        let repository = InMemoryUserRepository::new();
        let alice = user("alice", "alice@example.com");
        repository.insert(&alice).await.unwrap();

        let pair = tokens(5);
        repository.update_tokens(&alice.id, &pair).await.unwrap();

        let stored = repository
            .find_by_username(&alice.username)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.token_access.as_deref(), Some("access-5"));
        assert_eq!(stored.token_refresh.as_deref(), Some("refresh-5"));
        assert_eq!(stored.updated_at, pair.issued_at);
        assert_eq!(stored.created_at, alice.created_at);
        assert_eq!(stored.password_hash, alice.password_hash);
    }

    #[tokio::test]
    async fn test_update_tokens_creates_missing_record() {
        let repository = InMemoryUserRepository::new();
        let id = UserId::new();

        repository.update_tokens(&id, &tokens(0)).await.unwrap();
        repository.update_tokens(&id, &tokens(1)).await.unwrap();

        assert!(repository.contains(&id).await);
        assert_eq!(repository.len().await, 1);

        let document = repository.document(&id).await.unwrap();
        assert_eq!(document.token_access.as_deref(), Some("access-1"));
        assert!(document.username.is_none());
    }

    #[tokio::test]
    async fn test_token_only_record_does_not_block_signup() {
        let repository = InMemoryUserRepository::new();
        repository
            .update_tokens(&UserId::new(), &tokens(0))
            .await
            .unwrap();

        assert!(repository
            .insert(&user("alice", "alice@example.com"))
            .await
            .is_ok());
        assert!(!repository.is_empty().await);
    }
}
