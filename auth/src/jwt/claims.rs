use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Role assigned to subjects that do not specify one.
pub const DEFAULT_USER_TYPE: &str = "USER";

/// Claims carried by access and refresh tokens.
///
/// Identity fields plus the RFC 7519 validity window (`exp`, `iat`, `nbf`)
/// as Unix timestamps.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenClaims {
    pub email: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,

    /// User identifier
    pub uid: String,

    /// Role (`ADMIN` or `USER`)
    pub user_type: String,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Not before (Unix timestamp)
    pub nbf: i64,
}

impl TokenClaims {
    /// Build claims for a subject, valid from `issued_at` for `lifetime`.
    pub fn for_subject(subject: &TokenSubject, issued_at: DateTime<Utc>, lifetime: Duration) -> Self {
        let expiration = issued_at + lifetime;

        Self {
            email: subject.email.clone(),
            first_name: subject.first_name.clone(),
            last_name: subject.last_name.clone(),
            uid: subject.user_id.clone(),
            user_type: subject.user_type.clone(),
            exp: expiration.timestamp(),
            iat: issued_at.timestamp(),
            nbf: issued_at.timestamp(),
        }
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }

    /// Check if token is expired.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp < current_timestamp
    }

    /// Check if token has reached its not-before time.
    pub fn is_active(&self, current_timestamp: i64) -> bool {
        self.nbf <= current_timestamp
    }
}

/// Identity a token pair is issued for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenSubject {
    pub user_id: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub user_type: String,
}

impl TokenSubject {
    /// Create a subject with the default `USER` role and no names.
    pub fn new(user_id: impl ToString, email: impl ToString) -> Self {
        Self {
            user_id: user_id.to_string(),
            email: email.to_string(),
            first_name: None,
            last_name: None,
            user_type: DEFAULT_USER_TYPE.to_string(),
        }
    }

    /// Set first and last name.
    pub fn with_names(mut self, first_name: impl ToString, last_name: impl ToString) -> Self {
        self.first_name = Some(first_name.to_string());
        self.last_name = Some(last_name.to_string());
        self
    }

    /// Set role.
    pub fn with_user_type(mut self, user_type: impl ToString) -> Self {
        self.user_type = user_type.to_string();
        self
    }
}
