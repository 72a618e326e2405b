use std::sync::Arc;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use crate::clock::Clock;
use crate::clock::SystemClock;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::jwt::TokenClaims;
use crate::jwt::TokenSubject;

/// Default access token lifetime.
pub const ACCESS_TOKEN_TTL_HOURS: i64 = 24;

/// Default refresh token lifetime (7 days).
pub const REFRESH_TOKEN_TTL_HOURS: i64 = 168;

/// Signed access/refresh tokens issued together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    /// Short-lived JWT access token
    pub access_token: String,
    /// Long-lived JWT refresh token
    pub refresh_token: String,
    /// Moment both tokens were issued
    pub issued_at: DateTime<Utc>,
}

/// Issues and validates access/refresh token pairs.
///
/// Both tokens share one secret and differ only in their validity window.
/// Expiry and not-before are checked against the injected [`Clock`].
pub struct TokenIssuer {
    jwt_handler: JwtHandler,
    access_ttl: Duration,
    refresh_ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl TokenIssuer {
    /// Create an issuer with the default lifetimes and the system clock.
    ///
    /// # Arguments
    /// * `secret` - Shared HMAC secret
    pub fn new(secret: &[u8]) -> Self {
        Self {
            jwt_handler: JwtHandler::new(secret),
            access_ttl: Duration::hours(ACCESS_TOKEN_TTL_HOURS),
            refresh_ttl: Duration::hours(REFRESH_TOKEN_TTL_HOURS),
            clock: Arc::new(SystemClock),
        }
    }

    /// Replace the time source.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Set the access token lifetime, replacing the 24 hour default.
    ///
    /// The refresh lifetime is unaffected.
    pub fn with_access_ttl(mut self, ttl: Duration) -> Self {
        self.access_ttl = ttl;
        self
    }

    pub fn access_ttl(&self) -> Duration {
        self.access_ttl
    }

    pub fn refresh_ttl(&self) -> Duration {
        self.refresh_ttl
    }

    /// Issue an access and a refresh token for a subject.
    ///
    /// # Arguments
    /// * `subject` - Identity embedded in both tokens
    ///
    /// # Returns
    /// TokenPair stamped with the issuance time
    ///
    /// # Errors
    /// * `EncodingFailed` - Token signing failed
    pub fn issue(&self, subject: &TokenSubject) -> Result<TokenPair, JwtError> {
        let issued_at = self.clock.now();

        let access_claims = TokenClaims::for_subject(subject, issued_at, self.access_ttl);
        let refresh_claims = TokenClaims::for_subject(subject, issued_at, self.refresh_ttl);

        let access_token = self.jwt_handler.encode(&access_claims)?;
        let refresh_token = self.jwt_handler.encode(&refresh_claims)?;

        Ok(TokenPair {
            access_token,
            refresh_token,
            issued_at,
        })
    }

    /// Validate a token and return its claims.
    ///
    /// # Errors
    /// * `TokenInvalid` - Malformed, wrongly signed, foreign algorithm, or not yet valid
    /// * `TokenExpired` - Signature is genuine but `exp` has passed
    pub fn validate(&self, token: &str) -> Result<TokenClaims, JwtError> {
        let claims: TokenClaims = self.jwt_handler.decode(token)?;
        let now = self.clock.now().timestamp();

        if claims.is_expired(now) {
            return Err(JwtError::TokenExpired);
        }

        if !claims.is_active(now) {
            return Err(JwtError::TokenInvalid("Token is not valid yet".to_string()));
        }

        Ok(claims)
    }
}
