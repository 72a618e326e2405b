use thiserror::Error;

/// Error type for JWT operations.
///
/// `TokenExpired` and `TokenInvalid` are kept apart so callers can tell an
/// outdated but genuine token from a forged or malformed one.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is expired")]
    TokenExpired,

    #[error("Token is invalid: {0}")]
    TokenInvalid(String),
}
