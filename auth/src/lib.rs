//! Authentication utilities library
//!
//! Provides the credential and token infrastructure used by the user API:
//! - Password hashing (bcrypt with a configurable work factor)
//! - JWT signing and validation restricted to the HMAC algorithm family
//! - Access/refresh token pair issuance against an injectable clock
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new(4);
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Token Pairs
//! ```
//! use auth::{TokenIssuer, TokenSubject};
//!
//! let issuer = TokenIssuer::new(b"secret_key_at_least_32_bytes_long!");
//! let subject = TokenSubject::new("user123", "alice@example.com");
//! let pair = issuer.issue(&subject).unwrap();
//!
//! let claims = issuer.validate(&pair.access_token).unwrap();
//! assert_eq!(claims.uid, "user123");
//! assert_eq!(claims.user_type, "USER");
//! ```

pub mod clock;
pub mod issuer;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use clock::Clock;
pub use clock::ManualClock;
pub use clock::SystemClock;
pub use issuer::TokenIssuer;
pub use issuer::TokenPair;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::TokenClaims;
pub use jwt::TokenSubject;
pub use password::PasswordError;
pub use password::PasswordHasher;
