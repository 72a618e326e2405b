use super::errors::PasswordError;

/// Largest password bcrypt consumes; longer input would be silently truncated.
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Work factor used when none is configured.
pub const DEFAULT_COST: u32 = 12;

/// Password hashing implementation.
///
/// Wraps bcrypt with a fixed work factor. Every hash carries its own random salt,
/// so hashing the same password twice yields two different strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    /// Create a password hasher with the given bcrypt work factor.
    ///
    /// The cost is not checked here; bcrypt rejects unsupported values when hashing.
    ///
    /// # Arguments
    /// * `cost` - bcrypt work factor (log2 of the number of rounds)
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// Configured work factor.
    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Hash a plaintext password.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to hash
    ///
    /// # Returns
    /// Modular crypt format hash (`$2b$<cost>$<salt><hash>`)
    ///
    /// # Errors
    /// * `TooLong` - Password exceeds 72 bytes
    /// * `HashingFailed` - bcrypt rejected the work factor or input
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        if password.len() > MAX_PASSWORD_BYTES {
            return Err(PasswordError::TooLong {
                max: MAX_PASSWORD_BYTES,
                actual: password.len(),
            });
        }

        ::bcrypt::hash(password, self.cost)
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a password against a stored hash.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `hash` - Stored bcrypt hash
    ///
    /// # Returns
    /// True if password matches, false otherwise
    ///
    /// # Errors
    /// * `VerificationFailed` - Hash format is invalid
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError> {
        ::bcrypt::verify(password, hash).map_err(|e| {
            PasswordError::VerificationFailed(format!("Invalid password hash: {}", e))
        })
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(DEFAULT_COST)
    }
}
