use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use serde::Deserialize;
use serde::Serialize;

use super::errors::JwtError;

/// Algorithms accepted on verification. Anything outside the HMAC family is rejected.
const ACCEPTED_ALGORITHMS: [Algorithm; 3] = [Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];

/// JWT token handler for encoding and decoding tokens.
///
/// Generic over the claims type. Signs with HS256 and verifies HMAC-signed
/// tokens only, so a token whose header names an asymmetric algorithm or
/// `none` never reaches signature checking with the shared secret.
///
/// Time-based claims are not checked here; [`crate::TokenIssuer`] validates
/// them against its clock.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl JwtHandler {
    /// Create a new JWT handler with a secret key.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens (should be stored securely)
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
        }
    }

    /// Encode claims into a JWT token.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn encode<T: Serialize>(&self, claims: &T) -> Result<String, JwtError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Decode a JWT token and verify its signature.
    ///
    /// # Errors
    /// * `TokenInvalid` - Malformed token, foreign algorithm, or signature mismatch
    pub fn decode<T: for<'de> Deserialize<'de>>(&self, token: &str) -> Result<T, JwtError> {
        let mut validation = Validation::new(self.algorithm);
        validation.algorithms = ACCEPTED_ALGORITHMS.to_vec();
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.required_spec_claims.clear();

        // Time claims are not checked here, so every failure is structural
        let token_data = decode::<T>(token, &self.decoding_key, &validation)
            .map_err(|e| JwtError::TokenInvalid(e.to_string()))?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct TestClaims {
        sub: String,
        role: String,
    }

    // {"alg":"RS256","typ":"JWT"}
    const RS256_HEADER: &str = "eyJhbGciOiJSUzI1NiIsInR5cCI6IkpXVCJ9";
    // {"alg":"none","typ":"JWT"}
    const NONE_HEADER: &str = "eyJhbGciOiJub25lIiwidHlwIjoiSldUIn0";

    fn test_claims() -> TestClaims {
        TestClaims {
            sub: "user123".to_string(),
            role: "admin".to_string(),
        }
    }

    fn swap_header(token: &str, header: &str) -> String {
        let mut parts = token.splitn(2, '.');
        parts.next();
        format!("{}.{}", header, parts.next().unwrap())
    }

    #[test]
    fn test_encode_and_decode() {
        let handler = JwtHandler::new(b"my_secret_key_at_least_32_bytes_long!");

        let token = handler.encode(&test_claims()).expect("Failed to encode token");
        assert!(!token.is_empty());

        let decoded: TestClaims = handler.decode(&token).expect("Failed to decode token");
        assert_eq!(decoded, test_claims());
    }

    #[test]
    fn test_decode_invalid_token() {
        let handler = JwtHandler::new(b"my_secret_key_at_least_32_bytes_long!");

        let result = handler.decode::<TestClaims>("invalid.token.here");
        assert!(matches!(result, Err(JwtError::TokenInvalid(_))));
    }

    #[test]
    fn test_decode_with_wrong_secret() {
        let handler1 = JwtHandler::new(b"secret1_at_least_32_bytes_long_key!");
        let handler2 = JwtHandler::new(b"secret2_at_least_32_bytes_long_key!");

        let token = handler1.encode(&test_claims()).expect("Failed to encode token");

        let result = handler2.decode::<TestClaims>(&token);
        assert!(matches!(result, Err(JwtError::TokenInvalid(_))));
    }

    #[test]
    fn test_decode_rejects_asymmetric_algorithm_header() {
        let handler = JwtHandler::new(b"my_secret_key_at_least_32_bytes_long!");
        let token = handler.encode(&test_claims()).unwrap();

        let forged = swap_header(&token, RS256_HEADER);

        let result = handler.decode::<TestClaims>(&forged);
        assert!(matches!(result, Err(JwtError::TokenInvalid(_))));
    }

    #[test]
    fn test_decode_rejects_none_algorithm_header() {
        let handler = JwtHandler::new(b"my_secret_key_at_least_32_bytes_long!");
        let token = handler.encode(&test_claims()).unwrap();

        let forged = swap_header(&token, NONE_HEADER);

        let result = handler.decode::<TestClaims>(&forged);
        assert!(matches!(result, Err(JwtError::TokenInvalid(_))));
    }

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct TimedClaims {
        sub: String,
        exp: i64,
    }

    #[test]
    fn test_decode_ignores_past_expiry() {
        let handler = JwtHandler::new(b"my_secret_key_at_least_32_bytes_long!");
        let claims = TimedClaims {
            sub: "user123".to_string(),
            exp: 1_000_000,
        };
        let token = handler.encode(&claims).unwrap();

        let decoded: TimedClaims = handler.decode(&token).expect("Expiry is not checked here");
        assert_eq!(decoded, claims);
    }

    #[test]
    fn test_token_header_declares_hs256() {
        let handler = JwtHandler::new(b"my_secret_key_at_least_32_bytes_long!");
        let token = handler.encode(&test_claims()).unwrap();

        let header = jsonwebtoken::decode_header(&token).unwrap();
        assert_eq!(header.alg, Algorithm::HS256);
    }
}
