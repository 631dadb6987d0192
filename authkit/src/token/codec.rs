use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::TokenError;

/// Signs and verifies compact tokens with a symmetric secret.
///
/// Uses HS256 (HMAC with SHA-256). The secret is injected once at
/// construction and never rotated at runtime; every token this codec has
/// signed verifies against the same secret.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl TokenCodec {
    /// Create a codec from the process-wide signing secret.
    ///
    /// The secret should be at least 256 bits and come from configuration,
    /// never from source.
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
        }
    }

    /// Sign a claim set into a compact token string.
    ///
    /// # Errors
    /// * `EncodingFailed` - Claims could not be serialized and signed
    pub fn sign(&self, claims: &Claims) -> Result<String, TokenError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))
    }

    /// Verify a token's signature and expiry and return its claims.
    ///
    /// # Errors
    /// * `Expired` - Signature is valid but `exp` is in the past
    /// * `InvalidSignature` - Token was not signed with this secret
    /// * `DecodingFailed` - Token is malformed or its claims do not parse
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let validation = Validation::new(self.algorithm);

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                _ => TokenError::DecodingFailed(e.to_string()),
            })
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::token::claims::TokenKind;

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    #[test]
    fn test_sign_and_verify_round_trip() {
        let codec = TokenCodec::new(SECRET);
        let claims = Claims::new("admin", TokenKind::Refresh);

        let token = codec.sign(&claims).expect("Failed to sign token");
        assert!(!token.is_empty());

        let decoded = codec.verify(&token).expect("Failed to verify token");
        assert_eq!(decoded, claims);
    }

    #[test]
    fn test_verify_malformed_token() {
        let codec = TokenCodec::new(SECRET);

        let result = codec.verify("not.a.token");
        assert!(matches!(result, Err(TokenError::DecodingFailed(_))));
    }

    #[test]
    fn test_verify_wrong_secret() {
        let codec = TokenCodec::new(SECRET);
        let other = TokenCodec::new(b"another_secret_at_least_32_bytes!");

        let token = codec
            .sign(&Claims::new("admin", TokenKind::Access))
            .expect("Failed to sign token");

        let result = other.verify(&token);
        assert!(matches!(result, Err(TokenError::InvalidSignature)));
    }

    #[test]
    fn test_verify_expired_token() {
        let codec = TokenCodec::new(SECRET);
        let expired = Claims::new("admin", TokenKind::Refresh)
            .with_expiration(Utc::now().timestamp() - 24 * 60 * 60);

        let token = codec.sign(&expired).expect("Failed to sign token");

        let result = codec.verify(&token);
        assert!(matches!(result, Err(TokenError::Expired)));
    }

    #[test]
    fn test_verify_unknown_kind() {
        // A token whose `type` claim is neither access nor refresh must not
        // deserialize into the typed claim set.
        let codec = TokenCodec::new(SECRET);

        #[derive(serde::Serialize)]
        struct LooseClaims {
            sub: &'static str,
            exp: i64,
            r#type: &'static str,
        }

        let token = encode(
            &Header::new(Algorithm::HS256),
            &LooseClaims {
                sub: "admin",
                exp: Utc::now().timestamp() + 3600,
                r#type: "bogus-kind",
            },
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();

        let result = codec.verify(&token);
        assert!(matches!(result, Err(TokenError::DecodingFailed(_))));
    }
}
