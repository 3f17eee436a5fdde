//! JWT session token creation and verification.

use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{config::Config, errors::Error};

/// Registered claim names the server always sets itself. Same-named fields in
/// the caller's payload are dropped before signing.
pub const RESERVED_CLAIMS: [&str; 2] = ["exp", "iat"];

/// JWT session claims: the caller's payload plus the registered claims.
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Arbitrary caller-supplied claims, carried through verification verbatim
    #[serde(flatten)]
    pub claims: Map<String, Value>,
    pub exp: i64, // Expiration time
    pub iat: i64, // Issued at
}

impl SessionClaims {
    /// Create new session claims from a caller payload.
    ///
    /// `exp`/`iat` come from the server clock and the configured timeout;
    /// reserved keys in the payload are removed so they cannot collide with
    /// the flattened serialization.
    pub fn new(payload: Map<String, Value>, config: &Config) -> Self {
        let now = Utc::now();
        let exp = now + config.session.timeout;

        let mut claims = payload;
        for reserved in RESERVED_CLAIMS {
            claims.remove(reserved);
        }

        Self {
            claims,
            exp: exp.timestamp(),
            iat: now.timestamp(),
        }
    }
}

/// Create a signed session token embedding the caller's claims
pub fn create_session_token(payload: Map<String, Value>, config: &Config) -> Result<String, Error> {
    let claims = SessionClaims::new(payload, config);

    let key = EncodingKey::from_secret(config.session.secret.as_bytes());
    encode(&Header::default(), &claims, &key).map_err(|e| Error::Internal {
        operation: format!("create JWT: {e}"),
    })
}

/// Verify and decode a session token
pub fn verify_session_token(token: &str, config: &Config) -> Result<SessionClaims, Error> {
    let key = DecodingKey::from_secret(config.session.secret.as_bytes());
    let validation = Validation::default();

    let token_data = decode::<SessionClaims>(token, &key, &validation).map_err(|e| match e.kind() {
        // Client errors (401) - malformed tokens, invalid claims, expired tokens
        jsonwebtoken::errors::ErrorKind::InvalidToken
        | jsonwebtoken::errors::ErrorKind::InvalidSignature
        | jsonwebtoken::errors::ErrorKind::ExpiredSignature
        | jsonwebtoken::errors::ErrorKind::MissingRequiredClaim(_)
        | jsonwebtoken::errors::ErrorKind::InvalidIssuer
        | jsonwebtoken::errors::ErrorKind::InvalidAudience
        | jsonwebtoken::errors::ErrorKind::InvalidSubject
        | jsonwebtoken::errors::ErrorKind::ImmatureSignature
        | jsonwebtoken::errors::ErrorKind::Base64(_)
        | jsonwebtoken::errors::ErrorKind::InvalidAlgorithm => Error::Unauthenticated {
            message: Some("invalid token".to_string()),
        },

        // Server errors (500) - key issues, internal failures
        jsonwebtoken::errors::ErrorKind::InvalidEcdsaKey
        | jsonwebtoken::errors::ErrorKind::InvalidRsaKey(_)
        | jsonwebtoken::errors::ErrorKind::RsaFailedSigning
        | jsonwebtoken::errors::ErrorKind::InvalidAlgorithmName
        | jsonwebtoken::errors::ErrorKind::InvalidKeyFormat
        | jsonwebtoken::errors::ErrorKind::MissingAlgorithm
        | jsonwebtoken::errors::ErrorKind::Json(_)
        | jsonwebtoken::errors::ErrorKind::Utf8(_)
        | jsonwebtoken::errors::ErrorKind::Crypto(_) => Error::Internal {
            operation: format!("JWT verification: {e}"),
        },

        // Catch-all for any future error variants (default to server error for safety)
        _ => Error::Internal {
            operation: format!("JWT verification (unknown error): {e}"),
        },
    })?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;

    fn create_test_config() -> Config {
        let mut config = Config::default();
        config.session.secret = "test-secret-key-for-jwt".to_string();
        config.session.timeout = Duration::from_secs(3600); // 1 hour
        config
    }

    fn sample_payload() -> Map<String, Value> {
        let mut payload = Map::new();
        payload.insert("email".to_string(), json!("runner@example.com"));
        payload.insert("role".to_string(), json!("participant"));
        payload
    }

    #[test]
    fn test_create_and_verify_session_token() {
        let config = create_test_config();

        let token = create_session_token(sample_payload(), &config).unwrap();
        assert!(!token.is_empty());

        let claims = verify_session_token(&token, &config).unwrap();

        assert_eq!(claims.claims.get("email"), Some(&json!("runner@example.com")));
        assert_eq!(claims.claims.get("role"), Some(&json!("participant")));
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_caller_supplied_registered_claims_are_ignored() {
        let config = create_test_config();

        // A caller trying to smuggle in its own expiry must not win
        let mut payload = sample_payload();
        payload.insert("exp".to_string(), json!(1));
        payload.insert("iat".to_string(), json!(1));

        let token = create_session_token(payload, &config).unwrap();
        let claims = verify_session_token(&token, &config).unwrap();

        assert!(claims.exp > Utc::now().timestamp());
        assert!(!claims.claims.contains_key("exp"));
        assert!(!claims.claims.contains_key("iat"));
    }

    #[test]
    fn test_verify_invalid_token() {
        let config = create_test_config();

        let result = verify_session_token("invalid.token.here", &config);
        assert!(matches!(
            result.unwrap_err(),
            Error::Unauthenticated { message: Some(ref m) } if m == "invalid token"
        ));
    }

    #[test]
    fn test_verify_token_wrong_secret() {
        let mut config = create_test_config();

        let token = create_session_token(sample_payload(), &config).unwrap();

        config.session.secret = "different-secret".to_string();
        let result = verify_session_token(&token, &config);
        // Should be Unauthenticated (InvalidSignature), not Internal error
        assert!(matches!(result.unwrap_err(), Error::Unauthenticated { .. }));
    }

    #[test]
    fn test_verify_expired_token() {
        let config = create_test_config();

        // Manually create an expired token by setting exp in the past
        let now = Utc::now();
        let claims = SessionClaims {
            claims: sample_payload(),
            exp: (now - chrono::Duration::seconds(3600)).timestamp(), // 1 hour ago
            iat: now.timestamp(),
        };

        let key = EncodingKey::from_secret(config.session.secret.as_bytes());
        let token = encode(&Header::default(), &claims, &key).unwrap();

        let result = verify_session_token(&token, &config);
        // Should be Unauthenticated (ExpiredSignature), not Internal error
        assert!(matches!(result.unwrap_err(), Error::Unauthenticated { .. }));
    }

    #[test]
    fn test_verify_malformed_token() {
        let config = create_test_config();

        let malformed_tokens = vec!["not.a.token", "invalid", "", "too.many.parts.in.this.token"];

        for token in malformed_tokens {
            let result = verify_session_token(token, &config);
            assert!(
                matches!(result.unwrap_err(), Error::Unauthenticated { .. }),
                "Expected Unauthenticated error for token: {}",
                token
            );
        }
    }
}
