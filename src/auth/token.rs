//! Stateless bearer token issuance and verification.
//!
//! Tokens are HS256 JWTs carrying the user identity; validity is purely a
//! function of signature and expiry, nothing is stored server side.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Claims embedded in every access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject — user id.
    pub sub: i32,
    /// Email of the subject at issuance time.
    pub email: String,
    /// Issued-at (Unix timestamp).
    pub iat: i64,
    /// Expiration (Unix timestamp).
    pub exp: i64,
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token expired")]
    Expired,
    #[error("invalid token: {0}")]
    Invalid(String),
    #[error("token generation failed: {0}")]
    Generation(String),
}

/// Issue a signed token for the given identity, valid for `expiry_hours`.
pub fn issue(user_id: i32, email: &str, secret: &str, expiry_hours: u64) -> Result<String, TokenError> {
    let now = Utc::now();
    let claims = Claims {
        sub: user_id,
        email: email.to_string(),
        iat: now.timestamp(),
        exp: (now + Duration::hours(expiry_hours as i64)).timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| TokenError::Generation(e.to_string()))
}

/// Verify signature and expiry, returning the embedded claims.
pub fn verify(token: &str, secret: &str) -> Result<Claims, TokenError> {
    let validation = Validation::default();

    decode::<Claims>(token, &DecodingKey::from_secret(secret.as_bytes()), &validation)
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::Invalid(e.to_string()),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn roundtrip_preserves_claims() {
        let token = issue(42, "a@x.com", SECRET, 24).unwrap();
        let claims = verify(&token, SECRET).unwrap();
        assert_eq!(claims.sub, 42);
        assert_eq!(claims.email, "a@x.com");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn expired_token_is_rejected_as_expired() {
        // Encode claims whose expiry is well past the default leeway.
        let now = Utc::now();
        let claims = Claims {
            sub: 1,
            email: "a@x.com".into(),
            iat: (now - Duration::hours(2)).timestamp(),
            exp: (now - Duration::hours(1)).timestamp(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        assert!(matches!(verify(&token, SECRET), Err(TokenError::Expired)));
    }

    #[test]
    fn wrong_secret_is_invalid() {
        let token = issue(1, "a@x.com", SECRET, 24).unwrap();
        assert!(matches!(
            verify(&token, "other-secret"),
            Err(TokenError::Invalid(_))
        ));
    }

    #[test]
    fn garbage_is_invalid() {
        assert!(matches!(
            verify("not.a.jwt", SECRET),
            Err(TokenError::Invalid(_))
        ));
    }

    #[test]
    fn tampered_payload_is_invalid() {
        let token = issue(1, "a@x.com", SECRET, 24).unwrap();
        let mut parts: Vec<&str> = token.split('.').collect();
        let forged = "eyJzdWIiOjk5OSwiZW1haWwiOiJoYWNrZXJAeC5jb20ifQ";
        parts[1] = forged;
        let tampered = parts.join(".");
        assert!(matches!(
            verify(&tampered, SECRET),
            Err(TokenError::Invalid(_))
        ));
    }
}
