use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, errors::ErrorKind};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::ConfigError;

/// Claims carried by every access token.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Error)]
pub enum JwtError {
    #[error("jwt error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
}

/// HS512 access-token codec over a shared secret.
///
/// - `issue`/`validate` are pure over the immutable key material; the service
///   is shared across request workers without synchronization.
/// - Validation leeway is zero: a token is rejected the moment `exp` passes.
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl_ms: i64,
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print key material
        f.debug_struct("JwtService")
            .field("ttl_ms", &self.ttl_ms)
            .finish()
    }
}

impl JwtService {
    /// Build a codec from the shared secret and token lifetime.
    ///
    /// A blank secret is a configuration error; callers are expected to treat
    /// it as fatal before serving traffic.
    pub fn new(secret: &str, ttl_ms: i64) -> Result<Self, ConfigError> {
        if secret.trim().is_empty() {
            return Err(ConfigError::Invalid("JWT_SECRET"));
        }
        if ttl_ms <= 0 {
            return Err(ConfigError::Invalid("JWT_TTL_MS"));
        }

        let mut validation = Validation::new(Algorithm::HS512);
        validation.leeway = 0;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl_ms,
        })
    }

    pub fn ttl_ms(&self) -> i64 {
        self.ttl_ms
    }

    /// Sign a token for `subject`, expiring `ttl_ms` after `issued_at`.
    pub fn issue(&self, subject: &str, issued_at: DateTime<Utc>) -> Result<String, JwtError> {
        let claims = Claims {
            sub: subject.to_owned(),
            iat: issued_at.timestamp(),
            exp: (issued_at + Duration::milliseconds(self.ttl_ms)).timestamp(),
        };

        let token = jsonwebtoken::encode(&Header::new(Algorithm::HS512), &claims, &self.encoding_key)?;
        Ok(token)
    }

    /// Check that `token` is well-formed, carries a valid signature and has
    /// not expired.
    ///
    /// Fail closed: every failure mode (malformed structure, signature
    /// mismatch, expiry, empty input) comes back as `false`, never as an
    /// error the caller has to handle.
    pub fn validate(&self, token: &str) -> bool {
        if token.is_empty() {
            return false;
        }

        match jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &self.validation) {
            Ok(_) => true,
            Err(e) => {
                match e.kind() {
                    ErrorKind::ExpiredSignature => tracing::debug!("expired JWT token"),
                    ErrorKind::InvalidSignature => tracing::debug!("invalid JWT signature"),
                    _ => tracing::debug!(error = %e, "malformed JWT token"),
                }
                false
            }
        }
    }

    /// Read the subject out of a token.
    ///
    /// The token is decoded (and therefore re-verified); an invalid token
    /// yields an error, never a stale or garbage subject. Callers on the
    /// request path validate first and treat an error here as anonymous.
    pub fn extract_subject(&self, token: &str) -> Result<String, JwtError> {
        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &self.validation)?;
        Ok(data.claims.sub)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TTL_MS: i64 = 3_600_000; // 1 hour

    fn codec() -> JwtService {
        JwtService::new("testSecret", TTL_MS).unwrap()
    }

    #[test]
    fn blank_secret_is_a_config_error() {
        assert!(JwtService::new("", TTL_MS).is_err());
        assert!(JwtService::new("   ", TTL_MS).is_err());
    }

    #[test]
    fn non_positive_ttl_is_a_config_error() {
        assert!(JwtService::new("testSecret", 0).is_err());
        assert!(JwtService::new("testSecret", -1).is_err());
    }

    #[test]
    fn issued_token_round_trips_subject() {
        let codec = codec();
        let token = codec.issue("testUser", Utc::now()).unwrap();

        assert!(codec.validate(&token));
        assert_eq!(codec.extract_subject(&token).unwrap(), "testUser");
    }

    #[test]
    fn tampered_token_is_rejected() {
        let codec = codec();
        let token = codec.issue("testUser", Utc::now()).unwrap();

        let tampered = format!("{token}invalidPart");
        assert!(!codec.validate(&tampered));
        assert!(codec.extract_subject(&tampered).is_err());
    }

    #[test]
    fn malformed_token_is_rejected() {
        assert!(!codec().validate("this.is.not.a.jwt"));
    }

    #[test]
    fn empty_token_is_rejected() {
        assert!(!codec().validate(""));
    }

    #[test]
    fn expired_token_is_rejected() {
        let codec = codec();
        // Issued long enough ago that exp is one second in the past.
        let issued_at = Utc::now() - Duration::milliseconds(TTL_MS + 1_000);
        let token = codec.issue("testUser", issued_at).unwrap();

        assert!(!codec.validate(&token));
    }

    #[test]
    fn token_is_valid_until_just_before_expiry() {
        let codec = codec();
        // exp lands one minute in the future; zero leeway must not bite early.
        let issued_at = Utc::now() - Duration::milliseconds(TTL_MS - 60_000);
        let token = codec.issue("testUser", issued_at).unwrap();

        assert!(codec.validate(&token));
    }

    #[test]
    fn token_signed_with_another_secret_is_rejected() {
        let other = JwtService::new("otherSecret", TTL_MS).unwrap();
        let token = other.issue("testUser", Utc::now()).unwrap();

        assert!(!codec().validate(&token));
    }
}
