//! Signed token codec (HS256 JWT).
//!
//! The signing key lives in an explicit [`SigningContext`] constructed once at
//! process start and passed by reference into every operation — never read
//! from a global inside the codec. Tokens are stateless: nothing is stored
//! server-side and there is no revocation list, so a token stays valid until
//! its embedded expiry.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, errors::ErrorKind};
use serde::{Deserialize, Serialize};

use crate::error::AuthError;

/// Claims embedded in every issued token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the principal's username.
    pub sub: String,

    /// Issued-at (unix seconds).
    pub iat: i64,

    /// Expiry (unix seconds). A token is expired once `now >= exp`.
    pub exp: i64,
}

/// Immutable signing context: key material plus decode validation settings.
///
/// Expiry is checked by [`SigningContext::decode_at`] against an explicit
/// `now` rather than by the JWT library, so the inclusive boundary
/// (`now == exp` counts as expired) holds exactly and with zero leeway.
#[derive(Clone)]
pub struct SigningContext {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl SigningContext {
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is enforced here, not by the library (inclusive comparison).
        validation.validate_exp = false;
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Issue a signed token for `subject`, expiring `ttl` from now.
    pub fn issue(&self, subject: &str, ttl: Duration) -> Result<String, AuthError> {
        self.issue_at(subject, ttl, Utc::now())
    }

    /// Issue with an explicit clock. Prefer this in tests for determinism.
    pub fn issue_at(
        &self,
        subject: &str,
        ttl: Duration,
        now: DateTime<Utc>,
    ) -> Result<String, AuthError> {
        let claims = Claims {
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        };
        jsonwebtoken::encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| AuthError::Signing(e.to_string()))
    }

    /// Verify signature and expiry, returning the claims on success.
    pub fn decode(&self, token: &str) -> Result<Claims, AuthError> {
        self.decode_at(token, Utc::now())
    }

    /// Decode with an explicit clock.
    ///
    /// Signature and structure are checked first; the subject is guaranteed
    /// present and non-empty on success.
    pub fn decode_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, AuthError> {
        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding, &self.validation)
            .map_err(classify_decode_error)?;
        let claims = data.claims;
        if claims.sub.is_empty() {
            return Err(AuthError::Malformed);
        }
        if now.timestamp() >= claims.exp {
            return Err(AuthError::Expired);
        }
        Ok(claims)
    }
}

fn classify_decode_error(err: jsonwebtoken::errors::Error) -> AuthError {
    match err.kind() {
        ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm | ErrorKind::InvalidAlgorithmName => {
            AuthError::InvalidSignature
        }
        ErrorKind::ExpiredSignature => AuthError::Expired,
        _ => AuthError::Malformed,
    }
}
