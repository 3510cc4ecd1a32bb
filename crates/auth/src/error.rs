//! Authentication failure taxonomy.

use thiserror::Error;

/// Every way an authenticated request can fail, as one enum.
///
/// The first five kinds all mean "unauthenticated" at the HTTP boundary;
/// they are kept distinct so callers are forced to handle each one rather
/// than catching a blanket error. `Forbidden` is a valid identity with an
/// insufficient role and must never be conflated with the unauthenticated
/// kinds. `Lookup` is a transient store failure and maps to a server error,
/// not a client error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// The token string is not a structurally valid signed token.
    #[error("malformed token")]
    Malformed,

    /// The token signature does not verify (tampered or wrong key).
    #[error("invalid token signature")]
    InvalidSignature,

    /// The token's expiry instant has passed (inclusive: now == exp counts).
    #[error("token expired")]
    Expired,

    /// The token's subject does not resolve to any principal.
    #[error("unknown subject")]
    UnknownSubject,

    /// The subject resolved, but the principal is not active.
    #[error("principal is inactive")]
    InactivePrincipal,

    /// Valid identity, insufficient role for the requested operation.
    #[error("forbidden")]
    Forbidden,

    /// The principal lookup itself failed (store unavailable).
    #[error("principal lookup failed: {0}")]
    Lookup(String),

    /// Token encoding failed. Should not happen with an HMAC key; surfaced
    /// rather than panicking.
    #[error("token signing failed: {0}")]
    Signing(String),
}

impl AuthError {
    /// True for every kind the boundary must present as a generic 401.
    pub fn is_unauthenticated(&self) -> bool {
        matches!(
            self,
            AuthError::Malformed
                | AuthError::InvalidSignature
                | AuthError::Expired
                | AuthError::UnknownSubject
                | AuthError::InactivePrincipal
        )
    }
}
