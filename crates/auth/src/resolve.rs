//! Bearer-token → principal resolution.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::error::AuthError;
use crate::principal::Principal;
use crate::token::SigningContext;

/// Transient failure inside the user store.
///
/// Deliberately separate from [`AuthError`]'s authentication kinds: a store
/// outage must reach the boundary as a server error, not as a 401.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct LookupFailure {
    message: String,
}

impl LookupFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

/// Capability over the user store: subject identifier → principal.
///
/// `Ok(None)` means the subject does not exist; `Err` means the store itself
/// could not answer.
#[async_trait]
pub trait PrincipalSource: Send + Sync {
    async fn principal_by_subject(&self, subject: &str)
    -> Result<Option<Principal>, LookupFailure>;
}

/// Resolve a bearer token into an active principal.
///
/// Decode failures propagate unchanged. Exactly one lookup is performed
/// against the store — no caching, no retry.
pub async fn resolve(
    signing: &SigningContext,
    token: &str,
    source: &dyn PrincipalSource,
) -> Result<Principal, AuthError> {
    resolve_at(signing, token, source, Utc::now()).await
}

/// [`resolve`] with an explicit clock for deterministic tests.
pub async fn resolve_at(
    signing: &SigningContext,
    token: &str,
    source: &dyn PrincipalSource,
    now: DateTime<Utc>,
) -> Result<Principal, AuthError> {
    let claims = signing.decode_at(token, now)?;

    let principal = source
        .principal_by_subject(&claims.sub)
        .await
        .map_err(|e| AuthError::Lookup(e.to_string()))?
        .ok_or(AuthError::UnknownSubject)?;

    if !principal.is_active {
        return Err(AuthError::InactivePrincipal);
    }

    Ok(principal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use casecraft_core::UserId;
    use chrono::Duration;
    use std::collections::HashMap;

    struct MapSource {
        users: HashMap<String, Principal>,
        unavailable: bool,
    }

    impl MapSource {
        fn new(users: Vec<Principal>) -> Self {
            Self {
                users: users.into_iter().map(|p| (p.username.clone(), p)).collect(),
                unavailable: false,
            }
        }

        fn unavailable() -> Self {
            Self { users: HashMap::new(), unavailable: true }
        }
    }

    #[async_trait]
    impl PrincipalSource for MapSource {
        async fn principal_by_subject(
            &self,
            subject: &str,
        ) -> Result<Option<Principal>, LookupFailure> {
            if self.unavailable {
                return Err(LookupFailure::new("connection refused"));
            }
            Ok(self.users.get(subject).cloned())
        }
    }

    fn principal(username: &str, is_active: bool) -> Principal {
        Principal {
            id: UserId::new(),
            username: username.to_string(),
            email: format!("{username}@example.com"),
            full_name: None,
            is_active,
            is_admin: false,
        }
    }

    fn ctx() -> SigningContext {
        SigningContext::new(b"resolver-test-secret")
    }

    #[tokio::test]
    async fn active_principal_resolves() {
        let ctx = ctx();
        let source = MapSource::new(vec![principal("alice", true)]);
        let token = ctx.issue("alice", Duration::seconds(60)).unwrap();

        let resolved = resolve(&ctx, &token, &source).await.unwrap();
        assert_eq!(resolved.username, "alice");
    }

    #[tokio::test]
    async fn unknown_subject_is_rejected() {
        let ctx = ctx();
        let source = MapSource::new(vec![]);
        let token = ctx.issue("ghost", Duration::seconds(60)).unwrap();

        let err = resolve(&ctx, &token, &source).await.unwrap_err();
        assert_eq!(err, AuthError::UnknownSubject);
    }

    #[tokio::test]
    async fn inactive_principal_is_rejected() {
        let ctx = ctx();
        let source = MapSource::new(vec![principal("bob", false)]);
        let token = ctx.issue("bob", Duration::seconds(60)).unwrap();

        let err = resolve(&ctx, &token, &source).await.unwrap_err();
        assert_eq!(err, AuthError::InactivePrincipal);
    }

    #[tokio::test]
    async fn decode_failures_propagate_unchanged() {
        let ctx = ctx();
        let source = MapSource::new(vec![principal("alice", true)]);

        let err = resolve(&ctx, "garbage", &source).await.unwrap_err();
        assert_eq!(err, AuthError::Malformed);

        let expired = ctx.issue("alice", Duration::seconds(0)).unwrap();
        let err = resolve(&ctx, &expired, &source).await.unwrap_err();
        assert_eq!(err, AuthError::Expired);
    }

    #[tokio::test]
    async fn store_outage_is_not_an_authentication_failure() {
        let ctx = ctx();
        let source = MapSource::unavailable();
        let token = ctx.issue("alice", Duration::seconds(60)).unwrap();

        let err = resolve(&ctx, &token, &source).await.unwrap_err();
        assert!(matches!(err, AuthError::Lookup(_)));
        assert!(!err.is_unauthenticated());
    }
}
