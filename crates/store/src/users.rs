//! User store: trait + in-memory implementation.
//!
//! Both user store flavors also implement [`PrincipalSource`], so the auth
//! resolver can be handed either one directly.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use casecraft_auth::{LookupFailure, Principal, PrincipalSource, UserRecord};
use casecraft_core::UserId;

use crate::error::StoreError;

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn insert(&self, user: &UserRecord) -> Result<(), StoreError>;
    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, StoreError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError>;
}

/// In-memory user store for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    inner: RwLock<HashMap<UserId, UserRecord>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn insert(&self, user: &UserRecord) -> Result<(), StoreError> {
        let mut map = self
            .inner
            .write()
            .map_err(|_| StoreError::other("user store lock poisoned"))?;
        map.insert(user.id, user.clone());
        Ok(())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, StoreError> {
        let map = self
            .inner
            .read()
            .map_err(|_| StoreError::other("user store lock poisoned"))?;
        Ok(map.values().find(|u| u.username == username).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError> {
        let map = self
            .inner
            .read()
            .map_err(|_| StoreError::other("user store lock poisoned"))?;
        Ok(map.values().find(|u| u.email == email).cloned())
    }
}

#[async_trait]
impl PrincipalSource for InMemoryUserStore {
    async fn principal_by_subject(
        &self,
        subject: &str,
    ) -> Result<Option<Principal>, LookupFailure> {
        self.find_by_username(subject)
            .await
            .map(|user| user.map(|u| u.principal()))
            .map_err(|e| LookupFailure::new(e.to_string()))
    }
}
