//! Product store: trait + in-memory implementation.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use casecraft_core::ProductId;
use casecraft_products::{Product, ProductFilter};

use crate::error::StoreError;

#[async_trait]
pub trait ProductStore: Send + Sync {
    async fn insert(&self, product: &Product) -> Result<(), StoreError>;
    async fn get(&self, id: ProductId) -> Result<Option<Product>, StoreError>;
    async fn list(&self, filter: &ProductFilter) -> Result<Vec<Product>, StoreError>;
    /// Write back a full (already-merged) product row.
    async fn update(&self, product: &Product) -> Result<(), StoreError>;
    /// Returns false when no such row existed.
    async fn delete(&self, id: ProductId) -> Result<bool, StoreError>;
}

/// In-memory product store for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryProductStore {
    inner: RwLock<HashMap<ProductId, Product>>,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
    async fn insert(&self, product: &Product) -> Result<(), StoreError> {
        let mut map = self
            .inner
            .write()
            .map_err(|_| StoreError::other("product store lock poisoned"))?;
        map.insert(product.id, product.clone());
        Ok(())
    }

    async fn get(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        let map = self
            .inner
            .read()
            .map_err(|_| StoreError::other("product store lock poisoned"))?;
        Ok(map.get(&id).cloned())
    }

    async fn list(&self, filter: &ProductFilter) -> Result<Vec<Product>, StoreError> {
        let map = self
            .inner
            .read()
            .map_err(|_| StoreError::other("product store lock poisoned"))?;

        let mut items: Vec<Product> = map
            .values()
            .filter(|p| match &filter.category {
                Some(category) => p.category.as_deref() == Some(category.as_str()),
                None => true,
            })
            .cloned()
            .collect();
        items.sort_by_key(|p| p.created_at);

        let skip = filter.skip.max(0) as usize;
        let limit = filter.limit.max(0) as usize;
        Ok(items.into_iter().skip(skip).take(limit).collect())
    }

    async fn update(&self, product: &Product) -> Result<(), StoreError> {
        let mut map = self
            .inner
            .write()
            .map_err(|_| StoreError::other("product store lock poisoned"))?;
        map.insert(product.id, product.clone());
        Ok(())
    }

    async fn delete(&self, id: ProductId) -> Result<bool, StoreError> {
        let mut map = self
            .inner
            .write()
            .map_err(|_| StoreError::other("product store lock poisoned"))?;
        Ok(map.remove(&id).is_some())
    }
}
