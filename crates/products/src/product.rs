//! Product entity, creation input, and partial-update patch.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use casecraft_core::{DomainError, ProductId};

/// A catalog product.
///
/// # Invariants
/// - `name` is non-empty and at most 100 characters.
/// - `price` is strictly positive.
/// - `stock` is never negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub stock: i32,
    pub image_url: Option<String>,
    pub category: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    pub fn create(new: NewProduct, now: DateTime<Utc>) -> Self {
        Self {
            id: ProductId::new(),
            name: new.name,
            description: new.description,
            price: new.price,
            stock: new.stock,
            image_url: new.image_url,
            category: new.category,
            created_at: now,
            updated_at: now,
        }
    }
}

fn validate_name(name: &str) -> Result<(), DomainError> {
    if name.trim().is_empty() {
        return Err(DomainError::validation("name cannot be empty"));
    }
    if name.len() > 100 {
        return Err(DomainError::validation("name must be at most 100 characters"));
    }
    Ok(())
}

fn validate_price(price: f64) -> Result<(), DomainError> {
    if !price.is_finite() || price <= 0.0 {
        return Err(DomainError::validation("price must be greater than zero"));
    }
    Ok(())
}

fn validate_stock(stock: i32) -> Result<(), DomainError> {
    if stock < 0 {
        return Err(DomainError::validation("stock cannot be negative"));
    }
    Ok(())
}

/// Input for creating a product.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub stock: i32,
    pub image_url: Option<String>,
    pub category: Option<String>,
}

impl NewProduct {
    pub fn validate(&self) -> Result<(), DomainError> {
        validate_name(&self.name)?;
        validate_price(self.price)?;
        validate_stock(self.stock)?;
        Ok(())
    }
}

/// Partial update: every field optional, absent fields untouched.
///
/// This is the single merge point for partial product updates — stores apply
/// this rather than carrying their own field-by-field logic.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub stock: Option<i32>,
    pub image_url: Option<String>,
    pub category: Option<String>,
}

impl ProductPatch {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if let Some(name) = &self.name {
            validate_name(name)?;
        }
        if let Some(price) = self.price {
            validate_price(price)?;
        }
        if let Some(stock) = self.stock {
            validate_stock(stock)?;
        }
        Ok(())
    }

    /// Overwrite only the fields present in the patch and bump `updated_at`.
    ///
    /// Callers must [`validate`](Self::validate) first.
    pub fn apply(&self, product: &mut Product, now: DateTime<Utc>) {
        if let Some(name) = &self.name {
            product.name = name.clone();
        }
        if let Some(description) = &self.description {
            product.description = Some(description.clone());
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(stock) = self.stock {
            product.stock = stock;
        }
        if let Some(image_url) = &self.image_url {
            product.image_url = Some(image_url.clone());
        }
        if let Some(category) = &self.category {
            product.category = Some(category.clone());
        }
        product.updated_at = now;
    }
}

/// Listing filter: pagination plus an optional category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductFilter {
    pub category: Option<String>,
    pub skip: i64,
    pub limit: i64,
}

impl Default for ProductFilter {
    fn default() -> Self {
        Self { category: None, skip: 0, limit: 100 }
    }
}
