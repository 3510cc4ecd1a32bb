//! Postgres-backed stores (sqlx).
//!
//! Row mapping is done by hand (`try_get`) — no compile-time query macros, so
//! no database is needed at build time.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row, postgres::PgRow};
use uuid::Uuid;

use casecraft_auth::{LookupFailure, Principal, PrincipalSource, UserRecord};
use casecraft_core::{ProductId, UserId};
use casecraft_products::{Product, ProductFilter};

use crate::error::StoreError;
use crate::products::ProductStore;
use crate::users::UserStore;

/// Open a connection pool against `database_url`.
pub async fn connect(database_url: &str) -> Result<PgPool, StoreError> {
    Ok(PgPool::connect(database_url).await?)
}

/// Create the schema if it does not exist yet.
pub async fn migrate(pool: &PgPool) -> Result<(), StoreError> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id            UUID PRIMARY KEY,
            email         TEXT NOT NULL UNIQUE,
            username      TEXT NOT NULL UNIQUE,
            full_name     TEXT,
            password_hash TEXT NOT NULL,
            is_active     BOOLEAN NOT NULL DEFAULT TRUE,
            is_admin      BOOLEAN NOT NULL DEFAULT FALSE,
            created_at    TIMESTAMPTZ NOT NULL,
            updated_at    TIMESTAMPTZ NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS products (
            id          UUID PRIMARY KEY,
            name        TEXT NOT NULL,
            description TEXT,
            price       DOUBLE PRECISION NOT NULL,
            stock       INTEGER NOT NULL DEFAULT 0,
            image_url   TEXT,
            category    TEXT,
            created_at  TIMESTAMPTZ NOT NULL,
            updated_at  TIMESTAMPTZ NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_products_category ON products (category)")
        .execute(pool)
        .await?;

    Ok(())
}

/// Postgres user store.
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn user_from_row(row: &PgRow) -> Result<UserRecord, sqlx::Error> {
    Ok(UserRecord {
        id: UserId::from_uuid(row.try_get::<Uuid, _>("id")?),
        email: row.try_get("email")?,
        username: row.try_get("username")?,
        full_name: row.try_get("full_name")?,
        password_hash: row.try_get("password_hash")?,
        is_active: row.try_get("is_active")?,
        is_admin: row.try_get("is_admin")?,
        created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
        updated_at: row.try_get::<DateTime<Utc>, _>("updated_at")?,
    })
}

const SELECT_USER: &str = "SELECT id, email, username, full_name, password_hash, \
                           is_active, is_admin, created_at, updated_at FROM users";

#[async_trait]
impl UserStore for PgUserStore {
    async fn insert(&self, user: &UserRecord) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO users
                (id, email, username, full_name, password_hash,
                 is_active, is_admin, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(user.id.as_uuid())
        .bind(&user.email)
        .bind(&user.username)
        .bind(&user.full_name)
        .bind(&user.password_hash)
        .bind(user.is_active)
        .bind(user.is_admin)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, StoreError> {
        let row = sqlx::query(&format!("{SELECT_USER} WHERE username = $1"))
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(user_from_row).transpose().map_err(StoreError::from)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError> {
        let row = sqlx::query(&format!("{SELECT_USER} WHERE email = $1"))
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(user_from_row).transpose().map_err(StoreError::from)
    }
}

#[async_trait]
impl PrincipalSource for PgUserStore {
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

/// Postgres product store.
pub struct PgProductStore {
    pool: PgPool,
}

impl PgProductStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn product_from_row(row: &PgRow) -> Result<Product, sqlx::Error> {
    Ok(Product {
        id: ProductId::from_uuid(row.try_get::<Uuid, _>("id")?),
        name: row.try_get("name")?,
        description: row.try_get("description")?,
        price: row.try_get("price")?,
        stock: row.try_get("stock")?,
        image_url: row.try_get("image_url")?,
        category: row.try_get("category")?,
        created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
        updated_at: row.try_get::<DateTime<Utc>, _>("updated_at")?,
    })
}

const SELECT_PRODUCT: &str = "SELECT id, name, description, price, stock, \
                              image_url, category, created_at, updated_at FROM products";

#[async_trait]
impl ProductStore for PgProductStore {
    async fn insert(&self, product: &Product) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO products
                (id, name, description, price, stock, image_url, category,
                 created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(product.id.as_uuid())
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .bind(product.stock)
        .bind(&product.image_url)
        .bind(&product.category)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn get(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        let row = sqlx::query(&format!("{SELECT_PRODUCT} WHERE id = $1"))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(product_from_row).transpose().map_err(StoreError::from)
    }

    async fn list(&self, filter: &ProductFilter) -> Result<Vec<Product>, StoreError> {
        let rows = sqlx::query(&format!(
            "{SELECT_PRODUCT} \
             WHERE ($1::TEXT IS NULL OR category = $1) \
             ORDER BY created_at \
             OFFSET $2 LIMIT $3"
        ))
        .bind(&filter.category)
        .bind(filter.skip.max(0))
        .bind(filter.limit.max(0))
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(product_from_row)
            .collect::<Result<Vec<_>, _>>()
            .map_err(StoreError::from)
    }

    async fn update(&self, product: &Product) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            UPDATE products
            SET name = $2, description = $3, price = $4, stock = $5,
                image_url = $6, category = $7, updated_at = $8
            WHERE id = $1
            "#,
        )
        .bind(product.id.as_uuid())
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .bind(product.stock)
        .bind(&product.image_url)
        .bind(&product.category)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete(&self, id: ProductId) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
