//! `casecraft-store` — user and product persistence.
//!
//! Each store comes in two flavors behind the same trait: an in-memory
//! implementation for dev/test and a Postgres implementation (sqlx) for
//! production, selected at startup by the API wiring.

pub mod error;
pub mod postgres;
pub mod products;
pub mod users;

pub use error::StoreError;
pub use postgres::{PgProductStore, PgUserStore, connect, migrate};
pub use products::{InMemoryProductStore, ProductStore};
pub use users::{InMemoryUserStore, UserStore};
