//! Service wiring: signing context, token TTL, and the stores.
//!
//! Mirrors the deployment split: in-memory stores for dev/test, Postgres when
//! `USE_PERSISTENT_STORES=true`.

use std::sync::Arc;

use anyhow::Context;
use chrono::Duration;

use casecraft_auth::{PrincipalSource, SigningContext};
use casecraft_store::{
    InMemoryProductStore, InMemoryUserStore, PgProductStore, PgUserStore, ProductStore, UserStore,
    connect, migrate,
};

const DEFAULT_TTL_SECS: i64 = 1800;

/// Everything a request handler needs, constructed once at startup.
///
/// The signing context is immutable and shared by reference — there is no
/// process-global secret.
pub struct AppServices {
    pub signing: Arc<SigningContext>,
    pub token_ttl: Duration,
    pub users: Arc<dyn UserStore>,
    pub products: Arc<dyn ProductStore>,
    pub principals: Arc<dyn PrincipalSource>,
}

impl AppServices {
    /// In-memory wiring (dev/test).
    pub fn in_memory(secret: &[u8], token_ttl: Duration) -> Self {
        let users = Arc::new(InMemoryUserStore::new());
        let products = Arc::new(InMemoryProductStore::new());
        Self {
            signing: Arc::new(SigningContext::new(secret)),
            token_ttl,
            principals: users.clone(),
            users,
            products,
        }
    }

    /// Build services from the environment.
    ///
    /// `JWT_SECRET`, `ACCESS_TOKEN_TTL_SECS` (default 1800), and
    /// `USE_PERSISTENT_STORES` + `DATABASE_URL` for the Postgres path.
    pub async fn from_env() -> anyhow::Result<Self> {
        let secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| {
            tracing::warn!("JWT_SECRET not set; using insecure dev default");
            "dev-secret".to_string()
        });

        let token_ttl = match std::env::var("ACCESS_TOKEN_TTL_SECS") {
            Ok(raw) => Duration::seconds(
                raw.parse::<i64>()
                    .context("ACCESS_TOKEN_TTL_SECS must be an integer")?,
            ),
            Err(_) => Duration::seconds(DEFAULT_TTL_SECS),
        };

        let use_persistent = std::env::var("USE_PERSISTENT_STORES")
            .map(|v| v.parse::<bool>().unwrap_or(false))
            .unwrap_or(false);

        if !use_persistent {
            tracing::info!("using in-memory stores");
            return Ok(Self::in_memory(secret.as_bytes(), token_ttl));
        }

        let database_url = std::env::var("DATABASE_URL")
            .context("DATABASE_URL must be set when USE_PERSISTENT_STORES=true")?;

        let pool = connect(&database_url)
            .await
            .context("failed to connect to Postgres")?;
        migrate(&pool).await.context("schema migration failed")?;
        tracing::info!("using Postgres stores");

        let users = Arc::new(PgUserStore::new(pool.clone()));
        let products = Arc::new(PgProductStore::new(pool));
        Ok(Self {
            signing: Arc::new(SigningContext::new(secret.as_bytes())),
            token_ttl,
            principals: users.clone(),
            users,
            products,
        })
    }
}
