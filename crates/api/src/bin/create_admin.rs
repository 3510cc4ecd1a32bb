//! One-shot bootstrap: create the initial admin account.
//!
//! Reads ADMIN_EMAIL / ADMIN_USERNAME / ADMIN_PASSWORD / ADMIN_FULL_NAME and
//! writes an active admin user, skipping if the username already exists.

use anyhow::Context;
use chrono::Utc;

use casecraft_api::app::services::AppServices;
use casecraft_auth::{NewUser, UserRecord, hash_password, validate_password};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    casecraft_observability::init();

    let email = std::env::var("ADMIN_EMAIL").unwrap_or_else(|_| "admin@casecraft.com".to_string());
    let username = std::env::var("ADMIN_USERNAME").unwrap_or_else(|_| "admin".to_string());
    let password = std::env::var("ADMIN_PASSWORD").context("ADMIN_PASSWORD must be set")?;
    let full_name = std::env::var("ADMIN_FULL_NAME").ok();

    let services = AppServices::from_env().await?;

    if services.users.find_by_username(&username).await?.is_some() {
        tracing::info!(%username, "admin user already exists, nothing to do");
        return Ok(());
    }

    let new = NewUser::new(&email, &username, full_name.as_deref())?;
    validate_password(&password)?;
    let password_hash = hash_password(&password).context("failed to hash admin password")?;

    let mut record = UserRecord::create(new, password_hash, Utc::now());
    record.is_admin = true;
    services.users.insert(&record).await?;

    tracing::info!(%username, "admin user created");
    Ok(())
}
