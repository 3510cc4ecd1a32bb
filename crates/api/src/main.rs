use std::sync::Arc;

use anyhow::Context;

use casecraft_api::app::{build_router, services::AppServices};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    casecraft_observability::init();

    let services = Arc::new(AppServices::from_env().await?);
    let app = build_router(services);

    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8000".to_string());
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!(%addr, "casecraft api listening");
    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
