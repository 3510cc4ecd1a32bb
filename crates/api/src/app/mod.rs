//! Application assembly: routers, middleware layers, and shared services.

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

use std::sync::Arc;

use axum::Router;
use axum::extract::Extension;
use axum::routing::get;

use crate::middleware::AuthState;
use services::AppServices;

/// Build the full application router over the given services.
pub fn build_router(services: Arc<AppServices>) -> Router {
    let auth_state = AuthState {
        signing: services.signing.clone(),
        principals: services.principals.clone(),
    };

    let api = Router::new()
        .nest("/auth", routes::auth::router(auth_state.clone()))
        .nest("/products", routes::products::router(auth_state));

    Router::new()
        .route("/", get(routes::system::root))
        .route("/health", get(routes::system::health))
        .nest("/api", api)
        .layer(Extension(services))
}
