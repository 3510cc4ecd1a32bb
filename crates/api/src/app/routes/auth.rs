//! Registration, login, and the current-user endpoint.

use std::sync::Arc;

use axum::extract::{Extension, Form, Json};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use chrono::Utc;

use casecraft_auth::{NewUser, UserRecord, hash_password, validate_password, verify_password};

use crate::app::dto::{
    LoginRequest, PrincipalResponse, RegisterRequest, TokenResponse, UserResponse,
};
use crate::app::errors;
use crate::app::services::AppServices;
use crate::context::PrincipalContext;
use crate::middleware::{AuthState, auth_middleware};

pub fn router(auth_state: AuthState) -> Router {
    let protected = Router::new()
        .route("/me", get(me))
        .route_layer(axum::middleware::from_fn_with_state(
            auth_state,
            auth_middleware,
        ));

    Router::new()
        .route("/register", post(register))
        .route("/token", post(login))
        .merge(protected)
}

async fn register(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<RegisterRequest>,
) -> Response {
    let new = match NewUser::new(&body.email, &body.username, body.full_name.as_deref()) {
        Ok(new) => new,
        Err(err) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "validation_error", err.to_string());
        }
    };
    if let Err(err) = validate_password(&body.password) {
        return errors::json_error(StatusCode::BAD_REQUEST, "validation_error", err.to_string());
    }

    match services.users.find_by_username(new.username()).await {
        Ok(Some(_)) => {
            return errors::json_error(
                StatusCode::BAD_REQUEST,
                "duplicate",
                "username already registered",
            );
        }
        Ok(None) => {}
        Err(err) => return errors::store_error_to_response(&err),
    }
    match services.users.find_by_email(new.email()).await {
        Ok(Some(_)) => {
            return errors::json_error(
                StatusCode::BAD_REQUEST,
                "duplicate",
                "email already registered",
            );
        }
        Ok(None) => {}
        Err(err) => return errors::store_error_to_response(&err),
    }

    let password_hash = match hash_password(&body.password) {
        Ok(hash) => hash,
        Err(err) => {
            tracing::error!(error = %err, "password hashing failed");
            return errors::json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "hash_error",
                "failed to process credentials",
            );
        }
    };

    let record = UserRecord::create(new, password_hash, Utc::now());
    if let Err(err) = services.users.insert(&record).await {
        return errors::store_error_to_response(&err);
    }

    tracing::info!(username = %record.username, "user registered");
    (StatusCode::CREATED, Json(UserResponse::from(&record))).into_response()
}

async fn login(
    Extension(services): Extension<Arc<AppServices>>,
    Form(body): Form<LoginRequest>,
) -> Response {
    // One generic rejection for both unknown usernames and wrong passwords.
    let user = match services.users.find_by_username(&body.username).await {
        Ok(Some(user)) => user,
        Ok(None) => return errors::unauthenticated("incorrect username or password"),
        Err(err) => return errors::store_error_to_response(&err),
    };

    match verify_password(&body.password, &user.password_hash) {
        Ok(true) => {}
        Ok(false) => return errors::unauthenticated("incorrect username or password"),
        Err(err) => {
            tracing::error!(error = %err, "password verification failed");
            return errors::json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "hash_error",
                "failed to process credentials",
            );
        }
    }

    match services.signing.issue(&user.username, services.token_ttl) {
        Ok(token) => Json(TokenResponse::bearer(token)).into_response(),
        Err(err) => errors::auth_error_to_response(&err),
    }
}

/// Answered straight from the principal the middleware resolved; no second
/// store lookup.
async fn me(Extension(ctx): Extension<PrincipalContext>) -> Response {
    Json(PrincipalResponse::from(ctx.principal())).into_response()
}
