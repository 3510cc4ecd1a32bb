//! Consistent error responses.
//!
//! The auth core returns precise failure kinds; this is the one place they
//! are mapped to client-visible status codes. Unauthenticated responses stay
//! generic on purpose — the sub-reason (expired vs. bad signature vs. unknown
//! subject) is logged at debug level only, never sent to the client.

use axum::Json;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde_json::json;

use casecraft_auth::AuthError;
use casecraft_store::StoreError;

pub fn auth_error_to_response(err: &AuthError) -> Response {
    match err {
        AuthError::Malformed
        | AuthError::InvalidSignature
        | AuthError::Expired
        | AuthError::UnknownSubject => {
            tracing::debug!(kind = %err, "authentication failed");
            unauthenticated("could not validate credentials")
        }
        // Still a 401, but a distinct message is permitted for disabled
        // accounts: the credential itself was valid.
        AuthError::InactivePrincipal => {
            tracing::debug!(kind = %err, "authentication failed");
            unauthenticated("inactive user")
        }
        AuthError::Forbidden => {
            json_error(StatusCode::FORBIDDEN, "forbidden", "not enough permissions")
        }
        AuthError::Lookup(detail) => {
            tracing::error!(%detail, "principal lookup failed");
            json_error(
                StatusCode::SERVICE_UNAVAILABLE,
                "store_unavailable",
                "user store unavailable",
            )
        }
        AuthError::Signing(detail) => {
            tracing::error!(%detail, "token signing failed");
            json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "token_error",
                "failed to issue token",
            )
        }
    }
}

pub fn store_error_to_response(err: &StoreError) -> Response {
    tracing::error!(error = %err, "store operation failed");
    json_error(
        StatusCode::INTERNAL_SERVER_ERROR,
        "store_error",
        "storage operation failed",
    )
}

/// Generic 401 with a `WWW-Authenticate: Bearer` challenge.
pub fn unauthenticated(message: &str) -> Response {
    let mut response = json_error(StatusCode::UNAUTHORIZED, "unauthenticated", message);
    response.headers_mut().insert(
        header::WWW_AUTHENTICATE,
        header::HeaderValue::from_static("Bearer"),
    );
    response
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> Response {
    (
        status,
        Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
