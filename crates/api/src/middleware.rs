use std::sync::Arc;

use axum::{
    extract::State,
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use casecraft_auth::{AuthError, PrincipalSource, SigningContext, resolve};

use crate::app::errors;
use crate::context::PrincipalContext;

#[derive(Clone)]
pub struct AuthState {
    pub signing: Arc<SigningContext>,
    pub principals: Arc<dyn PrincipalSource>,
}

/// Bearer auth for protected routes: extract the token, resolve it into an
/// active principal (one store lookup), and stash the context for handlers.
/// Every failure is mapped to a response here; handlers never see a
/// half-authenticated request.
pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let token = match extract_bearer(req.headers()) {
        Ok(token) => token,
        Err(err) => return errors::auth_error_to_response(&err),
    };

    let principal = match resolve(&state.signing, token, state.principals.as_ref()).await {
        Ok(principal) => principal,
        Err(err) => return errors::auth_error_to_response(&err),
    };

    req.extensions_mut().insert(PrincipalContext::new(principal));

    next.run(req).await
}

fn extract_bearer(headers: &HeaderMap) -> Result<&str, AuthError> {
    let header = headers
        .get(axum::http::header::AUTHORIZATION)
        .ok_or(AuthError::Malformed)?;

    let header = header.to_str().map_err(|_| AuthError::Malformed)?;

    let token = header
        .strip_prefix("Bearer ")
        .ok_or(AuthError::Malformed)?
        .trim();

    if token.is_empty() {
        return Err(AuthError::Malformed);
    }

    Ok(token)
}
