//! API-side authorization guard.
//!
//! Enforced at the handler boundary (before touching the store), keeping the
//! route bodies and stores auth-agnostic.

use axum::response::Response;

use casecraft_auth::{RoleRequirement, authorize};

use crate::app::errors;
use crate::context::PrincipalContext;

/// Check that the authenticated principal is an admin.
///
/// Returns the ready-made 403 response on denial so handlers can `?`-style
/// early-return it.
pub fn require_admin(principal: &PrincipalContext) -> Result<(), Response> {
    authorize(principal.principal(), RoleRequirement::Admin)
        .map_err(|e| errors::auth_error_to_response(&e))
}
