//! Authorization gate.

use crate::error::AuthError;
use crate::principal::Principal;

/// Role a route requires of an already-authenticated principal.
///
/// The only privileged role in this system is admin (product mutations).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleRequirement {
    Admin,
}

/// Decide whether a resolved principal may perform a privileged action.
///
/// - No IO
/// - No panics
/// - Pure policy check
///
/// A denial here is `Forbidden` (valid identity, insufficient role) and must
/// be surfaced as 403, never as 401.
pub fn authorize(principal: &Principal, required: RoleRequirement) -> Result<(), AuthError> {
    match required {
        RoleRequirement::Admin => {
            if principal.is_admin {
                Ok(())
            } else {
                Err(AuthError::Forbidden)
            }
        }
    }
}
