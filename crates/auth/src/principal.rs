//! Resolved principal.

use serde::{Deserialize, Serialize};

use casecraft_core::UserId;

/// A principal resolved from the user store at verification time.
///
/// Construction is intentionally decoupled from storage and transport: the
/// auth core only ever *reads* this — it is owned by the user store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub full_name: Option<String>,
    pub is_active: bool,
    pub is_admin: bool,
}
