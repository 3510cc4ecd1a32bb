//! Identity records.
//!
//! The stored user row lives here (it carries the password hash, so it is an
//! identity concern); routes and stores only pass it around.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use casecraft_core::{DomainError, UserId};

use crate::principal::Principal;

/// A registered user as persisted in the user store.
///
/// # Invariants
/// - `email` is stored trimmed and lowercased.
/// - `password_hash` is a salted one-way hash, never the plaintext.
/// - New registrations are active non-admins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: UserId,
    pub email: String,
    pub username: String,
    pub full_name: Option<String>,
    pub password_hash: String,
    pub is_active: bool,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserRecord {
    /// Build a record for a freshly validated registration.
    pub fn create(new: NewUser, password_hash: String, now: DateTime<Utc>) -> Self {
        Self {
            id: UserId::new(),
            email: new.email,
            username: new.username,
            full_name: new.full_name,
            password_hash,
            is_active: true,
            is_admin: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// The read-only view the auth core works with.
    pub fn principal(&self) -> Principal {
        Principal {
            id: self.id,
            username: self.username.clone(),
            email: self.email.clone(),
            full_name: self.full_name.clone(),
            is_active: self.is_active,
            is_admin: self.is_admin,
        }
    }
}

/// Validated registration input. The plaintext password is handled separately
/// and never stored on this type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    email: String,
    username: String,
    full_name: Option<String>,
}

impl NewUser {
    pub fn new(
        email: &str,
        username: &str,
        full_name: Option<&str>,
    ) -> Result<Self, DomainError> {
        let email = email.trim().to_lowercase();
        if email.is_empty() || !email.contains('@') {
            return Err(DomainError::validation("invalid email format"));
        }

        let username = username.trim().to_string();
        if username.is_empty() {
            return Err(DomainError::validation("username cannot be empty"));
        }

        let full_name = full_name
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        Ok(Self { email, username, full_name })
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn username(&self) -> &str {
        &self.username
    }
}

/// Minimum accepted password length.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Validate a registration password before hashing.
pub fn validate_password(password: &str) -> Result<(), DomainError> {
    if password.len() < MIN_PASSWORD_LEN {
        return Err(DomainError::validation(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_user_normalizes_email_and_trims() {
        let new = NewUser::new("  Alice@Example.COM ", " alice ", Some("  ")).unwrap();
        assert_eq!(new.email(), "alice@example.com");
        assert_eq!(new.username(), "alice");
        assert_eq!(new.full_name, None);
    }

    #[test]
    fn invalid_email_is_rejected() {
        assert!(NewUser::new("not-an-email", "alice", None).is_err());
        assert!(NewUser::new("", "alice", None).is_err());
    }

    #[test]
    fn empty_username_is_rejected() {
        assert!(NewUser::new("a@b.com", "   ", None).is_err());
    }

    #[test]
    fn short_password_is_rejected() {
        assert!(validate_password("seven77").is_err());
        assert!(validate_password("eight888").is_ok());
    }

    #[test]
    fn created_record_is_active_non_admin() {
        let new = NewUser::new("alice@example.com", "alice", Some("Alice Smith")).unwrap();
        let record = UserRecord::create(new, "hash".to_string(), Utc::now());
        assert!(record.is_active);
        assert!(!record.is_admin);

        let principal = record.principal();
        assert_eq!(principal.username, "alice");
        assert_eq!(principal.full_name.as_deref(), Some("Alice Smith"));
    }
}
