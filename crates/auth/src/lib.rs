//! `casecraft-auth` — pure authentication/authorization core.
//!
//! This crate is intentionally decoupled from HTTP and storage: it hashes and
//! verifies credentials, issues and decodes signed tokens, resolves bearer
//! tokens into principals through a caller-supplied lookup capability, and
//! makes the admin authorization decision. It never logs and never maps
//! failures to status codes — that is the API boundary's job.

pub mod authorize;
pub mod error;
pub mod password;
pub mod principal;
pub mod resolve;
pub mod token;
pub mod user;

pub use authorize::{RoleRequirement, authorize};
pub use error::AuthError;
pub use password::{CredentialError, hash_password, verify_password};
pub use principal::Principal;
pub use resolve::{LookupFailure, PrincipalSource, resolve, resolve_at};
pub use token::{Claims, SigningContext};
pub use user::{MIN_PASSWORD_LEN, NewUser, UserRecord, validate_password};
