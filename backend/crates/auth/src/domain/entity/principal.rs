//! Principal
//!
//! Caller identity as known to the principal store. Registration and profile
//! management live elsewhere; the auth core only reads these.

use platform::password::HashedPassword;

use crate::domain::value_object::{email::Email, principal_id::PrincipalId};

#[derive(Debug, Clone)]
pub struct Principal {
    pub id: PrincipalId,
    pub email: Email,
    /// Role name, compared by string equality (e.g. "user", "admin")
    pub role: String,
    pub password_hash: HashedPassword,
    pub is_active: bool,
}

/// Identity established for the current request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthPrincipal {
    pub principal_id: PrincipalId,
    pub role: String,
    /// Session id the request was authenticated against (post-rotation when
    /// the token was refreshed)
    pub session_id: kernel::id::SessionId,
}

impl AuthPrincipal {
    pub fn has_role(&self, role: &str) -> bool {
        self.role == role
    }
}
