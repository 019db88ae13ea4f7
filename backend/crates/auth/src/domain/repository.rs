//! Repository Traits
//!
//! Interfaces for data persistence. Implementations are in the
//! infrastructure layer.

use chrono::{DateTime, Utc};
use kernel::id::SessionId;

use crate::domain::entity::{auth_session::AuthSession, principal::Principal};
use crate::domain::value_object::{email::Email, principal_id::PrincipalId};
use crate::error::AuthResult;

/// Session store
///
/// At most one row per principal. Implementations must make
/// `create_for_principal` and `rotate` atomic.
#[trait_variant::make(SessionRepository: Send)]
pub trait LocalSessionRepository {
    /// Replace whatever session the principal has with `session`
    async fn create_for_principal(&self, session: &AuthSession) -> AuthResult<()>;

    async fn find_by_session_id(&self, session_id: SessionId) -> AuthResult<Option<AuthSession>>;

    /// Move the row from `current` to `next`.
    ///
    /// Succeeds only if the row still carries `current` and belongs to
    /// `principal_id`; returns the committed row, or `None` when another
    /// rotation (or a logout) got there first.
    async fn rotate(
        &self,
        current: SessionId,
        principal_id: PrincipalId,
        next: SessionId,
        now: DateTime<Utc>,
    ) -> AuthResult<Option<AuthSession>>;

    /// Idempotent; returns the number of rows removed
    async fn delete_by_principal(&self, principal_id: PrincipalId) -> AuthResult<u64>;
}

/// Principal (identity + credential) lookup
#[trait_variant::make(PrincipalRepository: Send)]
pub trait LocalPrincipalRepository {
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<Principal>>;
}
