//! Sign Out Use Case
//!
//! Ends the principal's session. Any access token bound to it stops being
//! refreshable immediately.

use std::sync::Arc;

use crate::domain::repository::SessionRepository;
use crate::domain::value_object::principal_id::PrincipalId;
use crate::error::AuthResult;

/// Sign out use case
pub struct SignOutUseCase<S>
where
    S: SessionRepository,
{
    session_repo: Arc<S>,
}

impl<S> SignOutUseCase<S>
where
    S: SessionRepository,
{
    pub fn new(session_repo: Arc<S>) -> Self {
        Self { session_repo }
    }

    /// Delete the principal's session; succeeds when there is none
    pub async fn execute(&self, principal_id: PrincipalId) -> AuthResult<()> {
        let deleted = self.session_repo.delete_by_principal(principal_id).await?;

        tracing::info!(principal_id = %principal_id, deleted, "Principal signed out");
        Ok(())
    }
}
