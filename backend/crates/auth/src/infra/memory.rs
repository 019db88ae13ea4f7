//! In-memory repository
//!
//! Same contract as [`super::postgres::PgAuthRepository`], with a single
//! mutex standing in for the database's transactions. Used by tests and for
//! running the server without PostgreSQL.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use kernel::id::SessionId;
use tokio::sync::Mutex;

use crate::domain::entity::{auth_session::AuthSession, principal::Principal};
use crate::domain::repository::{PrincipalRepository, SessionRepository};
use crate::domain::value_object::{email::Email, principal_id::PrincipalId};
use crate::error::AuthResult;

#[derive(Default)]
struct State {
    /// Keyed by principal: one session per principal
    sessions: HashMap<PrincipalId, AuthSession>,
    principals: HashMap<PrincipalId, Principal>,
}

#[derive(Clone, Default)]
pub struct InMemoryAuthRepository {
    state: Arc<Mutex<State>>,
}

impl InMemoryAuthRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_principal(&self, principal: Principal) {
        self.state
            .lock()
            .await
            .principals
            .insert(principal.id, principal);
    }

    pub async fn session_for(&self, principal_id: PrincipalId) -> Option<AuthSession> {
        self.state.lock().await.sessions.get(&principal_id).cloned()
    }

    pub async fn session_count(&self) -> usize {
        self.state.lock().await.sessions.len()
    }
}

impl SessionRepository for InMemoryAuthRepository {
    async fn create_for_principal(&self, session: &AuthSession) -> AuthResult<()> {
        let mut state = self.state.lock().await;
        state.sessions.remove(&session.principal_id);
        state.sessions.insert(session.principal_id, session.clone());
        Ok(())
    }

    async fn find_by_session_id(&self, session_id: SessionId) -> AuthResult<Option<AuthSession>> {
        let state = self.state.lock().await;
        Ok(state
            .sessions
            .values()
            .find(|s| s.session_id == session_id)
            .cloned())
    }

    async fn rotate(
        &self,
        current: SessionId,
        principal_id: PrincipalId,
        next: SessionId,
        now: DateTime<Utc>,
    ) -> AuthResult<Option<AuthSession>> {
        let mut state = self.state.lock().await;
        let Some(session) = state.sessions.get_mut(&principal_id) else {
            return Ok(None);
        };
        if session.session_id != current {
            return Ok(None);
        }

        *session = session.rotated(next, now);
        Ok(Some(session.clone()))
    }

    async fn delete_by_principal(&self, principal_id: PrincipalId) -> AuthResult<u64> {
        let removed = self.state.lock().await.sessions.remove(&principal_id);
        Ok(removed.map_or(0, |_| 1))
    }
}

impl PrincipalRepository for InMemoryAuthRepository {
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<Principal>> {
        let state = self.state.lock().await;
        Ok(state
            .principals
            .values()
            .find(|p| &p.email == email)
            .cloned())
    }
}
