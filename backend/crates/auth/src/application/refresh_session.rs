//! Refresh Session Use Case
//!
//! Trades an expired (but authentic) access token for a new one, rotating
//! the bound session's identifier so the old token can't be replayed.

use std::sync::Arc;

use kernel::id::SessionId;
use platform::clock::Clock;

use crate::application::config::AuthConfig;
use crate::domain::entity::principal::AuthPrincipal;
use crate::domain::repository::SessionRepository;
use crate::domain::token::{AccessClaims, ExpiryCheck, TokenCodec};
use crate::error::{AuthError, AuthResult};

/// Refresh output
#[derive(Debug)]
pub struct RefreshOutput {
    /// Identity under the rotated session
    pub principal: AuthPrincipal,
    /// Newly minted access token
    pub access_token: String,
}

/// Refresh session use case
pub struct RefreshSessionUseCase<S>
where
    S: SessionRepository,
{
    session_repo: Arc<S>,
    codec: Arc<dyn TokenCodec>,
    clock: Arc<dyn Clock>,
    config: Arc<AuthConfig>,
}

impl<S> RefreshSessionUseCase<S>
where
    S: SessionRepository,
{
    pub fn new(
        session_repo: Arc<S>,
        codec: Arc<dyn TokenCodec>,
        clock: Arc<dyn Clock>,
        config: Arc<AuthConfig>,
    ) -> Self {
        Self {
            session_repo,
            codec,
            clock,
            config,
        }
    }

    /// Refresh `token`
    ///
    /// Fails with `InvalidSession` when the bound session is missing, owned by
    /// another principal, past its window, or was rotated concurrently.
    /// Token errors other than expiry propagate as-is.
    pub async fn execute(&self, token: &str) -> AuthResult<RefreshOutput> {
        let now = self.clock.now();
        let claims = self.codec.decode(token, ExpiryCheck::Skip, now)?;

        let session = self
            .session_repo
            .find_by_session_id(claims.session_id)
            .await?
            .ok_or(AuthError::InvalidSession)?;

        if !session.is_owned_by(claims.principal_id) {
            tracing::warn!(
                principal_id = %claims.principal_id,
                session_id = %claims.session_id,
                "Token names a session owned by another principal"
            );
            return Err(AuthError::InvalidSession);
        }

        if !session.is_within_window(now, self.config.session_window()) {
            tracing::debug!(
                principal_id = %claims.principal_id,
                window_ended_at = %session.window_ends_at(self.config.session_window()),
                "Session window has passed"
            );
            return Err(AuthError::InvalidSession);
        }

        // Loses to a concurrent refresh of the same token: zero rows match.
        let rotated = self
            .session_repo
            .rotate(session.session_id, claims.principal_id, SessionId::new(), now)
            .await?
            .ok_or(AuthError::InvalidSession)?;

        let next = AccessClaims::issue(
            rotated.principal_id,
            claims.role,
            rotated.session_id,
            now,
            self.config.access_token_ttl(),
        );
        let access_token = self
            .codec
            .encode(&next)
            .map_err(|e| AuthError::Internal(format!("Failed to sign access token: {e}")))?;

        tracing::info!(
            principal_id = %rotated.principal_id,
            session_id = %rotated.session_id,
            "Access token refreshed"
        );

        Ok(RefreshOutput {
            principal: AuthPrincipal {
                principal_id: next.principal_id,
                role: next.role,
                session_id: next.session_id,
            },
            access_token,
        })
    }
}
