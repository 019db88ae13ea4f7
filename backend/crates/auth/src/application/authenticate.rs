//! Authenticate Use Case
//!
//! The request gate: turns the credential presented with a request into an
//! [`AuthPrincipal`], refreshing it on the way when it has merely expired.
//! What should happen to the credential cookie afterwards is reported as a
//! [`CookieIntent`] and applied by the response finalizer.

use std::sync::Arc;

use platform::clock::Clock;

use crate::application::config::AuthConfig;
use crate::application::refresh_session::RefreshSessionUseCase;
use crate::domain::entity::principal::AuthPrincipal;
use crate::domain::repository::SessionRepository;
use crate::domain::token::{ExpiryCheck, TokenCodec, TokenError};
use crate::error::{AuthError, AuthResult};

/// What the finalizer should do with the credential cookie
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CookieIntent {
    #[default]
    NoChange,
    /// Replace the cookie with a refreshed token
    SetCookie(String),
    DeleteCookie,
}

impl CookieIntent {
    /// Intent after a failed attempt
    ///
    /// Infrastructure failures say nothing about the credential, so it is
    /// left in place.
    pub fn for_failure(err: &AuthError) -> Self {
        if err.is_rejection() {
            CookieIntent::DeleteCookie
        } else {
            CookieIntent::NoChange
        }
    }
}

/// Successful gate outcome
#[derive(Debug)]
pub struct Authenticated {
    pub principal: AuthPrincipal,
    pub intent: CookieIntent,
}

/// Authenticate use case
pub struct AuthenticateUseCase<S>
where
    S: SessionRepository,
{
    refresh: RefreshSessionUseCase<S>,
    codec: Arc<dyn TokenCodec>,
    clock: Arc<dyn Clock>,
}

impl<S> AuthenticateUseCase<S>
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
            refresh: RefreshSessionUseCase::new(
                session_repo,
                codec.clone(),
                clock.clone(),
                config,
            ),
            codec,
            clock,
        }
    }

    /// Authenticate the request's credential
    ///
    /// A valid token passes without touching the store. An expired one is
    /// refreshed; if that fails the caller sees `InvalidSession`, never
    /// `Expired`.
    pub async fn execute(&self, credential: Option<&str>) -> AuthResult<Authenticated> {
        let token = credential.ok_or(AuthError::Unauthenticated)?;

        match self.codec.decode(token, ExpiryCheck::Enforce, self.clock.now()) {
            Ok(claims) => Ok(Authenticated {
                principal: AuthPrincipal {
                    principal_id: claims.principal_id,
                    role: claims.role,
                    session_id: claims.session_id,
                },
                intent: CookieIntent::NoChange,
            }),
            Err(TokenError::Expired) => match self.refresh.execute(token).await {
                Ok(refreshed) => Ok(Authenticated {
                    principal: refreshed.principal,
                    intent: CookieIntent::SetCookie(refreshed.access_token),
                }),
                Err(err @ (AuthError::Database(_) | AuthError::Internal(_))) => Err(err),
                Err(err) => {
                    tracing::debug!(error = %err, "Refresh failed");
                    Err(AuthError::InvalidSession)
                }
            },
            Err(err) => Err(err.into()),
        }
    }
}
