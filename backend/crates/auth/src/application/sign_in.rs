//! Sign In Use Case
//!
//! Authenticates a principal by email and password and starts a fresh
//! session, replacing any session the principal already had.

use std::sync::Arc;

use platform::clock::Clock;
use platform::password::ClearTextPassword;

use crate::application::config::AuthConfig;
use crate::domain::entity::auth_session::AuthSession;
use crate::domain::repository::{PrincipalRepository, SessionRepository};
use crate::domain::token::{AccessClaims, TokenCodec};
use crate::domain::value_object::{email::Email, principal_id::PrincipalId};
use crate::error::{AuthError, AuthResult};

/// Sign in input
pub struct SignInInput {
    pub email: String,
    pub password: String,
}

/// Sign in output
#[derive(Debug)]
pub struct SignInOutput {
    /// Access token for the cookie
    pub access_token: String,
    pub principal_id: PrincipalId,
    pub role: String,
}

/// Sign in use case
pub struct SignInUseCase<P, S>
where
    P: PrincipalRepository,
    S: SessionRepository,
{
    principal_repo: Arc<P>,
    session_repo: Arc<S>,
    codec: Arc<dyn TokenCodec>,
    clock: Arc<dyn Clock>,
    config: Arc<AuthConfig>,
}

impl<P, S> SignInUseCase<P, S>
where
    P: PrincipalRepository,
    S: SessionRepository,
{
    pub fn new(
        principal_repo: Arc<P>,
        session_repo: Arc<S>,
        codec: Arc<dyn TokenCodec>,
        clock: Arc<dyn Clock>,
        config: Arc<AuthConfig>,
    ) -> Self {
        Self {
            principal_repo,
            session_repo,
            codec,
            clock,
            config,
        }
    }

    pub async fn execute(&self, input: SignInInput) -> AuthResult<SignInOutput> {
        let email = Email::new(&input.email).map_err(|_| AuthError::InvalidCredentials)?;
        let password = ClearTextPassword::new(input.password);

        let principal = self
            .principal_repo
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !principal
            .password_hash
            .verify(&password, self.config.pepper())
        {
            tracing::warn!(principal_id = %principal.id, "Password mismatch");
            return Err(AuthError::InvalidCredentials);
        }

        if !principal.is_active {
            return Err(AuthError::AccountDisabled);
        }

        let now = self.clock.now();
        let session = AuthSession::new(principal.id, now);
        self.session_repo.create_for_principal(&session).await?;

        let claims = AccessClaims::issue(
            principal.id,
            principal.role.clone(),
            session.session_id,
            now,
            self.config.access_token_ttl(),
        );
        let access_token = self
            .codec
            .encode(&claims)
            .map_err(|e| AuthError::Internal(format!("Failed to sign access token: {e}")))?;

        tracing::info!(
            principal_id = %principal.id,
            session_id = %session.session_id,
            "Principal signed in"
        );

        Ok(SignInOutput {
            access_token,
            principal_id: principal.id,
            role: principal.role,
        })
    }
}
