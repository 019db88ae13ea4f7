//! Auth Error Types
//!
//! Auth-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.
//!
//! Every failure of the authentication gate renders as the same
//! `403 Forbidden`; the variant is kept for logs only.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

use crate::domain::token::TokenError;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Message shown for every rejected credential
const REJECTED_MESSAGE: &str = "Invalid token or session";

/// Next step suggested with every rejected credential
const REJECTED_ACTION: &str = "Sign in again";

#[derive(Debug, Error)]
pub enum AuthError {
    /// No credential on the request
    #[error("No access token presented")]
    Unauthenticated,

    /// Credential is not a well-formed signed token
    #[error("Access token is malformed")]
    Malformed,

    /// Tampered with, or signed by another key
    #[error("Access token signature is invalid")]
    SignatureInvalid,

    /// Past its expiry. Only seen inside the refresh path.
    #[error("Access token has expired")]
    Expired,

    /// Bound session is gone, belongs to someone else, was rotated away or is
    /// past its window
    #[error("Session not found or expired")]
    InvalidSession,

    /// Any other verification failure
    #[error("Access token is invalid: {0}")]
    InvalidToken(String),

    /// A non-access token was presented
    #[error("Expected an access token, got {0:?}")]
    TokenKindMismatch(String),

    /// Unknown email or wrong password
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Account is disabled")]
    AccountDisabled,

    /// Authenticated but lacking the required role
    #[error("Role {0:?} required")]
    Forbidden(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Whether this error came from checking the request's credential
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            AuthError::Unauthenticated
                | AuthError::Malformed
                | AuthError::SignatureInvalid
                | AuthError::Expired
                | AuthError::InvalidSession
                | AuthError::InvalidToken(_)
                | AuthError::TokenKindMismatch(_)
        )
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            e if e.is_rejection() => ErrorKind::Forbidden,
            AuthError::Forbidden(_) | AuthError::AccountDisabled => ErrorKind::Forbidden,
            AuthError::InvalidCredentials => ErrorKind::Unauthorized,
            _ => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    ///
    /// Rejections and server errors get fixed messages so nothing about the
    /// token or the database leaks to the client.
    pub fn into_app_error(self) -> AppError {
        match self {
            e if e.is_rejection() => {
                AppError::forbidden(REJECTED_MESSAGE).with_action(REJECTED_ACTION)
            }
            AuthError::Database(e) => AppError::internal("Internal server error").with_source(e),
            AuthError::Internal(_) => AppError::internal("Internal server error"),
            e => AppError::new(e.kind(), e.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::SignatureInvalid => {
                tracing::warn!("Access token with invalid signature");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.into_app_error().into_response()
    }
}

impl From<TokenError> for AuthError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Malformed => AuthError::Malformed,
            TokenError::SignatureInvalid => AuthError::SignatureInvalid,
            TokenError::Expired => AuthError::Expired,
            TokenError::KindMismatch(kind) => AuthError::TokenKindMismatch(kind),
            TokenError::Invalid(reason) => AuthError::InvalidToken(reason),
        }
    }
}
