//! Access Token Model
//!
//! What a token asserts, and the ways reading one can fail. The signing
//! format itself lives in `infra::jwt`.

use chrono::{DateTime, Duration, Utc};
use kernel::id::SessionId;
use thiserror::Error;

use crate::domain::value_object::principal_id::PrincipalId;

/// The only kind accepted for authentication
pub const ACCESS_TOKEN_KIND: &str = "access";

/// Claims carried by an access token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessClaims {
    pub principal_id: PrincipalId,
    pub role: String,
    pub session_id: SessionId,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl AccessClaims {
    /// Claims valid from `now` for `ttl`. Timestamps are truncated to whole
    /// seconds, which is what the wire format carries.
    pub fn issue(
        principal_id: PrincipalId,
        role: impl Into<String>,
        session_id: SessionId,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Self {
        Self {
            principal_id,
            role: role.into(),
            session_id,
            issued_at: truncate_to_seconds(now),
            expires_at: truncate_to_seconds(now + ttl),
        }
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

fn truncate_to_seconds(at: DateTime<Utc>) -> DateTime<Utc> {
    DateTime::from_timestamp(at.timestamp(), 0).unwrap_or(at)
}

/// Whether `decode` should reject tokens past their expiry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpiryCheck {
    Enforce,
    /// Signature is still verified; only freshness is not trusted
    Skip,
}

/// Outcome of a failed decode
///
/// `Expired` is the only recoverable variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("token is malformed")]
    Malformed,

    #[error("token signature is invalid")]
    SignatureInvalid,

    #[error("token has expired")]
    Expired,

    #[error("expected an access token, got {0:?}")]
    KindMismatch(String),

    #[error("token is invalid: {0}")]
    Invalid(String),
}

/// Signs and verifies access tokens
pub trait TokenCodec: Send + Sync + 'static {
    fn encode(&self, claims: &AccessClaims) -> Result<String, TokenError>;

    fn decode(
        &self,
        token: &str,
        expiry: ExpiryCheck,
        now: DateTime<Utc>,
    ) -> Result<AccessClaims, TokenError>;
}
