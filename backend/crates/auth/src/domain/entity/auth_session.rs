//! Auth Session Entity
//!
//! The server-side record an access token is bound to. One row per
//! principal; the row's `session_id` is the binding anchor and changes on
//! every token refresh.

use chrono::{DateTime, Duration, Utc};
use kernel::id::SessionId;

use crate::domain::value_object::principal_id::PrincipalId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSession {
    /// Current binding anchor (UUID v4)
    pub session_id: SessionId,
    pub principal_id: PrincipalId,
    /// Anchor of the session window. Never changes after creation.
    pub created_at: DateTime<Utc>,
    /// Last rotation
    pub updated_at: DateTime<Utc>,
}

impl AuthSession {
    /// Fresh session for a principal that just logged in
    pub fn new(principal_id: PrincipalId, now: DateTime<Utc>) -> Self {
        Self {
            session_id: SessionId::new(),
            principal_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether a refresh is still allowed.
    ///
    /// The window is measured from creation, so it bounds the total session
    /// lifetime; rotations do not extend it.
    pub fn is_within_window(&self, now: DateTime<Utc>, window: Duration) -> bool {
        now.checked_sub_signed(window)
            .is_none_or(|cutoff| self.created_at >= cutoff)
    }

    pub fn is_owned_by(&self, principal_id: PrincipalId) -> bool {
        self.principal_id == principal_id
    }

    /// Point after which the session can no longer be refreshed
    pub fn window_ends_at(&self, window: Duration) -> DateTime<Utc> {
        self.created_at + window
    }

    /// Same session under a new identifier
    pub fn rotated(&self, next: SessionId, now: DateTime<Utc>) -> Self {
        Self {
            session_id: next,
            updated_at: now,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 14, 15, 0, 0).unwrap()
    }

    #[test]
    fn test_window_is_inclusive_at_boundary() {
        let session = AuthSession::new(PrincipalId::new(42), t0());
        let window = Duration::minutes(30);

        assert!(session.is_within_window(t0() + Duration::minutes(3), window));
        assert!(session.is_within_window(t0() + window, window));
        assert!(!session.is_within_window(t0() + window + Duration::seconds(1), window));
    }

    #[test]
    fn test_rotation_keeps_created_at() {
        let session = AuthSession::new(PrincipalId::new(42), t0());
        let later = t0() + Duration::minutes(5);
        let next = SessionId::new();

        let rotated = session.rotated(next, later);
        assert_eq!(rotated.session_id, next);
        assert_ne!(rotated.session_id, session.session_id);
        assert_eq!(rotated.created_at, session.created_at);
        assert_eq!(rotated.updated_at, later);
        assert_eq!(rotated.window_ends_at(Duration::minutes(30)), t0() + Duration::minutes(30));
    }
}
