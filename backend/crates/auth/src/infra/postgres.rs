//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::id::SessionId;
use platform::password::HashedPassword;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::{auth_session::AuthSession, principal::Principal};
use crate::domain::repository::{PrincipalRepository, SessionRepository};
use crate::domain::value_object::{email::Email, principal_id::PrincipalId};
use crate::error::{AuthError, AuthResult};

/// PostgreSQL-backed auth repository
#[derive(Clone)]
pub struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// ============================================================================
// Session Repository Implementation
// ============================================================================

impl SessionRepository for PgAuthRepository {
    async fn create_for_principal(&self, session: &AuthSession) -> AuthResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM sessions WHERE principal_id = $1")
            .bind(session.principal_id.get())
            .execute(&mut *tx)
            .await?;

        // A concurrent login for the same principal may have inserted between
        // our delete and insert; the newest login wins.
        sqlx::query(
            r#"
            INSERT INTO sessions (
                session_id,
                principal_id,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4)
            ON CONFLICT (principal_id) DO UPDATE SET
                session_id = EXCLUDED.session_id,
                created_at = EXCLUDED.created_at,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(session.session_id.into_uuid())
        .bind(session.principal_id.get())
        .bind(session.created_at)
        .bind(session.updated_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(())
    }

    async fn find_by_session_id(&self, session_id: SessionId) -> AuthResult<Option<AuthSession>> {
        let row = sqlx::query_as::<_, SessionRow>(
            r#"
            SELECT
                session_id,
                principal_id,
                created_at,
                updated_at
            FROM sessions
            WHERE session_id = $1
            "#,
        )
        .bind(session_id.into_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(SessionRow::into_session))
    }

    async fn rotate(
        &self,
        current: SessionId,
        principal_id: PrincipalId,
        next: SessionId,
        now: DateTime<Utc>,
    ) -> AuthResult<Option<AuthSession>> {
        // Single conditional update: of two racing rotations only one can
        // still match `current`.
        let row = sqlx::query_as::<_, SessionRow>(
            r#"
            UPDATE sessions SET
                session_id = $3,
                updated_at = $4
            WHERE session_id = $1 AND principal_id = $2
            RETURNING
                session_id,
                principal_id,
                created_at,
                updated_at
            "#,
        )
        .bind(current.into_uuid())
        .bind(principal_id.get())
        .bind(next.into_uuid())
        .bind(now)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(SessionRow::into_session))
    }

    async fn delete_by_principal(&self, principal_id: PrincipalId) -> AuthResult<u64> {
        let deleted = sqlx::query("DELETE FROM sessions WHERE principal_id = $1")
            .bind(principal_id.get())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted)
    }
}

// ============================================================================
// Principal Repository Implementation
// ============================================================================

impl PrincipalRepository for PgAuthRepository {
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<Principal>> {
        let row = sqlx::query_as::<_, PrincipalRow>(
            r#"
            SELECT
                id,
                email,
                password_hash,
                role,
                is_active
            FROM principals
            WHERE lower(email) = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(PrincipalRow::into_principal).transpose()
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct SessionRow {
    session_id: Uuid,
    principal_id: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl SessionRow {
    fn into_session(self) -> AuthSession {
        AuthSession {
            session_id: SessionId::from_uuid(self.session_id),
            principal_id: PrincipalId::new(self.principal_id),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct PrincipalRow {
    id: i64,
    email: String,
    password_hash: String,
    role: String,
    is_active: bool,
}

impl PrincipalRow {
    fn into_principal(self) -> AuthResult<Principal> {
        let password_hash = HashedPassword::from_phc_string(self.password_hash)
            .map_err(|e| AuthError::Internal(format!("Invalid password hash: {}", e)))?;

        Ok(Principal {
            id: PrincipalId::new(self.id),
            email: Email::from_db(self.email),
            role: self.role,
            password_hash,
            is_active: self.is_active,
        })
    }
}
