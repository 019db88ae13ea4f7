//! HTTP Handlers

use axum::extract::{Extension, State};
use axum::http::{HeaderMap, header};
use axum::response::{IntoResponse, Response};
use axum::Json;
use std::sync::Arc;

use platform::clock::Clock;
use platform::cookie::{CookieConfig, SameSite, extract_cookie};

use crate::application::config::AuthConfig;
use crate::application::{AuthenticateUseCase, SignInInput, SignInUseCase, SignOutUseCase};
use crate::domain::entity::principal::AuthPrincipal;
use crate::domain::repository::{PrincipalRepository, SessionRepository};
use crate::domain::token::TokenCodec;
use crate::error::{AuthError, AuthResult};
use crate::infra::jwt::JwtCodec;
use crate::presentation::dto::{
    AuthenticateResponse, CookieValueResponse, LoginRequest, LoginResponse, MessageResponse,
};
use crate::presentation::middleware::extract_credential;

/// Role required by the admin routes
pub const ADMIN_ROLE: &str = "admin";

/// Name of the cookie behind `/set-cookie` and `/get-cookie`
const DEBUG_COOKIE_NAME: &str = "my_cookie";

/// Repository bounds shared by every auth handler
pub trait AuthRepo: SessionRepository + PrincipalRepository + Clone + Send + Sync + 'static {}

impl<T> AuthRepo for T where T: SessionRepository + PrincipalRepository + Clone + Send + Sync + 'static
{}

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: AuthRepo,
{
    pub repo: Arc<R>,
    pub codec: Arc<dyn TokenCodec>,
    pub clock: Arc<dyn Clock>,
    pub config: Arc<AuthConfig>,
}

impl<R> AuthAppState<R>
where
    R: AuthRepo,
{
    pub fn new(repo: R, config: AuthConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            repo: Arc::new(repo),
            codec: Arc::new(JwtCodec::new(&config.signing_key)),
            clock,
            config: Arc::new(config),
        }
    }
}

// ============================================================================
// Login
// ============================================================================

/// POST /api/auth/login
pub async fn login<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<LoginRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: AuthRepo,
{
    let use_case = SignInUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.codec.clone(),
        state.clock.clone(),
        state.config.clone(),
    );

    let output = use_case
        .execute(SignInInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    let cookie = state
        .config
        .cookie_config()
        .set_cookie_header(&output.access_token)
        .ok_or_else(|| AuthError::Internal("Access token is not a valid header value".into()))?;

    Ok((
        [(header::SET_COOKIE, cookie)],
        Json(LoginResponse {
            principal_id: output.principal_id,
            role: output.role,
        }),
    ))
}

// ============================================================================
// Logout
// ============================================================================

/// GET /api/auth/logout
///
/// Runs the gate itself instead of sitting behind the middleware: the cookie
/// is always deleted here, so a refreshed token would be discarded anyway.
pub async fn logout<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
) -> AuthResult<Response>
where
    R: AuthRepo,
{
    let credential = extract_credential(&headers, &state.config);

    let authenticated = AuthenticateUseCase::new(
        state.repo.clone(),
        state.codec.clone(),
        state.clock.clone(),
        state.config.clone(),
    )
    .execute(credential.as_deref())
    .await?;

    SignOutUseCase::new(state.repo.clone())
        .execute(authenticated.principal.principal_id)
        .await?;

    let mut response = Json(MessageResponse {
        message: "Logged out successfully",
    })
    .into_response();

    if let Some(value) = state.config.cookie_config().delete_cookie_header() {
        response.headers_mut().append(header::SET_COOKIE, value);
    }

    Ok(response)
}

// ============================================================================
// Authenticate
// ============================================================================

/// GET /api/auth/authenticate
pub async fn authenticate(
    Extension(principal): Extension<AuthPrincipal>,
) -> Json<AuthenticateResponse> {
    Json(AuthenticateResponse {
        principal_id: principal.principal_id,
        role: principal.role,
    })
}

/// GET /api/auth/admin/authenticate
pub async fn admin_authenticate(
    Extension(principal): Extension<AuthPrincipal>,
) -> AuthResult<Json<AuthenticateResponse>> {
    if !principal.has_role(ADMIN_ROLE) {
        return Err(AuthError::Forbidden(ADMIN_ROLE.to_string()));
    }

    Ok(Json(AuthenticateResponse {
        principal_id: principal.principal_id,
        role: principal.role,
    }))
}

// ============================================================================
// Debug cookie
// ============================================================================

/// GET /api/auth/set-cookie
pub async fn set_cookie() -> impl IntoResponse {
    let cookie = CookieConfig {
        name: DEBUG_COOKIE_NAME.to_string(),
        secure: false,
        http_only: true,
        same_site: SameSite::Lax,
        path: "/".to_string(),
        max_age_secs: Some(3600),
    };

    (
        [(header::SET_COOKIE, cookie.build_set_cookie("cookie_value"))],
        Json(MessageResponse {
            message: "Cookie has been set",
        }),
    )
}

/// GET /api/auth/get-cookie
pub async fn get_cookie(headers: HeaderMap) -> Response {
    match extract_cookie(&headers, DEBUG_COOKIE_NAME) {
        Some(value) => Json(CookieValueResponse { this_cookie: value }).into_response(),
        None => Json(MessageResponse {
            message: "No cookie found",
        })
        .into_response(),
    }
}
