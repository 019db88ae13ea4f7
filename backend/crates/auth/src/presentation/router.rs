//! Auth Router

use axum::{
    Router, middleware,
    routing::{get, post},
};
use std::sync::Arc;

use platform::clock::{Clock, SystemClock};

use crate::application::config::AuthConfig;
use crate::infra::postgres::PgAuthRepository;
use crate::presentation::handlers::{self, AuthAppState, AuthRepo};
use crate::presentation::middleware::require_access_token;

/// Create the Auth router with PostgreSQL repository
pub fn auth_router(repo: PgAuthRepository, config: AuthConfig) -> Router {
    auth_router_generic(repo, config, Arc::new(SystemClock))
}

/// Create a generic Auth router for any repository implementation
///
/// Only the protected routes sit behind [`require_access_token`]; login,
/// logout and the debug cookie routes never see the finalizer.
pub fn auth_router_generic<R>(repo: R, config: AuthConfig, clock: Arc<dyn Clock>) -> Router
where
    R: AuthRepo,
{
    let state = AuthAppState::new(repo, config, clock);

    let protected = Router::new()
        .route("/authenticate", get(handlers::authenticate))
        .route("/admin/authenticate", get(handlers::admin_authenticate))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_access_token::<R>,
        ));

    Router::new()
        .route("/login", post(handlers::login::<R>))
        .route("/logout", get(handlers::logout::<R>))
        .route("/set-cookie", get(handlers::set_cookie))
        .route("/get-cookie", get(handlers::get_cookie))
        .merge(protected)
        .with_state(state)
}
