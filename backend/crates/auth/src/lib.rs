//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Business logic, entities, repository traits
//! - `application/` - Use cases and application services
//! - `infra/` - Database implementations, token codec
//! - `presentation/` - HTTP handlers, DTOs, router, middleware
//!
//! ## Features
//! - Email + password login starting one server-side session per principal
//! - Short-lived HS256 JWT access tokens bound to that session
//! - Transparent refresh of expired tokens while the session window is open,
//!   rotating the session id so an old token can't be replayed
//! - Role check by string equality
//!
//! ## Security Model
//! - Passwords hashed with Argon2id (optional pepper)
//! - Token carried in an `HttpOnly`, `SameSite=Lax` cookie
//! - Every rejected credential gets the same 403 and a cookie deletion

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::{AuthConfig, ConfigError};
pub use error::{AuthError, AuthResult};
pub use infra::memory::InMemoryAuthRepository;
pub use infra::postgres::PgAuthRepository;
pub use presentation::router::{auth_router, auth_router_generic};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
