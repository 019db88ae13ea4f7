//! Domain Layer
//!
//! Entities, value objects, the token model and repository traits.

pub mod entity;
pub mod repository;
pub mod token;
pub mod value_object;

// Re-exports
pub use entity::{
    auth_session::AuthSession,
    principal::{AuthPrincipal, Principal},
};
pub use repository::{PrincipalRepository, SessionRepository};
pub use token::{AccessClaims, ExpiryCheck, TokenCodec, TokenError};
