//! Application Layer
//!
//! Use cases and application services.

pub mod authenticate;
pub mod config;
pub mod refresh_session;
pub mod sign_in;
pub mod sign_out;

// Re-exports
pub use authenticate::{Authenticated, AuthenticateUseCase, CookieIntent};
pub use config::{AuthConfig, ConfigError};
pub use refresh_session::{RefreshOutput, RefreshSessionUseCase};
pub use sign_in::{SignInInput, SignInOutput, SignInUseCase};
pub use sign_out::SignOutUseCase;
