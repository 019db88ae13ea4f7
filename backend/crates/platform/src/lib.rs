//! Platform Crate - Technical Infrastructure
//!
//! Shared technical foundations with no business meaning:
//! - Cookie building and credential extraction
//! - Password hashing (Argon2id)
//! - Injectable clock
//! - Zeroizing secret keys

pub mod clock;
pub mod cookie;
pub mod password;
pub mod secret;
