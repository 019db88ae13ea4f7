//! Infrastructure Layer
//!
//! Database implementations and the token codec.

pub mod jwt;
pub mod memory;
pub mod postgres;

pub use jwt::JwtCodec;
pub use memory::InMemoryAuthRepository;
pub use postgres::PgAuthRepository;
