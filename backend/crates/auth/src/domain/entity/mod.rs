pub mod auth_session;
pub mod principal;
