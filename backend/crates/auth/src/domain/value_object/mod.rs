//! Value Object Module

pub mod email;
pub mod principal_id;
