//! Shared Kernel
//!
//! Vocabulary shared by every backend crate:
//! - The unified [`error::app_error::AppError`] and its HTTP classification
//! - Typed identifiers ([`id::Id`])
//!
//! Only things with a stable meaning across crates belong here.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
