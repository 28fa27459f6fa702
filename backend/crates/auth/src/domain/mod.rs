//! Domain Layer
//!
//! Contains entities, value objects, and repository traits.

pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::{account::Account, one_time_code::OneTimeCode, revoked_token::RevokedToken};
pub use repository::{AccountRepository, OneTimeCodeRepository, RevokedTokenRepository};
