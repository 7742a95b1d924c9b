//! Domain Layer
//!
//! Contains entities, value objects, repository traits, and the ban policy.

pub mod ban_policy;
pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use ban_policy::BanPolicy;
pub use entity::{ban::BanRecord, login_attempt::LoginAttempt, user::User};
pub use repository::{BanRepository, LoginAttemptRepository, UserRepository};
