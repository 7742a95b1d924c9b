//! Accounts Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits, ban policy
//! - `application/` - Use cases and application services
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - User profile CRUD with pagination
//! - Login with username or email + password
//! - Append-only login attempt ledger
//! - Temporary bans after repeated failed logins
//!
//! ## Security Model
//! - Passwords hashed with Argon2id, verified in constant time
//! - Ban check runs before any credential work
//! - Failed attempts from one origin count against unknown identities too
//! - Bans expire lazily and are swept periodically

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::AccountsConfig;
pub use error::{AccountsError, AccountsResult};
pub use infra::postgres::PgAccountsRepository;
pub use presentation::router::{accounts_router, accounts_router_generic};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

pub mod store {
    pub use crate::infra::postgres::PgAccountsRepository as AccountsStore;
}

pub mod router {
    pub use crate::presentation::router::*;
}

#[cfg(test)]
mod tests;
