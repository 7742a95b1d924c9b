//! Application Layer
//!
//! Use cases and application services.

pub mod config;
pub mod create_user;
pub mod delete_user;
pub mod query_users;
pub mod sign_in;
pub mod update_user;

// Re-exports
pub use config::AccountsConfig;
pub use create_user::{CreateUserInput, CreateUserUseCase};
pub use delete_user::DeleteUserUseCase;
pub use query_users::{QueryUsersUseCase, UserPage};
pub use sign_in::{ClientContext, SignInInput, SignInOutput, SignInUseCase};
pub use update_user::{UpdateUserInput, UpdateUserUseCase};
