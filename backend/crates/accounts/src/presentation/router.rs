//! Accounts Router

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::application::config::AccountsConfig;
use crate::domain::repository::{BanRepository, LoginAttemptRepository, UserRepository};
use crate::infra::postgres::PgAccountsRepository;
use crate::presentation::handlers::{self, AccountsAppState};

/// Create the accounts router with PostgreSQL repository
pub fn accounts_router(repo: PgAccountsRepository, config: AccountsConfig) -> Router {
    accounts_router_generic(repo, config)
}

/// Create a generic accounts router for any repository implementation
pub fn accounts_router_generic<R>(repo: R, config: AccountsConfig) -> Router
where
    R: UserRepository + LoginAttemptRepository + BanRepository + Clone + Send + Sync + 'static,
{
    let state = AccountsAppState {
        repo: Arc::new(repo),
        config: Arc::new(config),
    };

    Router::new()
        .route(
            "/users",
            post(handlers::create_user::<R>).get(handlers::list_users::<R>),
        )
        .route("/users/email", get(handlers::get_user_by_email::<R>))
        .route(
            "/users/{id}",
            get(handlers::get_user::<R>)
                .put(handlers::update_user::<R>)
                .delete(handlers::delete_user::<R>),
        )
        .route("/auth/login", post(handlers::login::<R>))
        .with_state(state)
}
