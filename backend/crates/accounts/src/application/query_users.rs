//! User Query Use Cases
//!
//! Read-only lookups: by id, by email, and paginated listing.

use std::sync::Arc;

use kernel::id::UserId;

use crate::application::config::AccountsConfig;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::email::Email;
use crate::error::{AccountsError, AccountsResult};

/// One page of users plus the total count across all pages
pub struct UserPage {
    pub users: Vec<User>,
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
}

/// User query use case
pub struct QueryUsersUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AccountsConfig>,
}

impl<U> QueryUsersUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AccountsConfig>) -> Self {
        Self { user_repo, config }
    }

    pub async fn get_by_id(&self, user_id: &UserId) -> AccountsResult<User> {
        self.user_repo
            .find_by_id(user_id)
            .await?
            .ok_or(AccountsError::UserNotFound)
    }

    pub async fn get_by_email(&self, email: &str) -> AccountsResult<User> {
        let email = Email::new(email).map_err(|e| AccountsError::Validation(e.to_string()))?;
        self.user_repo
            .find_by_email(&email)
            .await?
            .ok_or(AccountsError::UserNotFound)
    }

    pub async fn list(&self, page: i64, page_size: i64) -> AccountsResult<UserPage> {
        let (page, page_size) = self.config.clamp_page(page, page_size);
        let offset = (page - 1) * page_size;

        let users = self.user_repo.list(page_size, offset).await?;
        let total = self.user_repo.count().await?;

        Ok(UserPage {
            users,
            total,
            page,
            page_size,
        })
    }
}
