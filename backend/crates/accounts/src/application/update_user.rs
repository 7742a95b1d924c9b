//! Update User Use Case
//!
//! Partial update: only fields present in the input are touched. Changed
//! user names and emails go through the same uniqueness pre-checks as
//! creation.

use std::sync::Arc;

use kernel::id::UserId;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, user_name::UserName};
use crate::error::{AccountsError, AccountsResult};

/// Update user input; `None` fields are left unchanged
#[derive(Default)]
pub struct UpdateUserInput {
    pub user_name: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub age: Option<i16>,
    pub is_active: Option<bool>,
}

/// Update user use case
pub struct UpdateUserUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> UpdateUserUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    pub async fn execute(&self, user_id: &UserId, input: UpdateUserInput) -> AccountsResult<User> {
        let mut user = self
            .user_repo
            .find_by_id(user_id)
            .await?
            .ok_or(AccountsError::UserNotFound)?;

        if let Some(email) = input.email {
            let email = Email::new(email).map_err(|e| AccountsError::Validation(e.to_string()))?;
            if email != user.email {
                if self.user_repo.exists_by_email(&email).await? {
                    return Err(AccountsError::EmailTaken);
                }
                user.set_email(email);
            }
        }

        if let Some(user_name) = input.user_name {
            let user_name =
                UserName::new(user_name).map_err(|e| AccountsError::Validation(e.to_string()))?;
            if user_name != user.user_name {
                if self.user_repo.exists_by_user_name(&user_name).await? {
                    return Err(AccountsError::UserNameTaken);
                }
                user.set_user_name(user_name);
            }
        }

        if input.first_name.is_some() || input.last_name.is_some() || input.age.is_some() {
            user.set_profile(input.first_name, input.last_name, input.age);
        }

        if let Some(is_active) = input.is_active {
            user.set_active(is_active);
        }

        self.user_repo.update(&user).await?;

        tracing::info!(user_id = %user.user_id, "User updated");

        Ok(user)
    }
}
