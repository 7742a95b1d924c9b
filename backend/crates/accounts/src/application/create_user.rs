//! Create User Use Case

use std::sync::Arc;

use platform::password::ClearTextPassword;

use crate::application::config::AccountsConfig;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, user_name::UserName};
use crate::error::{AccountsError, AccountsResult};

/// Create user input
pub struct CreateUserInput {
    pub user_name: String,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub age: i16,
}

/// Create user use case
pub struct CreateUserUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AccountsConfig>,
}

impl<U> CreateUserUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AccountsConfig>) -> Self {
        Self { user_repo, config }
    }

    pub async fn execute(&self, input: CreateUserInput) -> AccountsResult<User> {
        let user_name = UserName::new(input.user_name)
            .map_err(|e| AccountsError::Validation(e.to_string()))?;
        let email =
            Email::new(input.email).map_err(|e| AccountsError::Validation(e.to_string()))?;

        // Application-level uniqueness pre-checks; the unique indexes in
        // the schema backstop the check-then-create race
        if self.user_repo.exists_by_email(&email).await? {
            return Err(AccountsError::EmailTaken);
        }
        if self.user_repo.exists_by_user_name(&user_name).await? {
            return Err(AccountsError::UserNameTaken);
        }

        // Hashing failure is fatal for this path, not retried
        let password = ClearTextPassword::new(input.password)
            .map_err(|e| AccountsError::Validation(e.to_string()))?;
        let password_hash = password
            .hash(self.config.pepper())
            .map_err(|e| AccountsError::Internal(e.to_string()))?;

        let user = User::new(
            user_name,
            email,
            password_hash,
            input.first_name,
            input.last_name,
            input.age,
        );

        self.user_repo.create(&user).await?;

        tracing::info!(
            user_id = %user.user_id,
            user_name = %user.user_name,
            "User created"
        );

        Ok(user)
    }
}
