//! Delete User Use Case

use std::sync::Arc;

use kernel::id::UserId;

use crate::domain::repository::UserRepository;
use crate::error::{AccountsError, AccountsResult};

/// Delete user use case
pub struct DeleteUserUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> DeleteUserUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    pub async fn execute(&self, user_id: &UserId) -> AccountsResult<()> {
        let deleted = self.user_repo.delete(user_id).await?;

        if deleted == 0 {
            return Err(AccountsError::UserNotFound);
        }

        tracing::info!(user_id = %user_id, "User deleted");

        Ok(())
    }
}
