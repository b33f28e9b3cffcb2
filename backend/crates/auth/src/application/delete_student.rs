//! Delete Student Use Case
//!
//! Payments of the student go with it (`ON DELETE CASCADE`).

use std::sync::Arc;

use kernel::id::UserId;

use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};

/// Delete student use case (admin only)
pub struct DeleteStudentUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> DeleteStudentUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    pub async fn execute(&self, user_id: UserId) -> AuthResult<()> {
        let user = self
            .user_repo
            .find_by_id(user_id)
            .await
            .map_err(|e| e.or_storage("Failed to fetch user"))?
            .ok_or(AuthError::UserNotFound)?;

        if !user.is_student() {
            return Err(AuthError::Validation("Can only delete student accounts"));
        }

        let deleted = self
            .user_repo
            .delete(user.id)
            .await
            .map_err(|e| e.or_storage("Failed to delete student"))?;
        if !deleted {
            return Err(AuthError::UserNotFound);
        }

        tracing::info!(user_id = %user.id, "Student deleted");

        Ok(())
    }
}
