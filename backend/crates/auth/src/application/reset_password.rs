//! Reset Student Password Use Case
//!
//! An admin sets a new password for a student; the student must change it
//! again on next login.

use std::sync::Arc;

use kernel::id::UserId;
use platform::password::{ClearTextPassword, PasswordPolicyError};

use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};

const MISSING_FIELDS: &str = "User ID and new password are required";

/// Reset password input
pub struct ResetPasswordInput {
    pub user_id: UserId,
    pub new_password: String,
}

/// Reset student password use case (admin only)
pub struct ResetPasswordUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> ResetPasswordUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    pub async fn execute(&self, input: ResetPasswordInput) -> AuthResult<()> {
        if input.user_id.is_unset() || input.new_password.is_empty() {
            return Err(AuthError::Validation(MISSING_FIELDS));
        }

        let user = self
            .user_repo
            .find_by_id(input.user_id)
            .await
            .map_err(|e| e.or_storage("Failed to fetch user"))?
            .ok_or(AuthError::UserNotFound)?;

        if !user.is_student() {
            return Err(AuthError::Validation("Can only reset student passwords"));
        }

        let password = ClearTextPassword::new(input.new_password).map_err(|e| match e {
            PasswordPolicyError::EmptyOrWhitespace => AuthError::Validation(MISSING_FIELDS),
            _ => AuthError::Validation("Password is invalid"),
        })?;
        let hash = password.hash()?;

        let updated = self
            .user_repo
            .update_password(user.id, &hash, true)
            .await
            .map_err(|e| e.or_storage("Failed to reset password"))?;
        if !updated {
            return Err(AuthError::UserNotFound);
        }

        tracing::info!(user_id = %user.id, "Student password reset");

        Ok(())
    }
}
