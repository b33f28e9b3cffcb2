//! Change Password Use Case
//!
//! Lets a logged-in user replace their own password, which also clears
//! the must-change-password flag.

use std::sync::Arc;

use kernel::id::UserId;
use platform::password::{ClearTextPassword, MIN_PASSWORD_LENGTH, PasswordPolicyError};

use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};

/// Change password input
pub struct ChangePasswordInput {
    pub user_id: UserId,
    pub old_password: String,
    pub new_password: String,
}

/// Change password use case
pub struct ChangePasswordUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> ChangePasswordUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    pub async fn execute(&self, input: ChangePasswordInput) -> AuthResult<()> {
        if input.old_password.is_empty() || input.new_password.is_empty() {
            return Err(AuthError::Validation(
                "Old password and new password are required",
            ));
        }

        let new_password =
            ClearTextPassword::with_min_length(input.new_password, MIN_PASSWORD_LENGTH).map_err(
                |e| match e {
                    PasswordPolicyError::TooShort { .. } => {
                        AuthError::Validation("New password must be at least 6 characters")
                    }
                    _ => AuthError::Validation("New password is invalid"),
                },
            )?;

        let user = self
            .user_repo
            .find_by_id(input.user_id)
            .await
            .map_err(|e| e.or_storage("Failed to fetch user"))?
            .ok_or(AuthError::UserNotFound)?;

        let old_password = ClearTextPassword::new(input.old_password)
            .map_err(|_| AuthError::OldPasswordIncorrect)?;
        if !user.password_hash.verify(&old_password) {
            return Err(AuthError::OldPasswordIncorrect);
        }

        let hash = new_password.hash()?;

        let updated = self
            .user_repo
            .update_password(user.id, &hash, false)
            .await
            .map_err(|e| e.or_storage("Failed to update password"))?;
        if !updated {
            return Err(AuthError::UserNotFound);
        }

        tracing::info!(user_id = %user.id, "Password changed");

        Ok(())
    }
}
