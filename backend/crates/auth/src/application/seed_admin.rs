//! Default Admin Seeding
//!
//! Run once at startup: a fresh database gets one admin account so that
//! somebody can log in and create students.

use std::sync::Arc;

use platform::password::ClearTextPassword;

use crate::domain::entity::user::NewUser;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::user_role::UserRole;
use crate::error::{AuthError, AuthResult};

pub const DEFAULT_ADMIN_USERNAME: &str = "admin";
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";
pub const DEFAULT_ADMIN_NAME: &str = "Administrator";

/// Ensure at least one admin exists
pub struct SeedAdminUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> SeedAdminUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    /// Returns `true` when the default admin was created
    pub async fn execute(&self) -> AuthResult<bool> {
        if self.user_repo.exists_with_role(UserRole::Admin).await? {
            tracing::debug!("Admin account present, skipping seed");
            return Ok(false);
        }

        let password = ClearTextPassword::new(DEFAULT_ADMIN_PASSWORD.to_string())
            .map_err(|e| AuthError::Internal(e.to_string()))?;
        let hash = password.hash()?;

        let admin = NewUser::admin(
            DEFAULT_ADMIN_USERNAME.to_string(),
            DEFAULT_ADMIN_NAME.to_string(),
            hash,
        );
        let user = self.user_repo.create(&admin).await?;

        tracing::info!(
            user_id = %user.id,
            username = DEFAULT_ADMIN_USERNAME,
            "Default admin created"
        );

        Ok(true)
    }
}
