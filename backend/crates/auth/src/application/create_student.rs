//! Create Student Use Case

use std::sync::Arc;

use platform::password::{ClearTextPassword, PasswordPolicyError};

use crate::domain::entity::user::{NewUser, User};
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};

const MISSING_FIELDS: &str = "NIS, virtual account, name, and password are required";

/// Create student input
pub struct CreateStudentInput {
    pub nis: String,
    pub virtual_account: String,
    pub name: String,
    /// Initial password handed to the student
    pub password: String,
}

/// Create student use case (admin only)
pub struct CreateStudentUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> CreateStudentUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    pub async fn execute(&self, input: CreateStudentInput) -> AuthResult<User> {
        let nis = input.nis.trim();
        let virtual_account = input.virtual_account.trim();
        let name = input.name.trim();

        if nis.is_empty() || virtual_account.is_empty() || name.is_empty() {
            return Err(AuthError::Validation(MISSING_FIELDS));
        }

        let password = ClearTextPassword::new(input.password).map_err(|e| match e {
            PasswordPolicyError::EmptyOrWhitespace => AuthError::Validation(MISSING_FIELDS),
            _ => AuthError::Validation("Password is invalid"),
        })?;
        let hash = password.hash()?;

        let new_user = NewUser::student(
            nis.to_string(),
            virtual_account.to_string(),
            name.to_string(),
            hash,
        );

        let user = self
            .user_repo
            .create(&new_user)
            .await
            .map_err(|e| match e {
                AuthError::Database(db) => {
                    tracing::error!(error = %db, "Failed to create student");
                    AuthError::Storage(format!("Failed to create student: {db}"))
                }
                other => other,
            })?;

        tracing::info!(user_id = %user.id, nis = %nis, "Student created");

        Ok(user)
    }
}
