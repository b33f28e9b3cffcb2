//! Sign In Use Case
//!
//! Verifies credentials on the admin or student login route and issues a token.

use std::sync::Arc;

use platform::password::ClearTextPassword;

use crate::application::token::TokenService;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::user_role::UserRole;
use crate::error::{AuthError, AuthResult};

/// Which login route the request came through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginKind {
    /// Username + password
    Admin,
    /// NIS + password
    Student,
}

impl LoginKind {
    /// Role a user must hold to log in through this route
    pub const fn role(&self) -> UserRole {
        match self {
            LoginKind::Admin => UserRole::Admin,
            LoginKind::Student => UserRole::Student,
        }
    }

    const fn missing_fields_message(&self) -> &'static str {
        match self {
            LoginKind::Admin => "Username and password are required",
            LoginKind::Student => "NIS and password are required",
        }
    }
}

/// Sign in input
pub struct SignInInput {
    pub kind: LoginKind,
    /// Username (admin) or NIS (student)
    pub identifier: String,
    pub password: String,
}

/// Sign in output
pub struct SignInOutput {
    pub token: String,
    pub user: User,
}

/// Sign in use case
pub struct SignInUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    tokens: Arc<TokenService>,
}

impl<U> SignInUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, tokens: Arc<TokenService>) -> Self {
        Self { user_repo, tokens }
    }

    pub async fn execute(&self, input: SignInInput) -> AuthResult<SignInOutput> {
        if input.identifier.is_empty() || input.password.is_empty() {
            return Err(AuthError::Validation(input.kind.missing_fields_message()));
        }

        let user = match input.kind {
            LoginKind::Admin => self.user_repo.find_by_username(&input.identifier).await,
            LoginKind::Student => self.user_repo.find_by_nis(&input.identifier).await,
        }
        .map_err(|e| e.or_storage("Failed to fetch user"))?;

        // Unknown user and wrong role are indistinguishable from a wrong password
        let user = user
            .filter(|u| u.role == input.kind.role())
            .ok_or(AuthError::InvalidCredentials)?;

        let password =
            ClearTextPassword::new(input.password).map_err(|_| AuthError::InvalidCredentials)?;

        if !user.password_hash.verify(&password) {
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.tokens.issue(user.id, user.role)?;

        tracing::info!(user_id = %user.id, role = %user.role, "User signed in");

        Ok(SignInOutput { token, user })
    }
}
