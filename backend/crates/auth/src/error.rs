//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::password::PasswordHashError;
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
///
/// Display strings are the English canonical messages sent to clients
/// (translated on the way out by `kernel::i18n`).
#[derive(Debug, Error)]
pub enum AuthError {
    /// Missing or malformed input
    #[error("{0}")]
    Validation(&'static str),

    /// Unknown user, wrong role for the login route, or wrong password
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// No `Authorization` header
    #[error("Authorization header required")]
    MissingAuthHeader,

    /// `Authorization` header without the `Bearer ` scheme
    #[error("Invalid Authorization format")]
    InvalidAuthHeader,

    /// Bad signature, bad structure or missing claims
    #[error("Invalid token")]
    InvalidToken,

    /// Well-formed token past its expiry
    #[error("Invalid token")]
    TokenExpired,

    /// Handler reached without an identity in the request
    #[error("Unauthorized")]
    Unauthenticated,

    /// Authenticated, but not an admin
    #[error("Admin access required")]
    AdminRequired,

    /// User not found
    #[error("User not found")]
    UserNotFound,

    /// Change-password with the wrong current password
    #[error("Old password is incorrect")]
    OldPasswordIncorrect,

    /// Username / NIS / virtual account already taken
    #[error("NIS or virtual account already exists")]
    AlreadyExists,

    /// Token signing failed
    #[error("Failed to generate token")]
    TokenGeneration(#[source] jsonwebtoken::errors::Error),

    /// Password hashing failed
    #[error("Failed to hash password")]
    PasswordHash(#[from] PasswordHashError),

    /// Storage failure reported with an operation-specific message
    #[error("{0}")]
    Storage(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::Validation(_) | AuthError::OldPasswordIncorrect => ErrorKind::BadRequest,
            AuthError::InvalidCredentials
            | AuthError::MissingAuthHeader
            | AuthError::InvalidAuthHeader
            | AuthError::InvalidToken
            | AuthError::TokenExpired
            | AuthError::Unauthenticated => ErrorKind::Unauthorized,
            AuthError::AdminRequired => ErrorKind::Forbidden,
            AuthError::UserNotFound => ErrorKind::NotFound,
            AuthError::AlreadyExists => ErrorKind::Conflict,
            AuthError::TokenGeneration(_)
            | AuthError::PasswordHash(_)
            | AuthError::Storage(_)
            | AuthError::Database(_)
            | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        match self {
            // Driver details stay in the log
            AuthError::Database(_) => AppError::internal("Database error"),
            AuthError::Internal(_) => AppError::internal("Internal server error"),
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    /// Replace a raw database error with a 500 carrying `message`.
    /// Domain errors pass through untouched.
    pub(crate) fn or_storage(self, message: &str) -> Self {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "{message}");
                AuthError::Storage(message.to_string())
            }
            other => other,
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::TokenGeneration(e) => {
                tracing::error!(error = %e, "Token signing failed");
            }
            AuthError::PasswordHash(e) => {
                tracing::error!(error = %e, "Password hashing failed");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::TokenExpired => {
                tracing::debug!("Rejected expired token");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        AuthError::Internal(err.to_string())
    }
}
