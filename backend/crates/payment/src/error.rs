//! Payment Error Types
//!
//! This module provides payment-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use auth::AuthError;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Payment-specific result type alias
pub type PaymentResult<T> = Result<T, PaymentError>;

/// Payment-specific error variants
#[derive(Debug, Error)]
pub enum PaymentError {
    /// Missing or malformed input
    #[error("{0}")]
    Validation(&'static str),

    /// Payer does not exist
    #[error("User not found")]
    UserNotFound,

    /// Payment not found
    #[error("Payment not found")]
    PaymentNotFound,

    /// Handler reached without an identity in the request
    #[error("Unauthorized")]
    Unauthenticated,

    /// Storage failure reported with an operation-specific message
    #[error("{0}")]
    Storage(String),

    /// Payment totals exceed the integer range
    #[error("Failed to fetch payment summary")]
    SummaryOverflow,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl PaymentError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            PaymentError::Validation(_) => ErrorKind::BadRequest,
            PaymentError::UserNotFound | PaymentError::PaymentNotFound => ErrorKind::NotFound,
            PaymentError::Unauthenticated => ErrorKind::Unauthorized,
            PaymentError::SummaryOverflow
            | PaymentError::Storage(_)
            | PaymentError::Database(_)
            | PaymentError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        match self {
            PaymentError::Database(_) => AppError::internal("Database error"),
            PaymentError::Internal(_) => AppError::internal("Internal server error"),
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    /// Replace a raw database error with a 500 carrying `message`.
    /// Domain errors pass through untouched.
    pub(crate) fn or_storage(self, message: &str) -> Self {
        match self {
            PaymentError::Database(e) => {
                tracing::error!(error = %e, "{message}");
                PaymentError::Storage(message.to_string())
            }
            other => other,
        }
    }

    /// Same as [`PaymentError::or_storage`] but keeps the driver detail
    /// after `prefix` (`"Failed to create payment: <detail>"`).
    pub(crate) fn or_storage_detail(self, prefix: &str) -> Self {
        match self {
            PaymentError::Database(e) => {
                tracing::error!(error = %e, "{prefix}");
                PaymentError::Storage(format!("{prefix}: {e}"))
            }
            other => other,
        }
    }

    /// Failure while looking up a user through the auth repository
    pub(crate) fn user_lookup(err: AuthError) -> Self {
        tracing::error!(error = %err, "User lookup failed");
        PaymentError::Storage("Failed to fetch user".to_string())
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            PaymentError::Database(e) => {
                tracing::error!(error = %e, "Payment database error");
            }
            PaymentError::Internal(msg) => {
                tracing::error!(message = %msg, "Payment internal error");
            }
            PaymentError::SummaryOverflow => {
                tracing::error!("Payment totals overflowed");
            }
            _ => {
                tracing::debug!(error = %self, "Payment error");
            }
        }
    }
}

impl From<PaymentError> for AppError {
    fn from(err: PaymentError) -> Self {
        err.to_app_error()
    }
}

impl IntoResponse for PaymentError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(PaymentError::Validation("NIS is required").kind(), ErrorKind::BadRequest);
        assert_eq!(PaymentError::PaymentNotFound.kind(), ErrorKind::NotFound);
        assert_eq!(PaymentError::UserNotFound.kind(), ErrorKind::NotFound);
        assert_eq!(
            PaymentError::Storage("Failed to fetch payments".into()).kind(),
            ErrorKind::InternalServerError
        );
    }

    #[test]
    fn test_storage_detail_prefix() {
        let err = PaymentError::Database(sqlx::Error::PoolTimedOut)
            .or_storage_detail("Failed to create payment");
        let app = err.to_app_error();
        assert_eq!(app.status_code(), 500);
        assert!(app.message().starts_with("Failed to create payment: "));
    }

    #[test]
    fn test_domain_error_passes_through() {
        let err = PaymentError::PaymentNotFound.or_storage("Failed to fetch payment");
        assert!(matches!(err, PaymentError::PaymentNotFound));
    }
}
