//! Payment History Use Case
//!
//! A user's payments plus their summary, looked up by id (the caller's own
//! history) or by NIS (admin view).

use std::sync::Arc;

use auth::domain::UserRepository;
use auth::models::User;
use kernel::id::UserId;

use crate::application::config::PaymentConfig;
use crate::domain::entities::{Payment, PaymentSummary};
use crate::domain::repository::PaymentRepository;
use crate::domain::services::summarize;
use crate::error::{PaymentError, PaymentResult};

/// History output
pub struct PaymentHistory {
    pub user: User,
    pub summary: PaymentSummary,
    /// Newest first
    pub payments: Vec<Payment>,
}

/// Payment history use case
pub struct PaymentHistoryUseCase<P, U>
where
    P: PaymentRepository,
    U: UserRepository,
{
    payment_repo: Arc<P>,
    user_repo: Arc<U>,
    config: Arc<PaymentConfig>,
}

impl<P, U> PaymentHistoryUseCase<P, U>
where
    P: PaymentRepository,
    U: UserRepository,
{
    pub fn new(payment_repo: Arc<P>, user_repo: Arc<U>, config: Arc<PaymentConfig>) -> Self {
        Self {
            payment_repo,
            user_repo,
            config,
        }
    }

    /// History of the user with `user_id`
    pub async fn for_user(&self, user_id: UserId) -> PaymentResult<PaymentHistory> {
        let user = self
            .user_repo
            .find_by_id(user_id)
            .await
            .map_err(PaymentError::user_lookup)?
            .ok_or(PaymentError::UserNotFound)?;

        self.build(user).await
    }

    /// History of the student with `nis` (surrounding whitespace ignored)
    pub async fn for_nis(&self, nis: &str) -> PaymentResult<PaymentHistory> {
        let nis = nis.trim();
        if nis.is_empty() {
            return Err(PaymentError::Validation("NIS is required"));
        }

        let user = self
            .user_repo
            .find_by_nis(nis)
            .await
            .map_err(PaymentError::user_lookup)?
            .ok_or_else(|| {
                tracing::debug!(nis = %nis, "No user for NIS");
                PaymentError::UserNotFound
            })?;

        self.build(user).await
    }

    async fn build(&self, user: User) -> PaymentResult<PaymentHistory> {
        let payments = self
            .payment_repo
            .list_by_user(user.id)
            .await
            .map_err(|e| e.or_storage("Failed to fetch payments"))?;

        let summary = summarize(self.config.total_tagihan, &payments)?;

        Ok(PaymentHistory {
            user,
            summary,
            payments,
        })
    }
}
