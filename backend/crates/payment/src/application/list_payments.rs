//! List Payments Use Case (admin)

use std::sync::Arc;

use kernel::id::UserId;

use crate::domain::entities::PaymentRecord;
use crate::domain::repository::PaymentRepository;
use crate::error::PaymentResult;

/// Admin listings, each payment joined with its payer
pub struct ListPaymentsUseCase<P>
where
    P: PaymentRepository,
{
    payment_repo: Arc<P>,
}

impl<P> ListPaymentsUseCase<P>
where
    P: PaymentRepository,
{
    pub fn new(payment_repo: Arc<P>) -> Self {
        Self { payment_repo }
    }

    /// Every payment
    pub async fn all(&self) -> PaymentResult<Vec<PaymentRecord>> {
        self.list(None).await
    }

    /// Payments of one user; unknown users simply have none
    pub async fn by_user(&self, user_id: UserId) -> PaymentResult<Vec<PaymentRecord>> {
        self.list(Some(user_id)).await
    }

    async fn list(&self, user_id: Option<UserId>) -> PaymentResult<Vec<PaymentRecord>> {
        self.payment_repo
            .list_with_payer(user_id)
            .await
            .map_err(|e| e.or_storage("Failed to fetch payments"))
    }
}
