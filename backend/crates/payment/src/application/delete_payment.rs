//! Delete Payment Use Case (admin)

use std::sync::Arc;

use kernel::id::PaymentId;

use crate::domain::repository::PaymentRepository;
use crate::error::{PaymentError, PaymentResult};

/// Delete payment use case
pub struct DeletePaymentUseCase<P>
where
    P: PaymentRepository,
{
    payment_repo: Arc<P>,
}

impl<P> DeletePaymentUseCase<P>
where
    P: PaymentRepository,
{
    pub fn new(payment_repo: Arc<P>) -> Self {
        Self { payment_repo }
    }

    pub async fn execute(&self, payment_id: PaymentId) -> PaymentResult<()> {
        self.payment_repo
            .find_by_id(payment_id)
            .await
            .map_err(|e| e.or_storage("Failed to fetch payment"))?
            .ok_or(PaymentError::PaymentNotFound)?;

        let deleted = self
            .payment_repo
            .delete(payment_id)
            .await
            .map_err(|e| e.or_storage("Failed to delete payment"))?;
        if !deleted {
            return Err(PaymentError::PaymentNotFound);
        }

        tracing::info!(payment_id = %payment_id, "Payment deleted");

        Ok(())
    }
}
