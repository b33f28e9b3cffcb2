//! Update Payment Use Case (admin)
//!
//! Partial update: only the fields present in the request change.

use std::sync::Arc;

use kernel::id::PaymentId;

use crate::domain::entities::{Payment, PaymentChanges};
use crate::domain::repository::PaymentRepository;
use crate::domain::services::{normalize_keterangan, parse_tanggal, validate_nominal};
use crate::error::{PaymentError, PaymentResult};

/// Update payment input
pub struct UpdatePaymentInput {
    pub payment_id: PaymentId,
    pub tanggal: Option<String>,
    pub nominal: Option<i64>,
    /// Blank clears the note
    pub keterangan: Option<String>,
}

/// Update payment use case
pub struct UpdatePaymentUseCase<P>
where
    P: PaymentRepository,
{
    payment_repo: Arc<P>,
}

impl<P> UpdatePaymentUseCase<P>
where
    P: PaymentRepository,
{
    pub fn new(payment_repo: Arc<P>) -> Self {
        Self { payment_repo }
    }

    pub async fn execute(&self, input: UpdatePaymentInput) -> PaymentResult<Payment> {
        if input.payment_id.is_unset() {
            return Err(PaymentError::Validation("payment_id is required"));
        }

        let changes = PaymentChanges {
            tanggal: input.tanggal.as_deref().map(parse_tanggal).transpose()?,
            nominal: input.nominal.map(validate_nominal).transpose()?,
            keterangan: input.keterangan.map(|k| normalize_keterangan(Some(k))),
        };
        if changes.is_empty() {
            return Err(PaymentError::Validation("No fields to update"));
        }

        self.payment_repo
            .find_by_id(input.payment_id)
            .await
            .map_err(|e| e.or_storage("Failed to fetch payment"))?
            .ok_or(PaymentError::PaymentNotFound)?;

        let updated = self
            .payment_repo
            .update(input.payment_id, &changes)
            .await
            .map_err(|e| e.or_storage_detail("Failed to update payment"))?
            .ok_or(PaymentError::PaymentNotFound)?;

        tracing::info!(payment_id = %updated.id, "Payment updated");

        Ok(updated)
    }
}
