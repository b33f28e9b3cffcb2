//! Create Payment Use Case (admin)

use std::sync::Arc;

use auth::domain::UserRepository;
use kernel::id::UserId;

use crate::domain::entities::{NewPayment, Payment};
use crate::domain::repository::PaymentRepository;
use crate::domain::services::{normalize_keterangan, parse_tanggal, validate_nominal};
use crate::error::{PaymentError, PaymentResult};

/// Create payment input
pub struct CreatePaymentInput {
    pub user_id: UserId,
    /// `YYYY-MM-DD`
    pub tanggal: String,
    pub nominal: i64,
    pub keterangan: Option<String>,
}

/// Create payment use case
pub struct CreatePaymentUseCase<P, U>
where
    P: PaymentRepository,
    U: UserRepository,
{
    payment_repo: Arc<P>,
    user_repo: Arc<U>,
}

impl<P, U> CreatePaymentUseCase<P, U>
where
    P: PaymentRepository,
    U: UserRepository,
{
    pub fn new(payment_repo: Arc<P>, user_repo: Arc<U>) -> Self {
        Self {
            payment_repo,
            user_repo,
        }
    }

    pub async fn execute(&self, input: CreatePaymentInput) -> PaymentResult<Payment> {
        if input.user_id.is_unset() {
            return Err(PaymentError::Validation("user_id is required"));
        }
        let tanggal = parse_tanggal(&input.tanggal)?;
        let nominal = validate_nominal(input.nominal)?;

        self.user_repo
            .find_by_id(input.user_id)
            .await
            .map_err(PaymentError::user_lookup)?
            .ok_or(PaymentError::UserNotFound)?;

        let new_payment = NewPayment {
            user_id: input.user_id,
            tanggal,
            nominal,
            keterangan: normalize_keterangan(input.keterangan),
        };

        let payment = self
            .payment_repo
            .create(&new_payment)
            .await
            .map_err(|e| e.or_storage_detail("Failed to create payment"))?;

        tracing::info!(
            payment_id = %payment.id,
            user_id = %payment.user_id,
            nominal = payment.nominal,
            "Payment recorded"
        );

        Ok(payment)
    }
}
