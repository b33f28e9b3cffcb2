//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.
//!
//! Listings are ordered newest first: `tanggal DESC, created_at DESC`.

use kernel::id::{PaymentId, UserId};

use crate::domain::entities::{NewPayment, Payment, PaymentChanges, PaymentRecord};
use crate::error::PaymentResult;

/// Payment repository trait
#[trait_variant::make(PaymentRepository: Send)]
pub trait LocalPaymentRepository {
    /// Insert a payment. An unknown `user_id` yields `PaymentError::UserNotFound`.
    async fn create(&self, payment: &NewPayment) -> PaymentResult<Payment>;

    /// Find payment by ID
    async fn find_by_id(&self, id: PaymentId) -> PaymentResult<Option<Payment>>;

    /// Payments of one user
    async fn list_by_user(&self, user_id: UserId) -> PaymentResult<Vec<Payment>>;

    /// Payments joined with their payer, optionally restricted to one user
    async fn list_with_payer(&self, user_id: Option<UserId>) -> PaymentResult<Vec<PaymentRecord>>;

    /// Apply a partial update and refresh `updated_at`.
    /// Returns `None` when no such payment exists.
    async fn update(&self, id: PaymentId, changes: &PaymentChanges) -> PaymentResult<Option<Payment>>;

    /// Returns `false` when no such payment exists
    async fn delete(&self, id: PaymentId) -> PaymentResult<bool>;
}
