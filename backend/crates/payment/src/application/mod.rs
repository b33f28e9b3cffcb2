//! Application Layer - Use cases
//!
//! This layer orchestrates domain logic and repository operations.

pub mod config;
pub mod create_payment;
pub mod delete_payment;
pub mod history;
pub mod list_payments;
pub mod update_payment;


pub use config::PaymentConfig;
pub use create_payment::{CreatePaymentInput, CreatePaymentUseCase};
pub use delete_payment::DeletePaymentUseCase;
pub use history::{PaymentHistory, PaymentHistoryUseCase};
pub use list_payments::ListPaymentsUseCase;
pub use update_payment::{UpdatePaymentInput, UpdatePaymentUseCase};
