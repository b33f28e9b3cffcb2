//! Payment Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Payment entities, validation rules, repository traits
//! - `application/` - Use cases
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - Students read their own history with a dues summary
//! - Admins record, edit (partially) and delete payments
//! - Admin listings carry a summary of the paying user

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::PaymentConfig;
pub use error::{PaymentError, PaymentResult};
pub use infra::{MemoryPaymentRepository, PgPaymentRepository};
pub use presentation::router::payment_router;

pub mod models {
    pub use crate::domain::entities::*;
    pub use crate::presentation::dto::*;
}
