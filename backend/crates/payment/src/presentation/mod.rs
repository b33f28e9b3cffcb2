//! Presentation Layer - HTTP handlers, DTOs, router

pub mod dto;
pub mod handlers;
pub mod router;

pub use handlers::PaymentAppState;
pub use router::payment_router;
