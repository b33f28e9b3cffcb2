//! Domain Layer - Business logic and entities
//!
//! This layer contains:
//! - Domain entities (Payment, PaymentSummary)
//! - Domain services (validation, summary arithmetic)
//! - Repository traits (interfaces)

pub mod entities;
pub mod repository;
pub mod services;
