//! Shared Kernel - Domain-crossing minimal core
//!
//! This crate contains the "smallest core" of domain vocabulary:
//! - Common error types and result aliases
//! - Typed integer identifiers for persisted records
//! - The user-facing message translation table
//!
//! **Design Principle**: Only include things that are "hard to change"
//! and have consistent meaning across all domains.

pub mod error {
    pub mod app_error;
    pub mod kind;
    pub mod response;
}
pub mod i18n;
pub mod id;

#[cfg(feature = "axum")]
pub mod json;
