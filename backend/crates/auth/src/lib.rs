//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Business logic, entities, repository traits
//! - `application/` - Use cases and application services
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - Admin login by username, student login by NIS
//! - Stateless HS256 bearer tokens (24 hour lifetime)
//! - Role-gated routes (`require_auth`, `require_admin`)
//! - Student account management and password resets
//! - Default admin seeding on an empty database
//!
//! ## Security Model
//! - Passwords hashed with Argon2id, fresh salt per hash
//! - Unknown user, wrong role and wrong password all answer "Invalid credentials"
//! - Expired and forged tokens answer the same "Invalid token"

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use application::token::{AuthIdentity, TokenService};
pub use error::{AuthError, AuthResult};
pub use infra::{MemoryUserRepository, PgUserRepository};
pub use presentation::router::auth_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod models {
    pub use crate::domain::entity::user::*;
    pub use crate::domain::value_object::user_role::*;
    pub use crate::presentation::dto::*;
}

pub mod middleware {
    pub use crate::presentation::middleware::*;
}
