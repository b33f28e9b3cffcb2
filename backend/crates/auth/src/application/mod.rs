//! Application Layer
//!
//! Use cases and application services.

pub mod change_password;
pub mod config;
pub mod create_student;
pub mod delete_student;
pub mod list_students;
pub mod reset_password;
pub mod seed_admin;
pub mod sign_in;
pub mod token;

#[cfg(test)]
mod tests;

// Re-exports
pub use change_password::{ChangePasswordInput, ChangePasswordUseCase};
pub use config::AuthConfig;
pub use create_student::{CreateStudentInput, CreateStudentUseCase};
pub use delete_student::DeleteStudentUseCase;
pub use list_students::ListStudentsUseCase;
pub use reset_password::{ResetPasswordInput, ResetPasswordUseCase};
pub use seed_admin::SeedAdminUseCase;
pub use sign_in::{LoginKind, SignInInput, SignInOutput, SignInUseCase};
pub use token::{AuthIdentity, Claims, TokenService};
