//! API DTOs (Data Transfer Objects)
//!
//! Request fields default to empty so that a missing field reports the
//! same "... are required" message as an empty one.

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use serde::{Deserialize, Serialize};

use crate::domain::entity::user::User;
use crate::domain::value_object::user_role::UserRole;

// ============================================================================
// Login
// ============================================================================

/// Admin login request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AdminLoginRequest {
    pub username: String,
    pub password: String,
}

/// Student login request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StudentLoginRequest {
    pub nis: String,
    pub password: String,
}

/// Login response
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserResponse,
    pub must_change_password: bool,
}

// ============================================================================
// Password
// ============================================================================

/// Change own password request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ChangePasswordRequest {
    pub old_password: String,
    pub new_password: String,
}

/// Admin reset of a student's password
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ResetPasswordRequest {
    pub user_id: UserId,
    pub new_password: String,
}

// ============================================================================
// Students
// ============================================================================

/// Create student request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CreateStudentRequest {
    pub nis: String,
    pub virtual_account: String,
    pub name: String,
    pub password: String,
}

/// `?user_id=` query
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserIdQuery {
    pub user_id: Option<String>,
}

// ============================================================================
// Shared
// ============================================================================

/// Public view of a user; the password hash never leaves the process
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: UserId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nis: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub virtual_account: Option<String>,
    pub name: String,
    pub role: UserRole,
    pub must_change_password: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            nis: user.nis.clone(),
            virtual_account: user.virtual_account.clone(),
            name: user.name.clone(),
            role: user.role,
            must_change_password: user.must_change_password,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

/// `{"message": ...}`
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
