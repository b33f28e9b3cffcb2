//! User Entity
//!
//! One table holds both roles: admins log in by username, students by NIS.

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use platform::password::HashedPassword;

use crate::domain::value_object::user_role::UserRole;

/// Persisted user
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    /// Login name (admins)
    pub username: Option<String>,
    /// Nomor Induk Siswa, login key for students
    pub nis: Option<String>,
    pub virtual_account: Option<String>,
    pub name: String,
    pub password_hash: HashedPassword,
    pub role: UserRole,
    /// Raised on creation and on admin reset, cleared by the owner's own change
    pub must_change_password: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    #[inline]
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    #[inline]
    pub fn is_student(&self) -> bool {
        self.role.is_student()
    }
}

/// User about to be inserted; the store assigns id and timestamps
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: Option<String>,
    pub nis: Option<String>,
    pub virtual_account: Option<String>,
    pub name: String,
    pub password_hash: HashedPassword,
    pub role: UserRole,
    pub must_change_password: bool,
}

impl NewUser {
    pub fn admin(username: String, name: String, password_hash: HashedPassword) -> Self {
        Self {
            username: Some(username),
            nis: None,
            virtual_account: None,
            name,
            password_hash,
            role: UserRole::Admin,
            must_change_password: false,
        }
    }

    /// Students must pick their own password on first login
    pub fn student(
        nis: String,
        virtual_account: String,
        name: String,
        password_hash: HashedPassword,
    ) -> Self {
        Self {
            username: None,
            nis: Some(nis),
            virtual_account: Some(virtual_account),
            name,
            password_hash,
            role: UserRole::Student,
            must_change_password: true,
        }
    }
}
