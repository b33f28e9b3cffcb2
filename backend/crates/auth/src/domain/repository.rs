//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use kernel::id::UserId;
use platform::password::HashedPassword;

use crate::domain::entity::user::{NewUser, User};
use crate::domain::value_object::user_role::UserRole;
use crate::error::AuthResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Insert a user. A taken username / NIS / virtual account
    /// yields `AuthError::AlreadyExists`.
    async fn create(&self, user: &NewUser) -> AuthResult<User>;

    /// Find user by ID
    async fn find_by_id(&self, id: UserId) -> AuthResult<Option<User>>;

    /// Find user by username (admins)
    async fn find_by_username(&self, username: &str) -> AuthResult<Option<User>>;

    /// Find user by NIS (students)
    async fn find_by_nis(&self, nis: &str) -> AuthResult<Option<User>>;

    /// All users with `role`, ordered by name
    async fn list_by_role(&self, role: UserRole) -> AuthResult<Vec<User>>;

    /// Check whether any user holds `role`
    async fn exists_with_role(&self, role: UserRole) -> AuthResult<bool>;

    /// Replace the password hash and set the must-change-password flag.
    /// Returns `false` when no such user exists.
    async fn update_password(
        &self,
        id: UserId,
        password_hash: &HashedPassword,
        must_change_password: bool,
    ) -> AuthResult<bool>;

    /// Delete a user together with everything referencing it.
    /// Returns `false` when no such user exists.
    async fn delete(&self, id: UserId) -> AuthResult<bool>;
}
