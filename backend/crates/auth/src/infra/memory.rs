//! In-memory Repository
//!
//! Same contract as [`super::postgres::PgUserRepository`], including the
//! uniqueness constraints. Used by tests and local runs without a database.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use kernel::id::UserId;
use platform::password::HashedPassword;
use tokio::sync::RwLock;

use crate::domain::entity::user::{NewUser, User};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::user_role::UserRole;
use crate::error::{AuthError, AuthResult};

#[derive(Default)]
struct Users {
    next_id: i64,
    rows: BTreeMap<UserId, User>,
}

impl Users {
    fn conflicts_with(&self, candidate: &NewUser) -> bool {
        fn same(a: &Option<String>, b: &Option<String>) -> bool {
            matches!((a, b), (Some(a), Some(b)) if a == b)
        }

        self.rows.values().any(|u| {
            same(&u.username, &candidate.username)
                || same(&u.nis, &candidate.nis)
                || same(&u.virtual_account, &candidate.virtual_account)
        })
    }
}

/// Cloneable handle; clones share the same table
#[derive(Clone, Default)]
pub struct MemoryUserRepository {
    inner: Arc<RwLock<Users>>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `id` is currently stored
    pub async fn contains(&self, id: UserId) -> bool {
        self.inner.read().await.rows.contains_key(&id)
    }
}

impl UserRepository for MemoryUserRepository {
    async fn create(&self, user: &NewUser) -> AuthResult<User> {
        let mut users = self.inner.write().await;
        if users.conflicts_with(user) {
            return Err(AuthError::AlreadyExists);
        }

        users.next_id += 1;
        let now = Utc::now();
        let stored = User {
            id: UserId::new(users.next_id),
            username: user.username.clone(),
            nis: user.nis.clone(),
            virtual_account: user.virtual_account.clone(),
            name: user.name.clone(),
            password_hash: user.password_hash.clone(),
            role: user.role,
            must_change_password: user.must_change_password,
            created_at: now,
            updated_at: now,
        };
        users.rows.insert(stored.id, stored.clone());

        Ok(stored)
    }

    async fn find_by_id(&self, id: UserId) -> AuthResult<Option<User>> {
        Ok(self.inner.read().await.rows.get(&id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> AuthResult<Option<User>> {
        let users = self.inner.read().await;
        Ok(users
            .rows
            .values()
            .find(|u| u.username.as_deref() == Some(username))
            .cloned())
    }

    async fn find_by_nis(&self, nis: &str) -> AuthResult<Option<User>> {
        let users = self.inner.read().await;
        Ok(users
            .rows
            .values()
            .find(|u| u.nis.as_deref() == Some(nis))
            .cloned())
    }

    async fn list_by_role(&self, role: UserRole) -> AuthResult<Vec<User>> {
        let users = self.inner.read().await;
        let mut list: Vec<User> = users
            .rows
            .values()
            .filter(|u| u.role == role)
            .cloned()
            .collect();
        list.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(list)
    }

    async fn exists_with_role(&self, role: UserRole) -> AuthResult<bool> {
        Ok(self.inner.read().await.rows.values().any(|u| u.role == role))
    }

    async fn update_password(
        &self,
        id: UserId,
        password_hash: &HashedPassword,
        must_change_password: bool,
    ) -> AuthResult<bool> {
        let mut users = self.inner.write().await;
        let Some(user) = users.rows.get_mut(&id) else {
            return Ok(false);
        };
        user.password_hash = password_hash.clone();
        user.must_change_password = must_change_password;
        user.updated_at = Utc::now();
        Ok(true)
    }

    async fn delete(&self, id: UserId) -> AuthResult<bool> {
        Ok(self.inner.write().await.rows.remove(&id).is_some())
    }
}
