//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use platform::password::HashedPassword;
use sqlx::PgPool;

use crate::domain::entity::user::{NewUser, User};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::user_role::UserRole;
use crate::error::{AuthError, AuthResult};

const USER_COLUMNS: &str = r#"
    id,
    username,
    nis,
    virtual_account,
    name,
    password_hash,
    user_role,
    must_change_password,
    created_at,
    updated_at
"#;

/// PostgreSQL-backed user repository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn find_one(&self, column: &str, value: &str) -> AuthResult<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE {column} = $1");
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(value)
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| r.into_user()).transpose()
    }
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for PgUserRepository {
    async fn create(&self, user: &NewUser) -> AuthResult<User> {
        let sql = format!(
            r#"
            INSERT INTO users (
                username,
                nis,
                virtual_account,
                name,
                password_hash,
                user_role,
                must_change_password
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {USER_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(user.username.as_deref())
            .bind(user.nis.as_deref())
            .bind(user.virtual_account.as_deref())
            .bind(&user.name)
            .bind(user.password_hash.as_phc_string())
            .bind(user.role.id())
            .bind(user.must_change_password)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(db) if db.code().as_deref() == Some("23505") => {
                    AuthError::AlreadyExists
                }
                other => AuthError::Database(other),
            })?;

        row.into_user()
    }

    async fn find_by_id(&self, id: UserId) -> AuthResult<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(id.value())
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn find_by_username(&self, username: &str) -> AuthResult<Option<User>> {
        self.find_one("username", username).await
    }

    async fn find_by_nis(&self, nis: &str) -> AuthResult<Option<User>> {
        self.find_one("nis", nis).await
    }

    async fn list_by_role(&self, role: UserRole) -> AuthResult<Vec<User>> {
        let sql = format!(
            "SELECT {USER_COLUMNS} FROM users WHERE user_role = $1 ORDER BY name ASC, id ASC"
        );
        let rows = sqlx::query_as::<_, UserRow>(&sql)
            .bind(role.id())
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(|r| r.into_user()).collect()
    }

    async fn exists_with_role(&self, role: UserRole) -> AuthResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE user_role = $1)",
        )
        .bind(role.id())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn update_password(
        &self,
        id: UserId,
        password_hash: &HashedPassword,
        must_change_password: bool,
    ) -> AuthResult<bool> {
        let affected = sqlx::query(
            r#"
            UPDATE users SET
                password_hash = $2,
                must_change_password = $3,
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id.value())
        .bind(password_hash.as_phc_string())
        .bind(must_change_password)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(affected > 0)
    }

    async fn delete(&self, id: UserId) -> AuthResult<bool> {
        // payments rows follow through ON DELETE CASCADE
        let affected = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id.value())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(affected > 0)
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    username: Option<String>,
    nis: Option<String>,
    virtual_account: Option<String>,
    name: String,
    password_hash: String,
    user_role: i16,
    must_change_password: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> AuthResult<User> {
        let role = UserRole::from_id(self.user_role)
            .ok_or_else(|| AuthError::Internal(format!("Invalid user_role: {}", self.user_role)))?;

        let password_hash = HashedPassword::from_phc_string(self.password_hash)
            .map_err(|e| AuthError::Internal(format!("Invalid password_hash: {}", e)))?;

        Ok(User {
            id: UserId::new(self.id),
            username: self.username,
            nis: self.nis,
            virtual_account: self.virtual_account,
            name: self.name,
            password_hash,
            role,
            must_change_password: self.must_change_password,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
