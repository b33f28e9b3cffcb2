//! PostgreSQL Repository Implementations

use auth::models::UserRole;
use chrono::{DateTime, NaiveDate, Utc};
use kernel::id::{PaymentId, UserId};
use sqlx::PgPool;

use crate::domain::entities::{NewPayment, Payer, Payment, PaymentChanges, PaymentRecord};
use crate::domain::repository::PaymentRepository;
use crate::error::{PaymentError, PaymentResult};

const PAYMENT_COLUMNS: &str = r#"
    id,
    user_id,
    tanggal,
    nominal,
    keterangan,
    created_at,
    updated_at
"#;

const NEWEST_FIRST: &str = "ORDER BY tanggal DESC, created_at DESC, id DESC";

/// PostgreSQL-backed payment repository
#[derive(Clone)]
pub struct PgPaymentRepository {
    pool: PgPool,
}

impl PgPaymentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

// ============================================================================
// Payment Repository Implementation
// ============================================================================

impl PaymentRepository for PgPaymentRepository {
    async fn create(&self, payment: &NewPayment) -> PaymentResult<Payment> {
        let sql = format!(
            r#"
            INSERT INTO payments (user_id, tanggal, nominal, keterangan)
            VALUES ($1, $2, $3, $4)
            RETURNING {PAYMENT_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, PaymentRow>(&sql)
            .bind(payment.user_id.value())
            .bind(payment.tanggal)
            .bind(payment.nominal)
            .bind(payment.keterangan.as_deref())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| match e {
                // user removed between the existence check and the insert
                sqlx::Error::Database(db) if db.code().as_deref() == Some("23503") => {
                    PaymentError::UserNotFound
                }
                other => PaymentError::Database(other),
            })?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: PaymentId) -> PaymentResult<Option<Payment>> {
        let sql = format!("SELECT {PAYMENT_COLUMNS} FROM payments WHERE id = $1");
        let row = sqlx::query_as::<_, PaymentRow>(&sql)
            .bind(id.value())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Into::into))
    }

    async fn list_by_user(&self, user_id: UserId) -> PaymentResult<Vec<Payment>> {
        let sql = format!("SELECT {PAYMENT_COLUMNS} FROM payments WHERE user_id = $1 {NEWEST_FIRST}");
        let rows = sqlx::query_as::<_, PaymentRow>(&sql)
            .bind(user_id.value())
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn list_with_payer(&self, user_id: Option<UserId>) -> PaymentResult<Vec<PaymentRecord>> {
        let rows = sqlx::query_as::<_, PaymentWithPayerRow>(
            r#"
            SELECT
                p.id,
                p.user_id,
                p.tanggal,
                p.nominal,
                p.keterangan,
                p.created_at,
                p.updated_at,
                u.username AS payer_username,
                u.nis AS payer_nis,
                u.name AS payer_name,
                u.user_role AS payer_role
            FROM payments p
            LEFT JOIN users u ON u.id = p.user_id
            WHERE $1::BIGINT IS NULL OR p.user_id = $1
            ORDER BY p.tanggal DESC, p.created_at DESC, p.id DESC
            "#,
        )
        .bind(user_id.map(|id| id.value()))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(|r| r.into_record()).collect()
    }

    async fn update(&self, id: PaymentId, changes: &PaymentChanges) -> PaymentResult<Option<Payment>> {
        let sql = format!(
            r#"
            UPDATE payments SET
                tanggal = COALESCE($2, tanggal),
                nominal = COALESCE($3, nominal),
                keterangan = CASE WHEN $4 THEN $5 ELSE keterangan END,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {PAYMENT_COLUMNS}
            "#
        );

        let keterangan = changes.keterangan.as_ref();
        let row = sqlx::query_as::<_, PaymentRow>(&sql)
            .bind(id.value())
            .bind(changes.tanggal)
            .bind(changes.nominal)
            .bind(keterangan.is_some())
            .bind(keterangan.and_then(|k| k.as_deref()))
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Into::into))
    }

    async fn delete(&self, id: PaymentId) -> PaymentResult<bool> {
        let affected = sqlx::query("DELETE FROM payments WHERE id = $1")
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
struct PaymentRow {
    id: i64,
    user_id: i64,
    tanggal: NaiveDate,
    nominal: i64,
    keterangan: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<PaymentRow> for Payment {
    fn from(row: PaymentRow) -> Self {
        Payment {
            id: PaymentId::new(row.id),
            user_id: UserId::new(row.user_id),
            tanggal: row.tanggal,
            nominal: row.nominal,
            keterangan: row.keterangan,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct PaymentWithPayerRow {
    #[sqlx(flatten)]
    payment: PaymentRow,
    payer_username: Option<String>,
    payer_nis: Option<String>,
    payer_name: Option<String>,
    payer_role: Option<i16>,
}

impl PaymentWithPayerRow {
    fn into_record(self) -> PaymentResult<PaymentRecord> {
        let payer = match (self.payer_name, self.payer_role) {
            (Some(name), Some(role_id)) => {
                let role = UserRole::from_id(role_id)
                    .ok_or_else(|| PaymentError::Internal(format!("Invalid user_role: {role_id}")))?;
                Some(Payer {
                    id: UserId::new(self.payment.user_id),
                    username: self.payer_username,
                    nis: self.payer_nis,
                    name,
                    role,
                })
            }
            _ => None,
        };

        Ok(PaymentRecord {
            payment: self.payment.into(),
            payer,
        })
    }
}
