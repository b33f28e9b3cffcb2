//! API DTOs (Data Transfer Objects)

use auth::models::{UserResponse, UserRole};
use chrono::{DateTime, NaiveDate, Utc};
use kernel::id::{PaymentId, UserId};
use serde::{Deserialize, Serialize};

use crate::application::PaymentHistory;
use crate::domain::entities::{Payer, Payment, PaymentRecord, PaymentSummary};

// ============================================================================
// Requests
// ============================================================================

/// Create payment request; missing fields fall through to the use case checks
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CreatePaymentRequest {
    pub user_id: UserId,
    pub tanggal: String,
    pub nominal: i64,
    pub keterangan: Option<String>,
}

/// Edit payment request; absent fields stay unchanged
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UpdatePaymentRequest {
    pub payment_id: PaymentId,
    pub tanggal: Option<String>,
    pub nominal: Option<i64>,
    pub keterangan: Option<String>,
}

/// `?nis=` query
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NisQuery {
    pub nis: Option<String>,
}

/// `?payment_id=` query
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaymentIdQuery {
    pub payment_id: Option<String>,
}

// ============================================================================
// Responses
// ============================================================================

/// Payer summary on admin listings
#[derive(Debug, Clone, Serialize)]
pub struct PayerResponse {
    pub id: UserId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nis: Option<String>,
    pub name: String,
    pub role: UserRole,
}

impl From<Payer> for PayerResponse {
    fn from(payer: Payer) -> Self {
        Self {
            id: payer.id,
            username: payer.username,
            nis: payer.nis,
            name: payer.name,
            role: payer.role,
        }
    }
}

/// One payment
#[derive(Debug, Clone, Serialize)]
pub struct PaymentResponse {
    pub id: PaymentId,
    pub user_id: UserId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<PayerResponse>,
    /// `YYYY-MM-DD`
    pub tanggal: NaiveDate,
    pub nominal: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keterangan: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Payment> for PaymentResponse {
    fn from(payment: Payment) -> Self {
        Self {
            id: payment.id,
            user_id: payment.user_id,
            user: None,
            tanggal: payment.tanggal,
            nominal: payment.nominal,
            keterangan: payment.keterangan,
            created_at: payment.created_at,
            updated_at: payment.updated_at,
        }
    }
}

impl From<PaymentRecord> for PaymentResponse {
    fn from(record: PaymentRecord) -> Self {
        Self {
            user: record.payer.map(PayerResponse::from),
            ..Self::from(record.payment)
        }
    }
}

/// History totals
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SummaryResponse {
    pub total_tagihan: i64,
    pub total_pembayaran: i64,
    pub sisa_tagihan: i64,
    pub jumlah_transaksi: usize,
}

impl From<PaymentSummary> for SummaryResponse {
    fn from(s: PaymentSummary) -> Self {
        Self {
            total_tagihan: s.total_tagihan,
            total_pembayaran: s.total_pembayaran,
            sisa_tagihan: s.sisa_tagihan,
            jumlah_transaksi: s.jumlah_transaksi,
        }
    }
}

/// A user's payment history
#[derive(Debug, Clone, Serialize)]
pub struct PaymentHistoryResponse {
    /// Empty for users without one (admins)
    pub virtual_account: String,
    pub summary: SummaryResponse,
    pub payments: Vec<PaymentResponse>,
    pub user: UserResponse,
}

impl From<PaymentHistory> for PaymentHistoryResponse {
    fn from(history: PaymentHistory) -> Self {
        Self {
            virtual_account: history.user.virtual_account.clone().unwrap_or_default(),
            summary: history.summary.into(),
            payments: history.payments.into_iter().map(PaymentResponse::from).collect(),
            user: UserResponse::from(history.user),
        }
    }
}
