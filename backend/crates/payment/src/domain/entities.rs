//! Domain Entities
//!
//! Core business entities for the payment domain.

use auth::models::UserRole;
use chrono::{DateTime, NaiveDate, Utc};
use kernel::id::{PaymentId, UserId};

/// One recorded dues payment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payment {
    pub id: PaymentId,
    pub user_id: UserId,
    /// Date the money was paid
    pub tanggal: NaiveDate,
    /// Amount in Rupiah, always positive
    pub nominal: i64,
    pub keterangan: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payment about to be inserted; the store assigns id and timestamps
#[derive(Debug, Clone)]
pub struct NewPayment {
    pub user_id: UserId,
    pub tanggal: NaiveDate,
    pub nominal: i64,
    pub keterangan: Option<String>,
}

/// Partial update; `None` leaves a field as it is
#[derive(Debug, Clone, Default)]
pub struct PaymentChanges {
    pub tanggal: Option<NaiveDate>,
    pub nominal: Option<i64>,
    /// `Some(None)` clears the note
    pub keterangan: Option<Option<String>>,
}

impl PaymentChanges {
    pub fn is_empty(&self) -> bool {
        self.tanggal.is_none() && self.nominal.is_none() && self.keterangan.is_none()
    }

    /// Apply to `payment` in place (memory store and tests)
    pub fn apply(&self, payment: &mut Payment) {
        if let Some(tanggal) = self.tanggal {
            payment.tanggal = tanggal;
        }
        if let Some(nominal) = self.nominal {
            payment.nominal = nominal;
        }
        if let Some(keterangan) = &self.keterangan {
            payment.keterangan = keterangan.clone();
        }
    }
}

/// Who paid: the user columns joined onto admin listings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payer {
    pub id: UserId,
    pub username: Option<String>,
    pub nis: Option<String>,
    pub name: String,
    pub role: UserRole,
}

/// Payment together with its payer
#[derive(Debug, Clone)]
pub struct PaymentRecord {
    pub payment: Payment,
    pub payer: Option<Payer>,
}

/// Totals shown above a payment history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PaymentSummary {
    /// Configured dues total per student
    pub total_tagihan: i64,
    /// Sum of all payments
    pub total_pembayaran: i64,
    /// `total_tagihan - total_pembayaran` (negative when overpaid)
    pub sisa_tagihan: i64,
    pub jumlah_transaksi: usize,
}
