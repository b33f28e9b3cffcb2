//! Domain Services
//!
//! Pure payment rules: field validation and summary arithmetic.

use chrono::NaiveDate;

use crate::domain::entities::{Payment, PaymentSummary};
use crate::error::{PaymentError, PaymentResult};

/// Wire format of `tanggal`
pub const TANGGAL_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` date; blank input is reported as missing
pub fn parse_tanggal(raw: &str) -> PaymentResult<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(PaymentError::Validation("Tanggal is required"));
    }
    NaiveDate::parse_from_str(raw, TANGGAL_FORMAT)
        .map_err(|_| PaymentError::Validation("Invalid tanggal format"))
}

/// Amounts must be strictly positive
pub fn validate_nominal(nominal: i64) -> PaymentResult<i64> {
    if nominal <= 0 {
        return Err(PaymentError::Validation("Nominal must be greater than 0"));
    }
    Ok(nominal)
}

/// Blank notes are stored as absent
pub fn normalize_keterangan(raw: Option<String>) -> Option<String> {
    raw.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

/// Totals over `payments` against the configured bill.
/// Sums that do not fit in `i64` yield `PaymentError::SummaryOverflow`.
pub fn summarize(total_tagihan: i64, payments: &[Payment]) -> PaymentResult<PaymentSummary> {
    let total_pembayaran = payments
        .iter()
        .try_fold(0i64, |acc, p| acc.checked_add(p.nominal))
        .ok_or(PaymentError::SummaryOverflow)?;
    let sisa_tagihan = total_tagihan
        .checked_sub(total_pembayaran)
        .ok_or(PaymentError::SummaryOverflow)?;

    Ok(PaymentSummary {
        total_tagihan,
        total_pembayaran,
        sisa_tagihan,
        jumlah_transaksi: payments.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use kernel::id::{PaymentId, UserId};

    fn payment(nominal: i64) -> Payment {
        Payment {
            id: PaymentId::new(1),
            user_id: UserId::new(1),
            tanggal: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            nominal,
            keterangan: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_summarize_overpaid_goes_negative() {
        let summary = summarize(100, &[payment(70), payment(50)]).unwrap();
        assert_eq!(summary.total_pembayaran, 120);
        assert_eq!(summary.sisa_tagihan, -20);
        assert_eq!(summary.jumlah_transaksi, 2);
    }

    #[test]
    fn test_summarize_overflow_is_error() {
        let big = i64::MAX / 2 + 1;
        assert!(matches!(
            summarize(0, &[payment(big), payment(big)]),
            Err(PaymentError::SummaryOverflow)
        ));
        assert!(matches!(
            summarize(i64::MIN, &[payment(1)]),
            Err(PaymentError::SummaryOverflow)
        ));
    }

    #[test]
    fn test_parse_tanggal() {
        assert_eq!(parse_tanggal(" 2024-02-29 ").unwrap().to_string(), "2024-02-29");
        assert!(matches!(parse_tanggal(""), Err(PaymentError::Validation("Tanggal is required"))));
        assert!(matches!(
            parse_tanggal("2023-02-29"),
            Err(PaymentError::Validation("Invalid tanggal format"))
        ));
    }
}
