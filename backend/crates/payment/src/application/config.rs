//! Application Configuration
//!
//! Configuration for the payment application layer.

/// Payment application configuration
#[derive(Debug, Clone, Default)]
pub struct PaymentConfig {
    /// Dues each student is billed, in Rupiah
    pub total_tagihan: i64,
}

impl PaymentConfig {
    pub fn new(total_tagihan: i64) -> Self {
        Self { total_tagihan }
    }
}
