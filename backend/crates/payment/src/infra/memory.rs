//! In-memory Repository
//!
//! Shares the user table of a [`MemoryUserRepository`] so that payments of a
//! deleted user disappear the same way `ON DELETE CASCADE` removes them.

use std::collections::BTreeMap;
use std::sync::Arc;

use auth::MemoryUserRepository;
use auth::domain::UserRepository;
use chrono::Utc;
use kernel::id::{PaymentId, UserId};
use tokio::sync::RwLock;

use crate::domain::entities::{NewPayment, Payer, Payment, PaymentChanges, PaymentRecord};
use crate::domain::repository::PaymentRepository;
use crate::error::{PaymentError, PaymentResult};

#[derive(Default)]
struct Payments {
    next_id: i64,
    rows: BTreeMap<PaymentId, Payment>,
}

/// Cloneable handle; clones share the same table
#[derive(Clone)]
pub struct MemoryPaymentRepository {
    inner: Arc<RwLock<Payments>>,
    users: MemoryUserRepository,
}

impl MemoryPaymentRepository {
    pub fn new(users: MemoryUserRepository) -> Self {
        Self {
            inner: Arc::default(),
            users,
        }
    }

    /// Drop rows whose user is gone
    async fn live(&self, candidates: Vec<Payment>) -> Vec<Payment> {
        let mut kept = Vec::with_capacity(candidates.len());
        for payment in candidates {
            if self.users.contains(payment.user_id).await {
                kept.push(payment);
            }
        }
        kept
    }

    async fn matching(&self, user_id: Option<UserId>) -> Vec<Payment> {
        let rows: Vec<Payment> = {
            let payments = self.inner.read().await;
            payments
                .rows
                .values()
                .filter(|p| user_id.is_none_or(|id| p.user_id == id))
                .cloned()
                .collect()
        };

        let mut rows = self.live(rows).await;
        rows.sort_by(|a, b| {
            b.tanggal
                .cmp(&a.tanggal)
                .then(b.created_at.cmp(&a.created_at))
                .then(b.id.cmp(&a.id))
        });
        rows
    }

    async fn find_live(&self, id: PaymentId) -> Option<Payment> {
        let found = self.inner.read().await.rows.get(&id).cloned()?;
        self.users.contains(found.user_id).await.then_some(found)
    }
}

impl PaymentRepository for MemoryPaymentRepository {
    async fn create(&self, payment: &NewPayment) -> PaymentResult<Payment> {
        if !self.users.contains(payment.user_id).await {
            return Err(PaymentError::UserNotFound);
        }

        let mut payments = self.inner.write().await;
        payments.next_id += 1;
        let now = Utc::now();
        let stored = Payment {
            id: PaymentId::new(payments.next_id),
            user_id: payment.user_id,
            tanggal: payment.tanggal,
            nominal: payment.nominal,
            keterangan: payment.keterangan.clone(),
            created_at: now,
            updated_at: now,
        };
        payments.rows.insert(stored.id, stored.clone());

        Ok(stored)
    }

    async fn find_by_id(&self, id: PaymentId) -> PaymentResult<Option<Payment>> {
        Ok(self.find_live(id).await)
    }

    async fn list_by_user(&self, user_id: UserId) -> PaymentResult<Vec<Payment>> {
        Ok(self.matching(Some(user_id)).await)
    }

    async fn list_with_payer(&self, user_id: Option<UserId>) -> PaymentResult<Vec<PaymentRecord>> {
        let mut records = Vec::new();
        for payment in self.matching(user_id).await {
            let payer = self
                .users
                .find_by_id(payment.user_id)
                .await
                .map_err(|e| PaymentError::Internal(e.to_string()))?
                .map(|u| Payer {
                    id: u.id,
                    username: u.username,
                    nis: u.nis,
                    name: u.name,
                    role: u.role,
                });
            records.push(PaymentRecord { payment, payer });
        }
        Ok(records)
    }

    async fn update(&self, id: PaymentId, changes: &PaymentChanges) -> PaymentResult<Option<Payment>> {
        if self.find_live(id).await.is_none() {
            return Ok(None);
        }

        let mut payments = self.inner.write().await;
        let Some(payment) = payments.rows.get_mut(&id) else {
            return Ok(None);
        };
        changes.apply(payment);
        payment.updated_at = Utc::now();
        Ok(Some(payment.clone()))
    }

    async fn delete(&self, id: PaymentId) -> PaymentResult<bool> {
        if self.find_live(id).await.is_none() {
            return Ok(false);
        }
        Ok(self.inner.write().await.rows.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use auth::models::NewUser;
    use chrono::NaiveDate;
    use platform::password::ClearTextPassword;

    async fn student(users: &MemoryUserRepository, nis: &str) -> UserId {
        let hash = ClearTextPassword::new("secret1".to_string())
            .unwrap()
            .hash()
            .unwrap();
        users
            .create(&NewUser::student(nis.into(), format!("VA-{nis}"), "Budi".into(), hash))
            .await
            .unwrap()
            .id
    }

    fn new_payment(user_id: UserId, day: u32, nominal: i64) -> NewPayment {
        NewPayment {
            user_id,
            tanggal: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            nominal,
            keterangan: None,
        }
    }

    #[tokio::test]
    async fn test_unknown_user_rejected() {
        let repo = MemoryPaymentRepository::new(MemoryUserRepository::new());
        let result = repo.create(&new_payment(UserId::new(7), 1, 1000)).await;
        assert!(matches!(result, Err(PaymentError::UserNotFound)));
    }

    #[tokio::test]
    async fn test_newest_tanggal_first() {
        let users = MemoryUserRepository::new();
        let repo = MemoryPaymentRepository::new(users.clone());
        let id = student(&users, "100").await;

        for day in [3, 10, 1] {
            repo.create(&new_payment(id, day, 1000)).await.unwrap();
        }

        let days: Vec<String> = repo
            .list_by_user(id)
            .await
            .unwrap()
            .iter()
            .map(|p| p.tanggal.to_string())
            .collect();
        assert_eq!(days, ["2024-01-10", "2024-01-03", "2024-01-01"]);
    }

    #[tokio::test]
    async fn test_deleted_user_payments_vanish() {
        let users = MemoryUserRepository::new();
        let repo = MemoryPaymentRepository::new(users.clone());
        let id = student(&users, "100").await;
        let payment = repo.create(&new_payment(id, 1, 1000)).await.unwrap();

        users.delete(id).await.unwrap();

        assert!(repo.list_by_user(id).await.unwrap().is_empty());
        assert!(repo.list_with_payer(None).await.unwrap().is_empty());
        assert!(repo.find_by_id(payment.id).await.unwrap().is_none());
        assert!(!repo.delete(payment.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_payer_attached() {
        let users = MemoryUserRepository::new();
        let repo = MemoryPaymentRepository::new(users.clone());
        let id = student(&users, "100").await;
        repo.create(&new_payment(id, 1, 1000)).await.unwrap();

        let records = repo.list_with_payer(Some(id)).await.unwrap();
        assert_eq!(records.len(), 1);
        let payer = records[0].payer.as_ref().unwrap();
        assert_eq!(payer.nis.as_deref(), Some("100"));
        assert_eq!(payer.role, auth::models::UserRole::Student);
    }
}
