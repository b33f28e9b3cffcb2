//! HTTP Handlers

use std::sync::Arc;

use auth::AuthIdentity;
use auth::domain::UserRepository;
use auth::models::MessageResponse;
use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use kernel::id::{Id, PaymentId, UserId};
use kernel::json::AppJson;

use crate::application::{
    CreatePaymentInput, CreatePaymentUseCase, DeletePaymentUseCase, ListPaymentsUseCase,
    PaymentConfig, PaymentHistoryUseCase, UpdatePaymentInput, UpdatePaymentUseCase,
};
use crate::domain::repository::PaymentRepository;
use crate::error::{PaymentError, PaymentResult};
use crate::presentation::dto::{
    CreatePaymentRequest, NisQuery, PaymentHistoryResponse, PaymentIdQuery, PaymentResponse,
    UpdatePaymentRequest,
};

/// Shared state for payment handlers
pub struct PaymentAppState<P, U>
where
    P: PaymentRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    pub payments: Arc<P>,
    pub users: Arc<U>,
    pub config: Arc<PaymentConfig>,
}

impl<P, U> Clone for PaymentAppState<P, U>
where
    P: PaymentRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            payments: self.payments.clone(),
            users: self.users.clone(),
            config: self.config.clone(),
        }
    }
}

impl<P, U> PaymentAppState<P, U>
where
    P: PaymentRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    fn history(&self) -> PaymentHistoryUseCase<P, U> {
        PaymentHistoryUseCase::new(self.payments.clone(), self.users.clone(), self.config.clone())
    }
}

// ============================================================================
// Own history (requires authentication)
// ============================================================================

/// GET /api/payments/my-history
pub async fn my_history<P, U>(
    State(state): State<PaymentAppState<P, U>>,
    identity: AuthIdentity,
) -> PaymentResult<Json<PaymentHistoryResponse>>
where
    P: PaymentRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    let history = state.history().for_user(identity.user_id).await?;
    Ok(Json(history.into()))
}

// ============================================================================
// Admin
// ============================================================================

/// GET /api/admin/payments
pub async fn list_payments<P, U>(
    State(state): State<PaymentAppState<P, U>>,
) -> PaymentResult<Json<Vec<PaymentResponse>>>
where
    P: PaymentRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    let use_case = ListPaymentsUseCase::new(state.payments.clone());
    let records = use_case.all().await?;

    Ok(Json(records.into_iter().map(PaymentResponse::from).collect()))
}

/// POST /api/admin/payments
pub async fn create_payment<P, U>(
    State(state): State<PaymentAppState<P, U>>,
    AppJson(req): AppJson<CreatePaymentRequest>,
) -> PaymentResult<(StatusCode, Json<PaymentResponse>)>
where
    P: PaymentRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    let use_case = CreatePaymentUseCase::new(state.payments.clone(), state.users.clone());

    let payment = use_case
        .execute(CreatePaymentInput {
            user_id: req.user_id,
            tanggal: req.tanggal,
            nominal: req.nominal,
            keterangan: req.keterangan,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(payment.into())))
}

/// GET /api/admin/payments/by-user?user_id=
pub async fn payments_by_user<P, U>(
    State(state): State<PaymentAppState<P, U>>,
    Query(query): Query<auth::models::UserIdQuery>,
) -> PaymentResult<Json<Vec<PaymentResponse>>>
where
    P: PaymentRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    let user_id: UserId = parse_id(
        query.user_id.as_deref(),
        "user_id is required",
        "Invalid user_id",
    )?;

    let use_case = ListPaymentsUseCase::new(state.payments.clone());
    let records = use_case.by_user(user_id).await?;

    Ok(Json(records.into_iter().map(PaymentResponse::from).collect()))
}

/// GET /api/admin/payments/by-nis?nis=
pub async fn payments_by_nis<P, U>(
    State(state): State<PaymentAppState<P, U>>,
    Query(query): Query<NisQuery>,
) -> PaymentResult<Json<PaymentHistoryResponse>>
where
    P: PaymentRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    let nis = query.nis.unwrap_or_default();
    let history = state.history().for_nis(&nis).await?;
    Ok(Json(history.into()))
}

/// DELETE /api/admin/payments/delete?payment_id=
pub async fn delete_payment<P, U>(
    State(state): State<PaymentAppState<P, U>>,
    Query(query): Query<PaymentIdQuery>,
) -> PaymentResult<Json<MessageResponse>>
where
    P: PaymentRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    let payment_id: PaymentId = parse_id(
        query.payment_id.as_deref(),
        "payment_id is required",
        "Invalid payment_id",
    )?;

    let use_case = DeletePaymentUseCase::new(state.payments.clone());
    use_case.execute(payment_id).await?;

    Ok(Json(MessageResponse::new("Payment deleted successfully")))
}

/// PUT /api/admin/payments/edit
pub async fn update_payment<P, U>(
    State(state): State<PaymentAppState<P, U>>,
    AppJson(req): AppJson<UpdatePaymentRequest>,
) -> PaymentResult<Json<PaymentResponse>>
where
    P: PaymentRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    let use_case = UpdatePaymentUseCase::new(state.payments.clone());

    let payment = use_case
        .execute(UpdatePaymentInput {
            payment_id: req.payment_id,
            tanggal: req.tanggal,
            nominal: req.nominal,
            keterangan: req.keterangan,
        })
        .await?;

    Ok(Json(payment.into()))
}

/// Parse an id query value, reporting `missing` or `invalid`
fn parse_id<T>(
    raw: Option<&str>,
    missing: &'static str,
    invalid: &'static str,
) -> PaymentResult<Id<T>> {
    let raw = raw
        .filter(|v| !v.is_empty())
        .ok_or(PaymentError::Validation(missing))?;

    raw.parse().map_err(|_| PaymentError::Validation(invalid))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: Option<&str>) -> PaymentResult<PaymentId> {
        parse_id(raw, "payment_id is required", "Invalid payment_id")
    }

    #[test]
    fn test_parse_id() {
        assert!(matches!(
            parse(None),
            Err(PaymentError::Validation("payment_id is required"))
        ));
        assert!(matches!(
            parse(Some("")),
            Err(PaymentError::Validation("payment_id is required"))
        ));
        assert!(matches!(
            parse(Some("x1")),
            Err(PaymentError::Validation("Invalid payment_id"))
        ));
        assert_eq!(parse(Some("12")).unwrap(), PaymentId::new(12));
    }
}
