//! Payment Router

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{delete, get, put},
};
use std::sync::Arc;

use auth::TokenService;
use auth::domain::UserRepository;
use auth::middleware::{require_admin, require_auth};

use crate::application::PaymentConfig;
use crate::domain::repository::PaymentRepository;
use crate::presentation::handlers::{self, PaymentAppState};

/// Own-history and admin payment routes, with absolute paths
pub fn payment_router<P, U>(
    payments: Arc<P>,
    users: Arc<U>,
    tokens: Arc<TokenService>,
    config: Arc<PaymentConfig>,
) -> Router
where
    P: PaymentRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    let state = PaymentAppState {
        payments,
        users,
        config,
    };

    let authenticated = Router::new()
        .route(
            "/api/payments/my-history",
            get(handlers::my_history::<P, U>),
        )
        .route_layer(from_fn_with_state(tokens.clone(), require_auth));

    let admin = Router::new()
        .route(
            "/api/admin/payments",
            get(handlers::list_payments::<P, U>).post(handlers::create_payment::<P, U>),
        )
        .route(
            "/api/admin/payments/by-user",
            get(handlers::payments_by_user::<P, U>),
        )
        .route(
            "/api/admin/payments/by-nis",
            get(handlers::payments_by_nis::<P, U>),
        )
        .route(
            "/api/admin/payments/delete",
            delete(handlers::delete_payment::<P, U>),
        )
        .route(
            "/api/admin/payments/edit",
            put(handlers::update_payment::<P, U>),
        )
        .route_layer(from_fn_with_state(tokens, require_admin));

    authenticated.merge(admin).with_state(state)
}
