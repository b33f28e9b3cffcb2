//! Router composition
//!
//! Merges the feature routers, adds the service endpoints and wraps
//! everything in CORS and request tracing.

use std::sync::Arc;

use auth::TokenService;
use auth::domain::UserRepository;
use axum::{Json, Router, middleware::from_fn_with_state, routing::get};
use kernel::error::app_error::AppError;
use payment::PaymentConfig;
use payment::domain::repository::PaymentRepository;
use platform::cors::{CorsPolicy, cors_middleware};
use serde_json::{Value, json};
use tower_http::trace::TraceLayer;

/// Everything the handlers need, built once in `main`
pub struct AppServices<U, P> {
    pub users: Arc<U>,
    pub payments: Arc<P>,
    pub tokens: Arc<TokenService>,
    pub payment_config: Arc<PaymentConfig>,
    pub cors: Arc<CorsPolicy>,
}

pub fn build_router<U, P>(services: AppServices<U, P>) -> Router
where
    U: UserRepository + Send + Sync + 'static,
    P: PaymentRepository + Send + Sync + 'static,
{
    let AppServices {
        users,
        payments,
        tokens,
        payment_config,
        cors,
    } = services;

    Router::new()
        .route("/", get(home))
        .route("/health", get(health))
        .merge(auth::auth_router(users.clone(), tokens.clone()))
        .merge(payment::payment_router(payments, users, tokens, payment_config))
        .fallback(not_found)
        // must follow the merges to cover their routes
        .method_not_allowed_fallback(method_not_allowed)
        .layer(from_fn_with_state(cors, cors_middleware))
        .layer(TraceLayer::new_for_http())
}

async fn home() -> Json<Value> {
    Json(json!({
        "message": "Komite Sekolah API",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "OK" }))
}

async fn not_found() -> AppError {
    AppError::not_found("Not found")
}

async fn method_not_allowed() -> AppError {
    AppError::method_not_allowed()
}
