//! Auth Router

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{delete, get, post},
};
use std::sync::Arc;

use crate::application::token::TokenService;
use crate::domain::repository::UserRepository;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::{require_admin, require_auth};

/// Login, change-password and student management routes
///
/// Paths are absolute (`/api/auth/...`, `/api/admin/students...`) so the
/// result can be merged straight into the application router.
pub fn auth_router<R>(repo: Arc<R>, tokens: Arc<TokenService>) -> Router
where
    R: UserRepository + Send + Sync + 'static,
{
    let state = AuthAppState {
        repo,
        tokens: tokens.clone(),
    };

    let public = Router::new()
        .route("/api/auth/admin/login", post(handlers::admin_login::<R>))
        .route("/api/auth/student/login", post(handlers::student_login::<R>));

    let authenticated = Router::new()
        .route(
            "/api/auth/change-password",
            post(handlers::change_password::<R>),
        )
        .route_layer(from_fn_with_state(tokens.clone(), require_auth));

    let admin = Router::new()
        .route(
            "/api/admin/students",
            get(handlers::list_students::<R>).post(handlers::create_student::<R>),
        )
        .route(
            "/api/admin/students/reset-password",
            post(handlers::reset_student_password::<R>),
        )
        .route(
            "/api/admin/students/delete",
            delete(handlers::delete_student::<R>),
        )
        .route_layer(from_fn_with_state(tokens, require_admin));

    public.merge(authenticated).merge(admin).with_state(state)
}
