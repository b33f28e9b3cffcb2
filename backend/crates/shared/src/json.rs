//! JSON request body extractor
//!
//! Like [`axum::Json`] but the body is decoded whatever `Content-Type` says,
//! and a rejected body becomes the project-wide
//! `400 {"error": "Invalid request body"}` instead of axum's plain-text error.

use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;

use crate::error::app_error::AppError;

/// JSON body that rejects with [`AppError`]
#[derive(Debug, Clone, Copy, Default)]
pub struct AppJson<T>(pub T);

impl<T, S> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|rejection| {
            tracing::debug!(reason = %rejection.body_text(), "Unreadable request body");
            invalid_body()
        })?;

        serde_json::from_slice(&bytes).map(Self).map_err(|e| {
            tracing::debug!(error = %e, "Rejected JSON body");
            invalid_body()
        })
    }
}

fn invalid_body() -> AppError {
    AppError::bad_request("Invalid request body")
}
