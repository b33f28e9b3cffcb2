//! HTTP rendering of [`AppError`]
//!
//! Every error leaves the process as `{"error": <translated message>}`.

use super::app_error::AppError;

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::StatusCode;

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if self.is_server_error() {
            tracing::error!(error = ?self, "Request failed");
        } else {
            tracing::debug!(status = self.status_code(), message = %self.message(), "Request rejected");
        }

        let body = serde_json::json!({
            "error": crate::i18n::translate(self.message()),
        });

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(feature = "axum")]
    #[tokio::test]
    async fn test_into_response_translates_message() {
        use axum::response::IntoResponse;

        let response = AppError::unauthorized("Invalid token").into_response();
        assert_eq!(response.status(), 401);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "Token tidak valid");
    }
}
