//! Mapping of validation failures onto HTTP responses

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::error::ValidationError;

impl IntoResponse for ValidationError {
    fn into_response(self) -> Response {
        tracing::debug!("Rejecting request with {} violation(s)", self.len());

        let body = Json(json!({
            "error": "Validation failed",
            "detail": self,
        }));

        (StatusCode::UNPROCESSABLE_ENTITY, body).into_response()
    }
}
