//! API error types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Core error: {0}")]
    Core(#[from] roster_core::CoreError),

    #[error("Store error: {0}")]
    Store(#[from] roster_db::StoreError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            ApiError::Core(e) => match e {
                roster_core::CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                roster_core::CoreError::Store(inner) => store_error_parts(inner),
            },
            ApiError::Store(e) => store_error_parts(e),
        };

        let body = axum::Json(json!({
            "errors": [{
                "code": code,
                "message": message
            }]
        }));

        (status, body).into_response()
    }
}

fn store_error_parts(e: &roster_db::StoreError) -> (StatusCode, &'static str, String) {
    match e {
        roster_db::StoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
        _ => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "STORE_ERROR",
            e.to_string(),
        ),
    }
}
