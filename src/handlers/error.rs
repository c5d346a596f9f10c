use axum::{http::StatusCode, Json};
use tracing::error;

use crate::error::RanchError;
use crate::models::error::ErrorResponse;

pub type ApiError = (StatusCode, Json<ErrorResponse>);

/// Map RanchError to HTTP response
pub fn map_ranch_error(err: RanchError) -> ApiError {
    match err {
        RanchError::Validation(fields) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Invalid request data".to_string(),
                code: Some("VALIDATION_ERROR".to_string()),
                fields: Some(fields),
            }),
        ),
        RanchError::NotFound(what) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: format!("Not found: {}", what),
                code: Some("NOT_FOUND".to_string()),
                fields: None,
            }),
        ),
        RanchError::Conflict(msg) => (
            StatusCode::CONFLICT,
            Json(ErrorResponse {
                error: msg,
                code: Some("CONFLICT".to_string()),
                fields: None,
            }),
        ),
        RanchError::Storage(msg) => {
            error!(error = %msg, "Storage failure");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Storage failure, please try again later".to_string(),
                    code: Some("STORAGE_ERROR".to_string()),
                    fields: None,
                }),
            )
        }
    }
}
