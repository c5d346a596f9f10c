use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::handlers::error::{map_ranch_error, ApiError};
use crate::models::application::{
    ApplicationEvent, ApplicationListResponse, ApplicationRequest, BulkApplicationRequest,
    BulkApplicationResponse,
};
use crate::models::lot::DeleteResponse;
use crate::services::{applications, bulk_application};
use crate::AppState;

/// GET /api/livestock/{id}/applications
pub async fn list_applications(
    State(state): State<AppState>,
    Path(livestock_id): Path<i32>,
) -> Result<Json<ApplicationListResponse>, ApiError> {
    let applications = applications::list_applications(&state, livestock_id)
        .await
        .map_err(map_ranch_error)?;
    Ok(Json(ApplicationListResponse { applications }))
}

/// POST /api/livestock/{id}/applications
pub async fn log_application(
    State(state): State<AppState>,
    Path(livestock_id): Path<i32>,
    Json(payload): Json<ApplicationRequest>,
) -> Result<(StatusCode, Json<ApplicationEvent>), ApiError> {
    let event = applications::log_application(&state, livestock_id, payload)
        .await
        .map_err(map_ranch_error)?;
    Ok((StatusCode::CREATED, Json(event)))
}

/// POST /api/applications/bulk
///
/// Per-animal failures are reported in the body; the status stays 200.
pub async fn apply_bulk(
    State(state): State<AppState>,
    Json(payload): Json<BulkApplicationRequest>,
) -> Result<Json<BulkApplicationResponse>, ApiError> {
    let response = bulk_application::apply_bulk(&state, payload)
        .await
        .map_err(map_ranch_error)?;
    Ok(Json(response))
}

pub async fn get_application(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ApplicationEvent>, ApiError> {
    let event = applications::get_application(&state, id)
        .await
        .map_err(map_ranch_error)?;
    Ok(Json(event))
}

pub async fn update_application(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<ApplicationRequest>,
) -> Result<Json<ApplicationEvent>, ApiError> {
    let event = applications::update_application(&state, id, payload)
        .await
        .map_err(map_ranch_error)?;
    Ok(Json(event))
}

pub async fn delete_application(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<DeleteResponse>, ApiError> {
    applications::delete_application(&state, id)
        .await
        .map_err(map_ranch_error)?;
    Ok(Json(DeleteResponse { success: true }))
}
