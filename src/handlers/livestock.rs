use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use tracing::info;

use crate::handlers::error::{map_ranch_error, ApiError};
use crate::models::livestock::{
    CreateLivestockRequest, Livestock, LivestockDetailResponse, LivestockListQuery, LivestockListResponse,
    SellLivestockRequest, UpdateLivestockRequest,
};
use crate::models::lot::DeleteResponse;
use crate::services::livestock;
use crate::AppState;

/// GET /api/livestock?status=all|active|sold&search=...
pub async fn list_livestock(
    State(state): State<AppState>,
    Query(query): Query<LivestockListQuery>,
) -> Result<Json<LivestockListResponse>, ApiError> {
    let items = livestock::list_livestock(&state, &query)
        .await
        .map_err(map_ranch_error)?;
    Ok(Json(LivestockListResponse {
        total: items.len(),
        livestock: items,
    }))
}

pub async fn get_livestock(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<LivestockDetailResponse>, ApiError> {
    let detail = livestock::get_livestock_detail(&state, id)
        .await
        .map_err(map_ranch_error)?;
    Ok(Json(detail))
}

pub async fn create_livestock(
    State(state): State<AppState>,
    Json(payload): Json<CreateLivestockRequest>,
) -> Result<(StatusCode, Json<Livestock>), ApiError> {
    info!(tag = ?payload.tag, lot_id = ?payload.lot_id, "Livestock registration request received");
    let record = livestock::create_livestock(&state, payload)
        .await
        .map_err(map_ranch_error)?;
    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn update_livestock(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateLivestockRequest>,
) -> Result<Json<Livestock>, ApiError> {
    let record = livestock::update_livestock(&state, id, payload)
        .await
        .map_err(map_ranch_error)?;
    Ok(Json(record))
}

pub async fn sell_livestock(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<SellLivestockRequest>,
) -> Result<Json<Livestock>, ApiError> {
    let record = livestock::mark_sold(&state, id, payload)
        .await
        .map_err(map_ranch_error)?;
    Ok(Json(record))
}

pub async fn delete_livestock(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<DeleteResponse>, ApiError> {
    livestock::delete_livestock(&state, id)
        .await
        .map_err(map_ranch_error)?;
    Ok(Json(DeleteResponse { success: true }))
}
