use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::handlers::error::{map_ranch_error, ApiError};
use crate::models::lot::{DeleteResponse, Lot, LotDetailResponse, LotRequest};
use crate::services::lots;
use crate::AppState;

pub async fn list_lots(State(state): State<AppState>) -> Result<Json<Vec<Lot>>, ApiError> {
    let lots = lots::list_lots(&state).await.map_err(map_ranch_error)?;
    Ok(Json(lots))
}

pub async fn get_lot(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<LotDetailResponse>, ApiError> {
    let detail = lots::get_lot_detail(&state, id).await.map_err(map_ranch_error)?;
    Ok(Json(detail))
}

pub async fn create_lot(
    State(state): State<AppState>,
    Json(payload): Json<LotRequest>,
) -> Result<(StatusCode, Json<Lot>), ApiError> {
    let lot = lots::create_lot(&state, payload).await.map_err(map_ranch_error)?;
    Ok((StatusCode::CREATED, Json(lot)))
}

pub async fn update_lot(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<LotRequest>,
) -> Result<Json<Lot>, ApiError> {
    let lot = lots::update_lot(&state, id, payload).await.map_err(map_ranch_error)?;
    Ok(Json(lot))
}

pub async fn delete_lot(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<DeleteResponse>, ApiError> {
    lots::delete_lot(&state, id).await.map_err(map_ranch_error)?;
    Ok(Json(DeleteResponse { success: true }))
}
