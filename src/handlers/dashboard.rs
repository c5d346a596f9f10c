use axum::{extract::State, Json};

use crate::handlers::error::{map_ranch_error, ApiError};
use crate::models::dashboard::DashboardResponse;
use crate::services::dashboard::herd_counts;
use crate::AppState;

pub async fn get_dashboard(State(state): State<AppState>) -> Result<Json<DashboardResponse>, ApiError> {
    let counts = herd_counts(&state).await.map_err(map_ranch_error)?;
    Ok(Json(counts))
}
