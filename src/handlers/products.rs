use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::handlers::error::{map_ranch_error, ApiError};
use crate::models::lot::DeleteResponse;
use crate::models::product::{Product, ProductRequest};
use crate::services::products;
use crate::AppState;

pub async fn list_products(State(state): State<AppState>) -> Result<Json<Vec<Product>>, ApiError> {
    let products = products::list_products(&state).await.map_err(map_ranch_error)?;
    Ok(Json(products))
}

pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Product>, ApiError> {
    let product = products::get_product(&state, id).await.map_err(map_ranch_error)?;
    Ok(Json(product))
}

pub async fn create_product(
    State(state): State<AppState>,
    Json(payload): Json<ProductRequest>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    let product = products::create_product(&state, payload).await.map_err(map_ranch_error)?;
    Ok((StatusCode::CREATED, Json(product)))
}

pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<ProductRequest>,
) -> Result<Json<Product>, ApiError> {
    let product = products::update_product(&state, id, payload)
        .await
        .map_err(map_ranch_error)?;
    Ok(Json(product))
}

pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<DeleteResponse>, ApiError> {
    products::delete_product(&state, id).await.map_err(map_ranch_error)?;
    Ok(Json(DeleteResponse { success: true }))
}
