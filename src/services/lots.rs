//! Lot (farm + section) management

use std::collections::HashMap;

use tracing::info;

use crate::error::RanchError;
use crate::models::lot::{Lot, LotDetailResponse, LotInput, LotRequest};
use crate::services::livestock::list_item;
use crate::services::validation::{FieldErrors, MAX_NAME_LENGTH};
use crate::AppState;

fn validate_lot(req: &LotRequest) -> Result<LotInput, RanchError> {
    let mut errors = FieldErrors::new();
    let name = errors.require_text("name", req.name.as_deref(), MAX_NAME_LENGTH);
    let section = errors.require_text("section", req.section.as_deref(), MAX_NAME_LENGTH);
    errors.into_result()?;

    match (name, section) {
        (Some(name), Some(section)) => Ok(LotInput { name, section }),
        _ => Err(RanchError::field("name", "invalid lot data")),
    }
}

pub async fn create_lot(state: &AppState, req: LotRequest) -> Result<Lot, RanchError> {
    let input = validate_lot(&req)?;
    let lot = state.lots.create(&input).await?;
    info!(lot_id = lot.id, lot = %lot.display_name(), "Lot created");
    Ok(lot)
}

pub async fn update_lot(state: &AppState, id: i32, req: LotRequest) -> Result<Lot, RanchError> {
    let input = validate_lot(&req)?;
    let lot = state
        .lots
        .update(id, &input)
        .await?
        .ok_or_else(|| RanchError::NotFound(format!("lot {}", id)))?;
    info!(lot_id = id, lot = %lot.display_name(), "Lot updated");
    Ok(lot)
}

/// Animals referencing the lot are left untouched
pub async fn delete_lot(state: &AppState, id: i32) -> Result<(), RanchError> {
    if !state.lots.delete(id).await? {
        return Err(RanchError::NotFound(format!("lot {}", id)));
    }
    info!(lot_id = id, "Lot deleted");
    Ok(())
}

pub async fn list_lots(state: &AppState) -> Result<Vec<Lot>, RanchError> {
    Ok(state.lots.list_all().await?)
}

/// Lot with every animal that references it, sold ones included
pub async fn get_lot_detail(state: &AppState, id: i32) -> Result<LotDetailResponse, RanchError> {
    let lot = state
        .lots
        .find_by_id(id)
        .await?
        .ok_or_else(|| RanchError::NotFound(format!("lot {}", id)))?;

    let lookup: HashMap<i32, Lot> = HashMap::from([(lot.id, lot.clone())]);
    let livestock = state
        .livestock
        .list_by_lot(id)
        .await?
        .into_iter()
        .map(|record| list_item(record, &lookup))
        .collect();

    Ok(LotDetailResponse { lot, livestock })
}
