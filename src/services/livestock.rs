//! Livestock record lifecycle
//!
//! Active (no sale data) -> Sold (sale data present). There is no way back
//! to Active; a sold record can only have its sale values corrected or be
//! deleted.

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::error::RanchError;
use crate::models::livestock::{
    CreateLivestockRequest, Livestock, LivestockDetailResponse, LivestockDraft, LivestockListItem,
    LivestockListQuery, LivestockStatus, Sale, SellLivestockRequest, StatusFilter,
    UpdateLivestockRequest,
};
use crate::models::lot::Lot;
use crate::services::ledger::{self, CostSummary};
use crate::services::validation::{optional_text, FieldErrors, MAX_TAG_LENGTH};
use crate::AppState;

/// Acquisition fields shared by create and edit
struct Acquisition {
    tag: String,
    lot_id: i32,
    entry_weight: Decimal,
    purchase_unit_price: Decimal,
    purchase_date: NaiveDate,
}

fn validate_acquisition(
    errors: &mut FieldErrors,
    tag: Option<&str>,
    lot_id: Option<i32>,
    entry_weight: Option<Decimal>,
    purchase_unit_price: Option<Decimal>,
    purchase_date: Option<NaiveDate>,
) -> Option<Acquisition> {
    let tag = errors.require_text("tag", tag, MAX_TAG_LENGTH);
    let lot_id = errors.require("lot_id", lot_id);
    let entry_weight = errors.require_positive("entry_weight", entry_weight);
    let purchase_unit_price = errors.require_positive("purchase_unit_price", purchase_unit_price);
    let purchase_date = errors.require("purchase_date", purchase_date);

    Some(Acquisition {
        tag: tag?,
        lot_id: lot_id?,
        entry_weight: entry_weight?,
        purchase_unit_price: purchase_unit_price?,
        purchase_date: purchase_date?,
    })
}

/// Sale inputs that passed field validation
struct SaleInputs {
    exit_weight: Decimal,
    unit_price: Decimal,
    date: NaiveDate,
}

impl SaleInputs {
    fn into_sale(self) -> Result<Sale, RanchError> {
        ledger::sale(self.exit_weight, self.unit_price, self.date)
    }
}

/// Validate sale inputs against the purchase date
fn validate_sale(
    errors: &mut FieldErrors,
    exit_weight: Option<Decimal>,
    sale_unit_price: Option<Decimal>,
    sale_date: Option<NaiveDate>,
    purchase_date: Option<NaiveDate>,
) -> Option<SaleInputs> {
    let exit_weight = errors.require_positive("exit_weight", exit_weight);
    let sale_unit_price = errors.require_positive("sale_unit_price", sale_unit_price);
    let mut sale_date = errors.require("sale_date", sale_date);

    if let (Some(sold_on), Some(bought_on)) = (sale_date, purchase_date) {
        if sold_on < bought_on {
            errors.push("sale_date", "cannot be earlier than the purchase date");
            sale_date = None;
        }
    }

    Some(SaleInputs {
        exit_weight: exit_weight?,
        unit_price: sale_unit_price?,
        date: sale_date?,
    })
}

async fn ensure_lot_exists(state: &AppState, errors: &mut FieldErrors, lot_id: i32) -> Result<(), RanchError> {
    if state.lots.find_by_id(lot_id).await?.is_none() {
        errors.push("lot_id", format!("lot {} does not exist", lot_id));
    }
    Ok(())
}

/// Reject a tag already carried by another unsold animal
async fn ensure_tag_free(state: &AppState, tag: &str, except_id: Option<i32>) -> Result<(), RanchError> {
    if let Some(existing) = state.livestock.find_active_by_tag(tag).await? {
        if Some(existing.id) != except_id {
            return Err(RanchError::Conflict(format!(
                "tag {} is already used by an active animal (id {})",
                tag, existing.id
            )));
        }
    }
    Ok(())
}

async fn load(state: &AppState, id: i32) -> Result<Livestock, RanchError> {
    state
        .livestock
        .find_by_id(id)
        .await?
        .ok_or_else(|| RanchError::NotFound(format!("livestock {}", id)))
}

/// Register a newly acquired animal
pub async fn create_livestock(state: &AppState, req: CreateLivestockRequest) -> Result<Livestock, RanchError> {
    let mut errors = FieldErrors::new();
    let acquisition = validate_acquisition(
        &mut errors,
        req.tag.as_deref(),
        req.lot_id,
        req.entry_weight,
        req.purchase_unit_price,
        req.purchase_date,
    );
    if let Some(lot_id) = req.lot_id {
        ensure_lot_exists(state, &mut errors, lot_id).await?;
    }
    errors.into_result()?;
    let acquisition = acquisition.ok_or_else(|| RanchError::field("tag", "invalid livestock data"))?;

    ensure_tag_free(state, &acquisition.tag, None).await?;

    let draft = LivestockDraft {
        purchase_total: ledger::purchase_total(acquisition.entry_weight, acquisition.purchase_unit_price)?,
        tag: acquisition.tag,
        lot_id: Some(acquisition.lot_id),
        entry_weight: acquisition.entry_weight,
        purchase_unit_price: acquisition.purchase_unit_price,
        purchase_date: acquisition.purchase_date,
        sale: None,
        image_url: optional_text(req.image_url.as_deref()),
    };

    let record = state.livestock.create(&draft).await?;
    info!(
        livestock_id = record.id,
        tag = %record.tag,
        purchase_total = %record.purchase_total,
        "Livestock registered"
    );
    Ok(record)
}

/// Replace the editable fields of a record
///
/// Sale fields travel together. They may be corrected on a sold record but
/// not cleared, and they cannot be introduced here on an active one.
pub async fn update_livestock(
    state: &AppState,
    id: i32,
    req: UpdateLivestockRequest,
) -> Result<Livestock, RanchError> {
    let existing = load(state, id).await?;

    let mut errors = FieldErrors::new();
    let acquisition = validate_acquisition(
        &mut errors,
        req.tag.as_deref(),
        req.lot_id,
        req.entry_weight,
        req.purchase_unit_price,
        req.purchase_date,
    );

    // an unchanged lot may already be gone; only a new reference must resolve
    if let Some(lot_id) = req.lot_id {
        if existing.lot_id != Some(lot_id) {
            ensure_lot_exists(state, &mut errors, lot_id).await?;
        }
    }

    let sale_fields = [
        req.exit_weight.is_some(),
        req.sale_unit_price.is_some(),
        req.sale_date.is_some(),
    ];
    let sale = if sale_fields.iter().all(|present| !present) {
        if existing.status() == LivestockStatus::Sold {
            errors.push("sale_date", "sale data of a sold animal cannot be cleared");
        }
        None
    } else if sale_fields.iter().all(|present| *present) {
        if existing.status() == LivestockStatus::Active {
            errors.push("sale_date", "use the sell action to record a sale");
            None
        } else {
            validate_sale(
                &mut errors,
                req.exit_weight,
                req.sale_unit_price,
                req.sale_date,
                req.purchase_date,
            )
        }
    } else {
        errors.push(
            "sale_date",
            "exit weight, sale unit price and sale date must be provided together",
        );
        None
    };

    errors.into_result()?;
    let acquisition = acquisition.ok_or_else(|| RanchError::field("tag", "invalid livestock data"))?;
    let sale = sale.map(SaleInputs::into_sale).transpose()?;

    if sale.is_none() {
        ensure_tag_free(state, &acquisition.tag, Some(id)).await?;
    }

    let draft = LivestockDraft {
        purchase_total: ledger::purchase_total(acquisition.entry_weight, acquisition.purchase_unit_price)?,
        tag: acquisition.tag,
        lot_id: Some(acquisition.lot_id),
        entry_weight: acquisition.entry_weight,
        purchase_unit_price: acquisition.purchase_unit_price,
        purchase_date: acquisition.purchase_date,
        sale,
        image_url: optional_text(req.image_url.as_deref()),
    };

    let record = state
        .livestock
        .update(id, &draft)
        .await?
        .ok_or_else(|| RanchError::NotFound(format!("livestock {}", id)))?;

    info!(livestock_id = id, tag = %record.tag, "Livestock updated");
    Ok(record)
}

/// Active -> Sold
///
/// Repeating the call with the same inputs returns the record unchanged.
pub async fn mark_sold(state: &AppState, id: i32, req: SellLivestockRequest) -> Result<Livestock, RanchError> {
    let existing = load(state, id).await?;

    let mut errors = FieldErrors::new();
    let sale = validate_sale(
        &mut errors,
        req.exit_weight,
        req.sale_unit_price,
        req.sale_date,
        Some(existing.purchase_date),
    );
    errors.into_result()?;
    let sale = sale
        .ok_or_else(|| RanchError::field("sale_date", "invalid sale data"))?
        .into_sale()?;

    if let Some(current) = &existing.sale {
        if *current == sale {
            debug!(livestock_id = id, "Sale already recorded with identical data");
            return Ok(existing);
        }
        warn!(livestock_id = id, "Rejected second sale with different data");
        return Err(RanchError::Conflict(format!(
            "livestock {} is already sold; edit the record to correct sale data",
            id
        )));
    }

    let mut draft = existing.to_draft();
    draft.sale = Some(sale);

    let record = state
        .livestock
        .update(id, &draft)
        .await?
        .ok_or_else(|| RanchError::NotFound(format!("livestock {}", id)))?;

    info!(
        livestock_id = id,
        tag = %record.tag,
        sale_total = ?record.sale.as_ref().map(|s| s.total),
        "Livestock marked as sold"
    );
    Ok(record)
}

/// Hard delete from any state
pub async fn delete_livestock(state: &AppState, id: i32) -> Result<(), RanchError> {
    if !state.livestock.delete(id).await? {
        return Err(RanchError::NotFound(format!("livestock {}", id)));
    }
    info!(livestock_id = id, "Livestock deleted");
    Ok(())
}

/// Record with its lot, application history and cost summary
pub async fn get_livestock_detail(state: &AppState, id: i32) -> Result<LivestockDetailResponse, RanchError> {
    let livestock = load(state, id).await?;

    let lot = match livestock.lot_id {
        Some(lot_id) => state.lots.find_by_id(lot_id).await?,
        None => None,
    };
    let applications = state.applications.list_for_livestock(id).await?;
    let summary = CostSummary::compute(&livestock, &applications);

    Ok(LivestockDetailResponse {
        status: livestock.status(),
        livestock,
        lot,
        applications,
        summary,
    })
}

pub fn list_item(livestock: Livestock, lots: &HashMap<i32, Lot>) -> LivestockListItem {
    let lot_name = livestock
        .lot_id
        .and_then(|lot_id| lots.get(&lot_id))
        .map(Lot::display_name);

    LivestockListItem {
        status: livestock.status(),
        livestock,
        lot_name,
    }
}

/// Filter by status (default: active) and by a search term on tag or lot name
pub async fn list_livestock(state: &AppState, query: &LivestockListQuery) -> Result<Vec<LivestockListItem>, RanchError> {
    let filter = match query.status.as_deref() {
        None => StatusFilter::Active,
        Some(value) => value
            .parse::<StatusFilter>()
            .map_err(|_| RanchError::field("status", "must be one of all, active, sold"))?,
    };
    let term = query
        .search
        .as_deref()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty());

    let lots: HashMap<i32, Lot> = state
        .lots
        .list_all()
        .await?
        .into_iter()
        .map(|lot| (lot.id, lot))
        .collect();

    let items: Vec<LivestockListItem> = state
        .livestock
        .list_all()
        .await?
        .into_iter()
        .map(|livestock| list_item(livestock, &lots))
        .filter(|item| filter.matches(item.status))
        .filter(|item| match &term {
            None => true,
            Some(term) => {
                item.livestock.tag.to_lowercase().contains(term.as_str())
                    || item
                        .lot_name
                        .as_ref()
                        .map(|name| name.to_lowercase().contains(term.as_str()))
                        .unwrap_or(false)
            }
        })
        .collect();

    debug!(count = items.len(), ?filter, "Livestock list");
    Ok(items)
}
