//! Apply one product to many animals in a single request
//!
//! Shared fields are validated once. Each animal is then written
//! independently, so one failure never rolls back the others.

use futures_util::{stream, StreamExt};
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::RanchError;
use crate::models::application::{
    ApplicationEvent, BulkApplicationRequest, BulkApplicationResponse, BulkFailure,
};
use crate::services::applications::{validate_fields, ApplicationFields};
use crate::AppState;

/// Largest selection accepted in one request
pub const MAX_BULK_SELECTION: usize = 500;
/// Writes in flight at once
const BULK_CONCURRENCY: usize = 8;

/// Drop duplicate ids, keeping the first occurrence
fn unique_ids(ids: &[i32]) -> Vec<i32> {
    let mut seen = std::collections::HashSet::new();
    ids.iter().copied().filter(|id| seen.insert(*id)).collect()
}

async fn apply_one(
    state: &AppState,
    livestock_id: i32,
    fields: &ApplicationFields,
) -> Result<ApplicationEvent, RanchError> {
    if state.livestock.find_by_id(livestock_id).await?.is_none() {
        return Err(RanchError::NotFound(format!("livestock {}", livestock_id)));
    }
    Ok(state.applications.create(&fields.for_livestock(livestock_id)).await?)
}

pub async fn apply_bulk(state: &AppState, req: BulkApplicationRequest) -> Result<BulkApplicationResponse, RanchError> {
    let livestock_ids = unique_ids(&req.livestock_ids);
    if livestock_ids.is_empty() {
        return Err(RanchError::field("livestock_ids", "select at least one animal"));
    }
    if livestock_ids.len() > MAX_BULK_SELECTION {
        return Err(RanchError::field(
            "livestock_ids",
            format!("cannot select more than {} animals", MAX_BULK_SELECTION),
        ));
    }

    let fields = validate_fields(
        state,
        req.product_id,
        req.quantity.as_deref(),
        req.cost,
        req.reason.as_deref(),
        req.applied_on,
        state.today(),
    )
    .await?;

    let batch_id = Uuid::new_v4().to_string();
    info!(
        batch_id = %batch_id,
        product_id = fields.product_id,
        animals = livestock_ids.len(),
        "Bulk application started"
    );

    let fields = &fields;
    let results: Vec<_> = stream::iter(livestock_ids)
        .map(|livestock_id| async move { (livestock_id, apply_one(state, livestock_id, fields).await) })
        .buffered(BULK_CONCURRENCY)
        .collect()
        .await;

    let mut created = Vec::new();
    let mut failures = Vec::new();
    for (livestock_id, result) in results {
        match result {
            Ok(event) => created.push(event),
            Err(e) => {
                warn!(batch_id = %batch_id, livestock_id, error = %e, "Bulk application failed for animal");
                failures.push(BulkFailure {
                    livestock_id,
                    error: e.to_string(),
                });
            }
        }
    }

    let message = format!("{} successful, {} failed", created.len(), failures.len());
    info!(batch_id = %batch_id, %message, "Bulk application finished");

    Ok(BulkApplicationResponse {
        batch_id,
        successful: created.len(),
        failed: failures.len(),
        message,
        created,
        failures,
    })
}
