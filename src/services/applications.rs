//! Application events: a product given to one animal on a date

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::info;

use crate::error::RanchError;
use crate::models::application::{ApplicationDraft, ApplicationEvent, ApplicationRequest};
use crate::services::validation::{optional_text, FieldErrors, MAX_QUANTITY_LENGTH};
use crate::AppState;

/// Event fields that do not depend on the animal
#[derive(Debug, Clone, PartialEq)]
pub struct ApplicationFields {
    pub product_id: i32,
    pub quantity: String,
    pub cost: Option<Decimal>,
    pub reason: Option<String>,
    pub applied_on: NaiveDate,
}

impl ApplicationFields {
    pub fn for_livestock(&self, livestock_id: i32) -> ApplicationDraft {
        ApplicationDraft {
            livestock_id,
            product_id: self.product_id,
            quantity: self.quantity.clone(),
            cost: self.cost,
            reason: self.reason.clone(),
            applied_on: self.applied_on,
        }
    }
}

/// Validate product, quantity, cost and date
///
/// `default_date` fills a missing `applied_on`; dates after `today` are
/// rejected.
pub async fn validate_fields(
    state: &AppState,
    product_id: Option<i32>,
    quantity: Option<&str>,
    cost: Option<Decimal>,
    reason: Option<&str>,
    applied_on: Option<NaiveDate>,
    default_date: NaiveDate,
) -> Result<ApplicationFields, RanchError> {
    let today = state.today();
    let mut errors = FieldErrors::new();

    let product_id = errors.require("product_id", product_id);
    if let Some(id) = product_id {
        if state.products.find_by_id(id).await?.is_none() {
            errors.push("product_id", format!("product {} does not exist", id));
        }
    }
    let quantity = errors.require_text("quantity", quantity, MAX_QUANTITY_LENGTH);
    let cost_ok = cost.is_none() || errors.optional_non_negative("cost", cost).is_some();
    let applied_on = errors.not_in_future("applied_on", applied_on.unwrap_or(default_date), today);

    errors.into_result()?;

    match (product_id, quantity, applied_on) {
        (Some(product_id), Some(quantity), Some(applied_on)) if cost_ok => Ok(ApplicationFields {
            product_id,
            quantity,
            cost,
            reason: optional_text(reason),
            applied_on,
        }),
        _ => Err(RanchError::field("product_id", "invalid application data")),
    }
}

async fn ensure_livestock_exists(state: &AppState, livestock_id: i32) -> Result<(), RanchError> {
    if state.livestock.find_by_id(livestock_id).await?.is_none() {
        return Err(RanchError::NotFound(format!("livestock {}", livestock_id)));
    }
    Ok(())
}

/// Log one application against an animal; the date defaults to today
pub async fn log_application(
    state: &AppState,
    livestock_id: i32,
    req: ApplicationRequest,
) -> Result<ApplicationEvent, RanchError> {
    ensure_livestock_exists(state, livestock_id).await?;

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

    let event = state.applications.create(&fields.for_livestock(livestock_id)).await?;
    info!(
        event_id = event.id,
        livestock_id,
        product = %event.product_name,
        applied_on = %event.applied_on,
        "Application logged"
    );
    Ok(event)
}

/// Replace the fields of an event; the animal it belongs to never changes
pub async fn update_application(
    state: &AppState,
    id: i32,
    req: ApplicationRequest,
) -> Result<ApplicationEvent, RanchError> {
    let existing = get_application(state, id).await?;

    let fields = validate_fields(
        state,
        req.product_id,
        req.quantity.as_deref(),
        req.cost,
        req.reason.as_deref(),
        req.applied_on,
        existing.applied_on,
    )
    .await?;

    let event = state
        .applications
        .update(id, &fields.for_livestock(existing.livestock_id))
        .await?
        .ok_or_else(|| RanchError::NotFound(format!("application {}", id)))?;
    info!(event_id = id, livestock_id = event.livestock_id, "Application updated");
    Ok(event)
}

pub async fn delete_application(state: &AppState, id: i32) -> Result<(), RanchError> {
    if !state.applications.delete(id).await? {
        return Err(RanchError::NotFound(format!("application {}", id)));
    }
    info!(event_id = id, "Application deleted");
    Ok(())
}

pub async fn get_application(state: &AppState, id: i32) -> Result<ApplicationEvent, RanchError> {
    state
        .applications
        .find_by_id(id)
        .await?
        .ok_or_else(|| RanchError::NotFound(format!("application {}", id)))
}

/// History of one animal, most recent first
pub async fn list_applications(state: &AppState, livestock_id: i32) -> Result<Vec<ApplicationEvent>, RanchError> {
    ensure_livestock_exists(state, livestock_id).await?;
    Ok(state.applications.list_for_livestock(livestock_id).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::livestock::LivestockDraft;
    use crate::models::product::{ProductCategory, ProductInput};
    use rust_decimal_macros::dec;

    async fn seeded() -> (AppState, i32, i32) {
        let state = AppState::in_memory();
        let animal = state
            .livestock
            .create(&LivestockDraft {
                tag: "A-100".to_string(),
                lot_id: None,
                entry_weight: dec!(300),
                purchase_unit_price: dec!(20),
                purchase_total: dec!(6000),
                purchase_date: NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
                sale: None,
                image_url: None,
            })
            .await
            .unwrap();
        let product = state
            .products
            .create(&ProductInput {
                name: "Ivermectina".to_string(),
                description: None,
                category: ProductCategory::Injection,
            })
            .await
            .unwrap();
        (state, animal.id, product.id)
    }

    fn request(product_id: i32) -> ApplicationRequest {
        ApplicationRequest {
            product_id: Some(product_id),
            quantity: Some("5 ml".to_string()),
            cost: Some(dec!(12.50)),
            reason: Some("parasites".to_string()),
            applied_on: Some(NaiveDate::from_ymd_opt(2025, 2, 1).unwrap()),
        }
    }

    #[tokio::test]
    async fn test_log_application_defaults_date_to_today() {
        let (state, livestock_id, product_id) = seeded().await;
        let mut req = request(product_id);
        req.applied_on = None;

        let event = log_application(&state, livestock_id, req).await.unwrap();
        assert_eq!(event.applied_on, state.today());
        assert_eq!(event.product_name, "Ivermectina");
    }

    #[tokio::test]
    async fn test_future_date_rejected() {
        let (state, livestock_id, product_id) = seeded().await;
        let mut req = request(product_id);
        req.applied_on = state.today().succ_opt();

        match log_application(&state, livestock_id, req).await {
            Err(RanchError::Validation(fields)) => assert_eq!(fields[0].field, "applied_on"),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_negative_cost_and_unknown_product_rejected() {
        let (state, livestock_id, _) = seeded().await;
        let mut req = request(999);
        req.cost = Some(dec!(-1));

        match log_application(&state, livestock_id, req).await {
            Err(RanchError::Validation(fields)) => {
                let names: Vec<&str> = fields.iter().map(|f| f.field.as_str()).collect();
                assert_eq!(names, vec!["product_id", "cost"]);
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unknown_livestock_is_not_found() {
        let (state, _, product_id) = seeded().await;
        let result = log_application(&state, 4242, request(product_id)).await;
        assert!(matches!(result, Err(RanchError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_keeps_date_when_omitted() {
        let (state, livestock_id, product_id) = seeded().await;
        let event = log_application(&state, livestock_id, request(product_id)).await.unwrap();

        let edit = ApplicationRequest {
            product_id: Some(product_id),
            quantity: Some("10 ml".to_string()),
            cost: None,
            reason: None,
            applied_on: None,
        };
        let updated = update_application(&state, event.id, edit).await.unwrap();
        assert_eq!(updated.applied_on, event.applied_on);
        assert_eq!(updated.quantity, "10 ml");
        assert_eq!(updated.cost, None);
        assert_eq!(updated.livestock_id, livestock_id);
    }

    #[tokio::test]
    async fn test_delete_application() {
        let (state, livestock_id, product_id) = seeded().await;
        let event = log_application(&state, livestock_id, request(product_id)).await.unwrap();

        delete_application(&state, event.id).await.unwrap();
        assert!(list_applications(&state, livestock_id).await.unwrap().is_empty());
        assert!(matches!(
            delete_application(&state, event.id).await,
            Err(RanchError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_quantity_length_matches_stored_column() {
        let (state, livestock_id, product_id) = seeded().await;

        let mut fits = request(product_id);
        fits.quantity = Some("m".repeat(MAX_QUANTITY_LENGTH));
        let event = log_application(&state, livestock_id, fits).await.unwrap();
        assert_eq!(event.quantity.len(), 64);

        let mut too_long = request(product_id);
        too_long.quantity = Some("m".repeat(MAX_QUANTITY_LENGTH + 1));
        match log_application(&state, livestock_id, too_long).await {
            Err(RanchError::Validation(fields)) => {
                assert_eq!(fields[0].field, "quantity");
                assert_eq!(fields[0].message, "cannot exceed 64 characters");
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_cost_above_column_range_rejected() {
        let (state, livestock_id, product_id) = seeded().await;
        let mut req = request(product_id);
        req.cost = Some(dec!(10000000000));

        match log_application(&state, livestock_id, req).await {
            Err(RanchError::Validation(fields)) => assert_eq!(fields[0].field, "cost"),
            other => panic!("expected validation error, got {:?}", other),
        }
    }
}
