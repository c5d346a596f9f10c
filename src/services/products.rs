//! Product catalogue (injections, vitamins and other treatments)

use tracing::{info, warn};

use crate::error::RanchError;
use crate::models::product::{Product, ProductCategory, ProductInput, ProductRequest};
use crate::services::validation::{optional_text, FieldErrors, MAX_NAME_LENGTH};
use crate::AppState;

fn validate_product(req: &ProductRequest) -> Result<ProductInput, RanchError> {
    let mut errors = FieldErrors::new();
    let name = errors.require_text("name", req.name.as_deref(), MAX_NAME_LENGTH);

    let category = match req.category.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
        None => Some(ProductCategory::Other),
        Some(value) => {
            let parsed = value.parse::<ProductCategory>().ok();
            if parsed.is_none() {
                errors.push("category", "must be one of injection, vitamin, other");
            }
            parsed
        }
    };
    errors.into_result()?;

    match (name, category) {
        (Some(name), Some(category)) => Ok(ProductInput {
            name,
            description: optional_text(req.description.as_deref()),
            category,
        }),
        _ => Err(RanchError::field("name", "invalid product data")),
    }
}

pub async fn create_product(state: &AppState, req: ProductRequest) -> Result<Product, RanchError> {
    let input = validate_product(&req)?;
    let product = state.products.create(&input).await?;
    info!(
        product_id = product.id,
        name = %product.name,
        category = product.category.as_str(),
        "Product created"
    );
    Ok(product)
}

/// Renames show up in every event that references the product
pub async fn update_product(state: &AppState, id: i32, req: ProductRequest) -> Result<Product, RanchError> {
    let input = validate_product(&req)?;
    let product = state
        .products
        .update(id, &input)
        .await?
        .ok_or_else(|| RanchError::NotFound(format!("product {}", id)))?;
    info!(product_id = id, name = %product.name, "Product updated");
    Ok(product)
}

/// Refused while application events still reference the product
pub async fn delete_product(state: &AppState, id: i32) -> Result<(), RanchError> {
    if state.products.find_by_id(id).await?.is_none() {
        return Err(RanchError::NotFound(format!("product {}", id)));
    }

    let in_use = state.applications.count_for_product(id).await?;
    if in_use > 0 {
        warn!(product_id = id, in_use, "Refused to delete product in use");
        return Err(RanchError::Conflict(format!(
            "product {} is referenced by {} application(s)",
            id, in_use
        )));
    }

    if !state.products.delete(id).await? {
        return Err(RanchError::NotFound(format!("product {}", id)));
    }
    info!(product_id = id, "Product deleted");
    Ok(())
}

pub async fn get_product(state: &AppState, id: i32) -> Result<Product, RanchError> {
    state
        .products
        .find_by_id(id)
        .await?
        .ok_or_else(|| RanchError::NotFound(format!("product {}", id)))
}

pub async fn list_products(state: &AppState) -> Result<Vec<Product>, RanchError> {
    Ok(state.products.list_all().await?)
}
