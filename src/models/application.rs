use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A logged product application, read with the product's current name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationEvent {
    pub id: i32,
    pub livestock_id: i32,
    pub product_id: i32,
    pub product_name: String,
    pub quantity: String,
    pub cost: Option<Decimal>,
    pub reason: Option<String>,
    pub applied_on: NaiveDate,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApplicationDraft {
    pub livestock_id: i32,
    pub product_id: i32,
    pub quantity: String,
    pub cost: Option<Decimal>,
    pub reason: Option<String>,
    pub applied_on: NaiveDate,
}

/// Body of POST /api/livestock/{id}/applications and PUT /api/applications/{id}
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApplicationRequest {
    #[serde(default)]
    pub product_id: Option<i32>,
    #[serde(default)]
    pub quantity: Option<String>,
    #[serde(default)]
    pub cost: Option<Decimal>,
    #[serde(default)]
    pub reason: Option<String>,
    /// Defaults to today on create, to the stored date on edit
    #[serde(default)]
    pub applied_on: Option<NaiveDate>,
}

/// Body of POST /api/applications/bulk
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BulkApplicationRequest {
    /// Animals selected for this application
    #[serde(default)]
    pub livestock_ids: Vec<i32>,
    #[serde(default)]
    pub product_id: Option<i32>,
    #[serde(default)]
    pub quantity: Option<String>,
    #[serde(default)]
    pub cost: Option<Decimal>,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub applied_on: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkFailure {
    pub livestock_id: i32,
    pub error: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct BulkApplicationResponse {
    pub batch_id: String,
    pub successful: usize,
    pub failed: usize,
    /// e.g. "2 successful, 1 failed"
    pub message: String,
    pub created: Vec<ApplicationEvent>,
    pub failures: Vec<BulkFailure>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ApplicationListResponse {
    pub applications: Vec<ApplicationEvent>,
}
