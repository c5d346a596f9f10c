//! Livestock records and the request/response shapes of /api/livestock

use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::application::ApplicationEvent;
use crate::models::lot::Lot;
use crate::services::ledger::CostSummary;

/// Lifecycle state, derived from whether sale data is present
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LivestockStatus {
    Active,
    Sold,
}

impl LivestockStatus {
    pub fn label(&self) -> &'static str {
        match self {
            LivestockStatus::Active => "Active",
            LivestockStatus::Sold => "Sold",
        }
    }
}

/// Disposition data. Present as a whole or not at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sale {
    pub exit_weight: Decimal,
    pub unit_price: Decimal,
    /// exit_weight * unit_price, rounded to cents
    pub total: Decimal,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Livestock {
    pub id: i32,
    pub tag: String,
    pub lot_id: Option<i32>,
    pub entry_weight: Decimal,
    pub purchase_unit_price: Decimal,
    pub purchase_total: Decimal,
    pub purchase_date: NaiveDate,
    pub sale: Option<Sale>,
    pub image_url: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Livestock {
    pub fn status(&self) -> LivestockStatus {
        if self.sale.is_some() {
            LivestockStatus::Sold
        } else {
            LivestockStatus::Active
        }
    }

    /// Copy of the persisted fields, ready to be written back
    pub fn to_draft(&self) -> LivestockDraft {
        LivestockDraft {
            tag: self.tag.clone(),
            lot_id: self.lot_id,
            entry_weight: self.entry_weight,
            purchase_unit_price: self.purchase_unit_price,
            purchase_total: self.purchase_total,
            purchase_date: self.purchase_date,
            sale: self.sale.clone(),
            image_url: self.image_url.clone(),
        }
    }
}

/// Everything the repository persists for one animal
#[derive(Debug, Clone, PartialEq)]
pub struct LivestockDraft {
    pub tag: String,
    pub lot_id: Option<i32>,
    pub entry_weight: Decimal,
    pub purchase_unit_price: Decimal,
    pub purchase_total: Decimal,
    pub purchase_date: NaiveDate,
    pub sale: Option<Sale>,
    pub image_url: Option<String>,
}

/// Body of POST /api/livestock
///
/// Fields are optional so missing ones surface as per-field messages.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateLivestockRequest {
    #[serde(default)]
    pub tag: Option<String>,
    #[serde(default)]
    pub lot_id: Option<i32>,
    #[serde(default)]
    pub entry_weight: Option<Decimal>,
    #[serde(default)]
    pub purchase_unit_price: Option<Decimal>,
    #[serde(default)]
    pub purchase_date: Option<NaiveDate>,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Body of PUT /api/livestock/{id}; replaces every editable field
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateLivestockRequest {
    #[serde(default)]
    pub tag: Option<String>,
    #[serde(default)]
    pub lot_id: Option<i32>,
    #[serde(default)]
    pub entry_weight: Option<Decimal>,
    #[serde(default)]
    pub purchase_unit_price: Option<Decimal>,
    #[serde(default)]
    pub purchase_date: Option<NaiveDate>,
    #[serde(default)]
    pub exit_weight: Option<Decimal>,
    #[serde(default)]
    pub sale_unit_price: Option<Decimal>,
    #[serde(default)]
    pub sale_date: Option<NaiveDate>,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Body of POST /api/livestock/{id}/sell
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SellLivestockRequest {
    #[serde(default)]
    pub exit_weight: Option<Decimal>,
    #[serde(default)]
    pub sale_unit_price: Option<Decimal>,
    #[serde(default)]
    pub sale_date: Option<NaiveDate>,
}

/// Status filter of the livestock list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    All,
    Active,
    Sold,
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(StatusFilter::All),
            "active" => Ok(StatusFilter::Active),
            "sold" => Ok(StatusFilter::Sold),
            other => Err(format!("unknown status filter: {}", other)),
        }
    }
}

impl StatusFilter {
    pub fn matches(&self, status: LivestockStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Active => status == LivestockStatus::Active,
            StatusFilter::Sold => status == LivestockStatus::Sold,
        }
    }
}

/// Query of GET /api/livestock
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LivestockListQuery {
    /// all, active or sold (default: active)
    pub status: Option<String>,
    /// Case-insensitive match on tag or lot name
    pub search: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LivestockListItem {
    #[serde(flatten)]
    pub livestock: Livestock,
    pub status: LivestockStatus,
    pub lot_name: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LivestockListResponse {
    pub livestock: Vec<LivestockListItem>,
    pub total: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct LivestockDetailResponse {
    #[serde(flatten)]
    pub livestock: Livestock,
    pub status: LivestockStatus,
    /// None when the referenced lot no longer exists
    pub lot: Option<Lot>,
    pub applications: Vec<ApplicationEvent>,
    pub summary: CostSummary,
}
