use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::models::livestock::LivestockListItem;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lot {
    pub id: i32,
    pub name: String,
    pub section: String,
    pub created_at: NaiveDateTime,
}

impl Lot {
    /// "Farm - Section", the label shown next to each animal
    pub fn display_name(&self) -> String {
        format!("{} - {}", self.name, self.section)
    }
}

/// Validated lot fields, as handed to the repository
#[derive(Debug, Clone, PartialEq)]
pub struct LotInput {
    pub name: String,
    pub section: String,
}

/// Body of POST /api/lots and PUT /api/lots/{id}
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LotRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub section: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LotDetailResponse {
    #[serde(flatten)]
    pub lot: Lot,
    /// Animals currently referencing this lot
    pub livestock: Vec<LivestockListItem>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
}
