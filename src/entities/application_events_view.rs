//! Read-only SeaORM Entity over the application_events_view view
//!
//! Same columns as `application_events` plus the current product name.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "application_events_view")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i32,
    pub livestock_id: i32,
    pub product_id: i32,
    pub product_name: String,
    pub quantity: String,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub cost: Option<Decimal>,
    pub reason: Option<String>,
    pub applied_on: Date,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
