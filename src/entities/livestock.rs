//! SeaORM Entity for livestock table
//!
//! One row per animal. Sale columns are either all set or all null.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "livestock")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Ear tag, unique among animals not yet sold
    pub tag: String,
    /// Lot reference (no foreign key, may point at a deleted lot)
    pub lot_id: Option<i32>,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub entry_weight: Decimal,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub purchase_unit_price: Decimal,
    #[sea_orm(column_type = "Decimal(Some((16, 2)))")]
    pub purchase_total: Decimal,
    pub purchase_date: Date,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub exit_weight: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub sale_unit_price: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(Some((16, 2)))")]
    pub sale_total: Option<Decimal>,
    pub sale_date: Option<Date>,
    pub image_url: Option<String>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::application_events::Entity")]
    ApplicationEvents,
}

impl Related<super::application_events::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ApplicationEvents.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
