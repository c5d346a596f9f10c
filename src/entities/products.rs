//! SeaORM Entity for products table

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    /// injection, vitamin or other
    pub category: String,
    pub created_at: DateTime,
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
