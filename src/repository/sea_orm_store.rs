//! SeaORM repository implementations (PostgreSQL)

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder, Set, SqlErr,
};

use super::{
    ApplicationRepository, LivestockRepository, LotRepository, ProductRepository, RepoResult,
};
use crate::entities::{
    application_events, application_events_view, livestock, lots, prelude::*, products,
};
use crate::error::RepoError;
use crate::models::application::{ApplicationDraft, ApplicationEvent};
use crate::models::livestock::{Livestock as LivestockRecord, LivestockDraft, Sale};
use crate::models::lot::{Lot, LotInput};
use crate::models::product::{Product, ProductCategory, ProductInput};

impl From<DbErr> for RepoError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(msg)) => RepoError::Constraint(msg),
            Some(SqlErr::ForeignKeyConstraintViolation(msg)) => RepoError::Constraint(msg),
            _ => RepoError::Database(err.to_string()),
        }
    }
}

impl From<lots::Model> for Lot {
    fn from(model: lots::Model) -> Self {
        Lot {
            id: model.id,
            name: model.name,
            section: model.section,
            created_at: model.created_at,
        }
    }
}

impl From<products::Model> for Product {
    fn from(model: products::Model) -> Self {
        let category = model.category.parse::<ProductCategory>().unwrap_or_else(|_| {
            tracing::warn!(
                product_id = model.id,
                category = %model.category,
                "Unknown product category in database, reading as other"
            );
            ProductCategory::Other
        });

        Product {
            id: model.id,
            name: model.name,
            description: model.description,
            category,
            created_at: model.created_at,
        }
    }
}

impl From<livestock::Model> for LivestockRecord {
    fn from(model: livestock::Model) -> Self {
        let sale = match (
            model.exit_weight,
            model.sale_unit_price,
            model.sale_total,
            model.sale_date,
        ) {
            (Some(exit_weight), Some(unit_price), Some(total), Some(date)) => Some(Sale {
                exit_weight,
                unit_price,
                total,
                date,
            }),
            _ => None,
        };

        LivestockRecord {
            id: model.id,
            tag: model.tag,
            lot_id: model.lot_id,
            entry_weight: model.entry_weight,
            purchase_unit_price: model.purchase_unit_price,
            purchase_total: model.purchase_total,
            purchase_date: model.purchase_date,
            sale,
            image_url: model.image_url,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<application_events_view::Model> for ApplicationEvent {
    fn from(model: application_events_view::Model) -> Self {
        ApplicationEvent {
            id: model.id,
            livestock_id: model.livestock_id,
            product_id: model.product_id,
            product_name: model.product_name,
            quantity: model.quantity,
            cost: model.cost,
            reason: model.reason,
            applied_on: model.applied_on,
            created_at: model.created_at,
        }
    }
}

fn apply_livestock_draft(active: &mut livestock::ActiveModel, draft: &LivestockDraft) {
    active.tag = Set(draft.tag.clone());
    active.lot_id = Set(draft.lot_id);
    active.entry_weight = Set(draft.entry_weight);
    active.purchase_unit_price = Set(draft.purchase_unit_price);
    active.purchase_total = Set(draft.purchase_total);
    active.purchase_date = Set(draft.purchase_date);
    active.exit_weight = Set(draft.sale.as_ref().map(|s| s.exit_weight));
    active.sale_unit_price = Set(draft.sale.as_ref().map(|s| s.unit_price));
    active.sale_total = Set(draft.sale.as_ref().map(|s| s.total));
    active.sale_date = Set(draft.sale.as_ref().map(|s| s.date));
    active.image_url = Set(draft.image_url.clone());
    active.updated_at = Set(Utc::now().naive_utc());
}

fn apply_application_draft(active: &mut application_events::ActiveModel, draft: &ApplicationDraft) {
    active.livestock_id = Set(draft.livestock_id);
    active.product_id = Set(draft.product_id);
    active.quantity = Set(draft.quantity.clone());
    active.cost = Set(draft.cost);
    active.reason = Set(draft.reason.clone());
    active.applied_on = Set(draft.applied_on);
}

#[derive(Clone)]
pub struct SeaOrmStore {
    db: DatabaseConnection,
}

impl SeaOrmStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn load_event(&self, id: i32) -> RepoResult<Option<ApplicationEvent>> {
        let event = ApplicationEventsView::find_by_id(id).one(&self.db).await?;
        Ok(event.map(Into::into))
    }
}

#[async_trait]
impl LotRepository for SeaOrmStore {
    async fn create(&self, input: &LotInput) -> RepoResult<Lot> {
        let lot = lots::ActiveModel {
            name: Set(input.name.clone()),
            section: Set(input.section.clone()),
            created_at: Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        Ok(lot.insert(&self.db).await?.into())
    }

    async fn find_by_id(&self, id: i32) -> RepoResult<Option<Lot>> {
        Ok(Lots::find_by_id(id).one(&self.db).await?.map(Into::into))
    }

    async fn list_all(&self) -> RepoResult<Vec<Lot>> {
        let lots = Lots::find()
            .order_by_desc(lots::Column::CreatedAt)
            .order_by_desc(lots::Column::Id)
            .all(&self.db)
            .await?;

        Ok(lots.into_iter().map(Into::into).collect())
    }

    async fn update(&self, id: i32, input: &LotInput) -> RepoResult<Option<Lot>> {
        let Some(existing) = Lots::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let mut active_model = existing.into_active_model();
        active_model.name = Set(input.name.clone());
        active_model.section = Set(input.section.clone());

        Ok(Some(active_model.update(&self.db).await?.into()))
    }

    async fn delete(&self, id: i32) -> RepoResult<bool> {
        let result = Lots::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }
}

#[async_trait]
impl ProductRepository for SeaOrmStore {
    async fn create(&self, input: &ProductInput) -> RepoResult<Product> {
        let product = products::ActiveModel {
            name: Set(input.name.clone()),
            description: Set(input.description.clone()),
            category: Set(input.category.as_str().to_string()),
            created_at: Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        Ok(product.insert(&self.db).await?.into())
    }

    async fn find_by_id(&self, id: i32) -> RepoResult<Option<Product>> {
        Ok(Products::find_by_id(id).one(&self.db).await?.map(Into::into))
    }

    async fn list_all(&self) -> RepoResult<Vec<Product>> {
        let products = Products::find()
            .order_by_asc(products::Column::Name)
            .all(&self.db)
            .await?;

        Ok(products.into_iter().map(Into::into).collect())
    }

    async fn update(&self, id: i32, input: &ProductInput) -> RepoResult<Option<Product>> {
        let Some(existing) = Products::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let mut active_model = existing.into_active_model();
        active_model.name = Set(input.name.clone());
        active_model.description = Set(input.description.clone());
        active_model.category = Set(input.category.as_str().to_string());

        Ok(Some(active_model.update(&self.db).await?.into()))
    }

    async fn delete(&self, id: i32) -> RepoResult<bool> {
        let result = Products::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }
}

#[async_trait]
impl LivestockRepository for SeaOrmStore {
    async fn create(&self, draft: &LivestockDraft) -> RepoResult<LivestockRecord> {
        let now = Utc::now().naive_utc();
        let mut active_model = livestock::ActiveModel {
            created_at: Set(now),
            ..Default::default()
        };
        apply_livestock_draft(&mut active_model, draft);

        Ok(active_model.insert(&self.db).await?.into())
    }

    async fn find_by_id(&self, id: i32) -> RepoResult<Option<LivestockRecord>> {
        Ok(Livestock::find_by_id(id).one(&self.db).await?.map(Into::into))
    }

    async fn find_active_by_tag(&self, tag: &str) -> RepoResult<Option<LivestockRecord>> {
        let record = Livestock::find()
            .filter(livestock::Column::Tag.eq(tag))
            .filter(livestock::Column::SaleDate.is_null())
            .one(&self.db)
            .await?;

        Ok(record.map(Into::into))
    }

    async fn list_all(&self) -> RepoResult<Vec<LivestockRecord>> {
        let records = Livestock::find()
            .order_by_desc(livestock::Column::PurchaseDate)
            .order_by_desc(livestock::Column::Id)
            .all(&self.db)
            .await?;

        Ok(records.into_iter().map(Into::into).collect())
    }

    async fn list_by_lot(&self, lot_id: i32) -> RepoResult<Vec<LivestockRecord>> {
        let records = Livestock::find()
            .filter(livestock::Column::LotId.eq(lot_id))
            .order_by_desc(livestock::Column::PurchaseDate)
            .order_by_desc(livestock::Column::Id)
            .all(&self.db)
            .await?;

        Ok(records.into_iter().map(Into::into).collect())
    }

    async fn update(&self, id: i32, draft: &LivestockDraft) -> RepoResult<Option<LivestockRecord>> {
        let Some(existing) = Livestock::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let mut active_model = existing.into_active_model();
        apply_livestock_draft(&mut active_model, draft);

        Ok(Some(active_model.update(&self.db).await?.into()))
    }

    async fn delete(&self, id: i32) -> RepoResult<bool> {
        let result = Livestock::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }

    async fn count_all(&self) -> RepoResult<u64> {
        Ok(Livestock::find().count(&self.db).await?)
    }

    async fn count_sold(&self) -> RepoResult<u64> {
        let sold = Livestock::find()
            .filter(livestock::Column::SaleDate.is_not_null())
            .count(&self.db)
            .await?;

        Ok(sold)
    }
}

#[async_trait]
impl ApplicationRepository for SeaOrmStore {
    async fn create(&self, draft: &ApplicationDraft) -> RepoResult<ApplicationEvent> {
        let mut active_model = application_events::ActiveModel {
            created_at: Set(Utc::now().naive_utc()),
            ..Default::default()
        };
        apply_application_draft(&mut active_model, draft);

        let inserted = active_model.insert(&self.db).await?;

        self.load_event(inserted.id).await?.ok_or_else(|| {
            RepoError::Database(format!("application {} missing from view after insert", inserted.id))
        })
    }

    async fn find_by_id(&self, id: i32) -> RepoResult<Option<ApplicationEvent>> {
        self.load_event(id).await
    }

    async fn list_for_livestock(&self, livestock_id: i32) -> RepoResult<Vec<ApplicationEvent>> {
        let events = ApplicationEventsView::find()
            .filter(application_events_view::Column::LivestockId.eq(livestock_id))
            .order_by_desc(application_events_view::Column::AppliedOn)
            .order_by_desc(application_events_view::Column::Id)
            .all(&self.db)
            .await?;

        Ok(events.into_iter().map(Into::into).collect())
    }

    async fn update(&self, id: i32, draft: &ApplicationDraft) -> RepoResult<Option<ApplicationEvent>> {
        let Some(existing) = ApplicationEvents::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let mut active_model = existing.into_active_model();
        apply_application_draft(&mut active_model, draft);
        active_model.update(&self.db).await?;

        self.load_event(id).await
    }

    async fn delete(&self, id: i32) -> RepoResult<bool> {
        let result = ApplicationEvents::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }

    async fn count_for_product(&self, product_id: i32) -> RepoResult<u64> {
        let count = ApplicationEvents::find()
            .filter(application_events::Column::ProductId.eq(product_id))
            .count(&self.db)
            .await?;

        Ok(count)
    }
}
