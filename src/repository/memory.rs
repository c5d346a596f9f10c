//! In-process repository implementations
//!
//! Selected with `DATABASE_URL=memory://` and used by the test suites.
//! Mirrors the PostgreSQL schema rules: events need an existing animal and
//! product, deleting an animal removes its events, a product with events
//! cannot be deleted and a tag is unique among unsold animals.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;

use super::{
    ApplicationRepository, LivestockRepository, LotRepository, ProductRepository, RepoResult,
};
use crate::error::RepoError;
use crate::models::application::{ApplicationDraft, ApplicationEvent};
use crate::models::livestock::{Livestock, LivestockDraft};
use crate::models::lot::{Lot, LotInput};
use crate::models::product::{Product, ProductInput};

/// Stored event row; the product name is joined on read
#[derive(Debug, Clone)]
struct EventRow {
    id: i32,
    draft: ApplicationDraft,
    created_at: chrono::NaiveDateTime,
}

#[derive(Debug, Default)]
struct State {
    next_id: i32,
    lots: BTreeMap<i32, Lot>,
    products: BTreeMap<i32, Product>,
    livestock: BTreeMap<i32, Livestock>,
    events: BTreeMap<i32, EventRow>,
}

impl State {
    fn next_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }

    fn tag_taken(&self, tag: &str, except_id: Option<i32>) -> bool {
        self.livestock.values().any(|animal| {
            animal.sale.is_none() && animal.tag == tag && Some(animal.id) != except_id
        })
    }

    fn check_event_refs(&self, draft: &ApplicationDraft) -> RepoResult<()> {
        if !self.livestock.contains_key(&draft.livestock_id) {
            return Err(RepoError::Constraint(format!(
                "livestock {} does not exist",
                draft.livestock_id
            )));
        }
        if !self.products.contains_key(&draft.product_id) {
            return Err(RepoError::Constraint(format!(
                "product {} does not exist",
                draft.product_id
            )));
        }
        Ok(())
    }

    fn event_view(&self, row: &EventRow) -> ApplicationEvent {
        let product_name = self
            .products
            .get(&row.draft.product_id)
            .map(|p| p.name.clone())
            .unwrap_or_default();

        ApplicationEvent {
            id: row.id,
            livestock_id: row.draft.livestock_id,
            product_id: row.draft.product_id,
            product_name,
            quantity: row.draft.quantity.clone(),
            cost: row.draft.cost,
            reason: row.draft.reason.clone(),
            applied_on: row.draft.applied_on,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn build_livestock(id: i32, draft: &LivestockDraft, created_at: chrono::NaiveDateTime) -> Livestock {
    Livestock {
        id,
        tag: draft.tag.clone(),
        lot_id: draft.lot_id,
        entry_weight: draft.entry_weight,
        purchase_unit_price: draft.purchase_unit_price,
        purchase_total: draft.purchase_total,
        purchase_date: draft.purchase_date,
        sale: draft.sale.clone(),
        image_url: draft.image_url.clone(),
        created_at,
        updated_at: Utc::now().naive_utc(),
    }
}

#[async_trait]
impl LotRepository for MemoryStore {
    async fn create(&self, input: &LotInput) -> RepoResult<Lot> {
        let mut state = self.state.lock();
        let lot = Lot {
            id: state.next_id(),
            name: input.name.clone(),
            section: input.section.clone(),
            created_at: Utc::now().naive_utc(),
        };
        state.lots.insert(lot.id, lot.clone());
        Ok(lot)
    }

    async fn find_by_id(&self, id: i32) -> RepoResult<Option<Lot>> {
        Ok(self.state.lock().lots.get(&id).cloned())
    }

    async fn list_all(&self) -> RepoResult<Vec<Lot>> {
        Ok(self.state.lock().lots.values().rev().cloned().collect())
    }

    async fn update(&self, id: i32, input: &LotInput) -> RepoResult<Option<Lot>> {
        let mut state = self.state.lock();
        Ok(state.lots.get_mut(&id).map(|lot| {
            lot.name = input.name.clone();
            lot.section = input.section.clone();
            lot.clone()
        }))
    }

    async fn delete(&self, id: i32) -> RepoResult<bool> {
        Ok(self.state.lock().lots.remove(&id).is_some())
    }
}

#[async_trait]
impl ProductRepository for MemoryStore {
    async fn create(&self, input: &ProductInput) -> RepoResult<Product> {
        let mut state = self.state.lock();
        let product = Product {
            id: state.next_id(),
            name: input.name.clone(),
            description: input.description.clone(),
            category: input.category,
            created_at: Utc::now().naive_utc(),
        };
        state.products.insert(product.id, product.clone());
        Ok(product)
    }

    async fn find_by_id(&self, id: i32) -> RepoResult<Option<Product>> {
        Ok(self.state.lock().products.get(&id).cloned())
    }

    async fn list_all(&self) -> RepoResult<Vec<Product>> {
        let mut products: Vec<Product> = self.state.lock().products.values().cloned().collect();
        products.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(products)
    }

    async fn update(&self, id: i32, input: &ProductInput) -> RepoResult<Option<Product>> {
        let mut state = self.state.lock();
        Ok(state.products.get_mut(&id).map(|product| {
            product.name = input.name.clone();
            product.description = input.description.clone();
            product.category = input.category;
            product.clone()
        }))
    }

    async fn delete(&self, id: i32) -> RepoResult<bool> {
        let mut state = self.state.lock();
        if state.events.values().any(|row| row.draft.product_id == id) {
            return Err(RepoError::Constraint(format!(
                "product {} is referenced by application events",
                id
            )));
        }
        Ok(state.products.remove(&id).is_some())
    }
}

#[async_trait]
impl LivestockRepository for MemoryStore {
    async fn create(&self, draft: &LivestockDraft) -> RepoResult<Livestock> {
        let mut state = self.state.lock();
        if draft.sale.is_none() && state.tag_taken(&draft.tag, None) {
            return Err(RepoError::Constraint(format!("tag {} already in use", draft.tag)));
        }

        let id = state.next_id();
        let record = build_livestock(id, draft, Utc::now().naive_utc());
        state.livestock.insert(id, record.clone());
        Ok(record)
    }

    async fn find_by_id(&self, id: i32) -> RepoResult<Option<Livestock>> {
        Ok(self.state.lock().livestock.get(&id).cloned())
    }

    async fn find_active_by_tag(&self, tag: &str) -> RepoResult<Option<Livestock>> {
        let state = self.state.lock();
        Ok(state
            .livestock
            .values()
            .find(|animal| animal.sale.is_none() && animal.tag == tag)
            .cloned())
    }

    async fn list_all(&self) -> RepoResult<Vec<Livestock>> {
        let mut records: Vec<Livestock> = self.state.lock().livestock.values().cloned().collect();
        records.sort_by(|a, b| b.purchase_date.cmp(&a.purchase_date).then(b.id.cmp(&a.id)));
        Ok(records)
    }

    async fn list_by_lot(&self, lot_id: i32) -> RepoResult<Vec<Livestock>> {
        let mut records = LivestockRepository::list_all(self).await?;
        records.retain(|animal| animal.lot_id == Some(lot_id));
        Ok(records)
    }

    async fn update(&self, id: i32, draft: &LivestockDraft) -> RepoResult<Option<Livestock>> {
        let mut state = self.state.lock();
        let Some(created_at) = state.livestock.get(&id).map(|animal| animal.created_at) else {
            return Ok(None);
        };
        if draft.sale.is_none() && state.tag_taken(&draft.tag, Some(id)) {
            return Err(RepoError::Constraint(format!("tag {} already in use", draft.tag)));
        }

        let record = build_livestock(id, draft, created_at);
        state.livestock.insert(id, record.clone());
        Ok(Some(record))
    }

    async fn delete(&self, id: i32) -> RepoResult<bool> {
        let mut state = self.state.lock();
        let removed = state.livestock.remove(&id).is_some();
        if removed {
            state.events.retain(|_, row| row.draft.livestock_id != id);
        }
        Ok(removed)
    }

    async fn count_all(&self) -> RepoResult<u64> {
        Ok(self.state.lock().livestock.len() as u64)
    }

    async fn count_sold(&self) -> RepoResult<u64> {
        let state = self.state.lock();
        Ok(state.livestock.values().filter(|a| a.sale.is_some()).count() as u64)
    }
}

#[async_trait]
impl ApplicationRepository for MemoryStore {
    async fn create(&self, draft: &ApplicationDraft) -> RepoResult<ApplicationEvent> {
        let mut state = self.state.lock();
        state.check_event_refs(draft)?;

        let row = EventRow {
            id: state.next_id(),
            draft: draft.clone(),
            created_at: Utc::now().naive_utc(),
        };
        let event = state.event_view(&row);
        state.events.insert(row.id, row);
        Ok(event)
    }

    async fn find_by_id(&self, id: i32) -> RepoResult<Option<ApplicationEvent>> {
        let state = self.state.lock();
        Ok(state.events.get(&id).map(|row| state.event_view(row)))
    }

    async fn list_for_livestock(&self, livestock_id: i32) -> RepoResult<Vec<ApplicationEvent>> {
        let state = self.state.lock();
        let mut events: Vec<ApplicationEvent> = state
            .events
            .values()
            .filter(|row| row.draft.livestock_id == livestock_id)
            .map(|row| state.event_view(row))
            .collect();
        events.sort_by(|a, b| b.applied_on.cmp(&a.applied_on).then(b.id.cmp(&a.id)));
        Ok(events)
    }

    async fn update(&self, id: i32, draft: &ApplicationDraft) -> RepoResult<Option<ApplicationEvent>> {
        let mut state = self.state.lock();
        if !state.events.contains_key(&id) {
            return Ok(None);
        }
        state.check_event_refs(draft)?;

        let Some(row) = state.events.get_mut(&id) else {
            return Ok(None);
        };
        row.draft = draft.clone();
        let row = row.clone();
        Ok(Some(state.event_view(&row)))
    }

    async fn delete(&self, id: i32) -> RepoResult<bool> {
        Ok(self.state.lock().events.remove(&id).is_some())
    }

    async fn count_for_product(&self, product_id: i32) -> RepoResult<u64> {
        let state = self.state.lock();
        Ok(state
            .events
            .values()
            .filter(|row| row.draft.product_id == product_id)
            .count() as u64)
    }
}
