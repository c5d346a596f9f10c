//! Repository traits for data access
//!
//! One trait per entity. `SeaOrmStore` backs them with PostgreSQL and
//! `MemoryStore` keeps everything in process.

use async_trait::async_trait;

use crate::error::RepoError;
use crate::models::application::{ApplicationDraft, ApplicationEvent};
use crate::models::livestock::{Livestock, LivestockDraft};
use crate::models::lot::{Lot, LotInput};
use crate::models::product::{Product, ProductInput};

pub mod memory;
pub mod sea_orm_store;

pub use self::memory::MemoryStore;
pub use self::sea_orm_store::SeaOrmStore;

pub type RepoResult<T> = Result<T, RepoError>;

#[async_trait]
pub trait LotRepository: Send + Sync {
    async fn create(&self, input: &LotInput) -> RepoResult<Lot>;

    async fn find_by_id(&self, id: i32) -> RepoResult<Option<Lot>>;

    /// Newest first
    async fn list_all(&self) -> RepoResult<Vec<Lot>>;

    /// Returns None when the lot does not exist
    async fn update(&self, id: i32, input: &LotInput) -> RepoResult<Option<Lot>>;

    /// Returns false when nothing was deleted
    async fn delete(&self, id: i32) -> RepoResult<bool>;
}

#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn create(&self, input: &ProductInput) -> RepoResult<Product>;

    async fn find_by_id(&self, id: i32) -> RepoResult<Option<Product>>;

    /// Ordered by name
    async fn list_all(&self) -> RepoResult<Vec<Product>>;

    async fn update(&self, id: i32, input: &ProductInput) -> RepoResult<Option<Product>>;

    /// Fails with `RepoError::Constraint` while events still reference the product
    async fn delete(&self, id: i32) -> RepoResult<bool>;
}

#[async_trait]
pub trait LivestockRepository: Send + Sync {
    async fn create(&self, draft: &LivestockDraft) -> RepoResult<Livestock>;

    async fn find_by_id(&self, id: i32) -> RepoResult<Option<Livestock>>;

    /// The unsold animal carrying `tag`, if any
    async fn find_active_by_tag(&self, tag: &str) -> RepoResult<Option<Livestock>>;

    /// Most recent purchase first
    async fn list_all(&self) -> RepoResult<Vec<Livestock>>;

    async fn list_by_lot(&self, lot_id: i32) -> RepoResult<Vec<Livestock>>;

    async fn update(&self, id: i32, draft: &LivestockDraft) -> RepoResult<Option<Livestock>>;

    /// Hard delete; the animal's application events go with it
    async fn delete(&self, id: i32) -> RepoResult<bool>;

    async fn count_all(&self) -> RepoResult<u64>;

    async fn count_sold(&self) -> RepoResult<u64>;
}

#[async_trait]
pub trait ApplicationRepository: Send + Sync {
    async fn create(&self, draft: &ApplicationDraft) -> RepoResult<ApplicationEvent>;

    async fn find_by_id(&self, id: i32) -> RepoResult<Option<ApplicationEvent>>;

    /// Most recent application first
    async fn list_for_livestock(&self, livestock_id: i32) -> RepoResult<Vec<ApplicationEvent>>;

    async fn update(&self, id: i32, draft: &ApplicationDraft) -> RepoResult<Option<ApplicationEvent>>;

    async fn delete(&self, id: i32) -> RepoResult<bool>;

    async fn count_for_product(&self, product_id: i32) -> RepoResult<u64>;
}
