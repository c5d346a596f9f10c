// src/lib.rs

use std::sync::Arc;

use axum::{routing::get, routing::post, Router};
use chrono::{FixedOffset, NaiveDate, Utc};
use sea_orm::DatabaseConnection;
use tower_http::trace::TraceLayer;

use repository::{
    ApplicationRepository, LivestockRepository, LotRepository, MemoryStore, ProductRepository, SeaOrmStore,
};

#[derive(Clone)]
pub struct AppState {
    pub lots: Arc<dyn LotRepository>,
    pub products: Arc<dyn ProductRepository>,
    pub livestock: Arc<dyn LivestockRepository>,
    pub applications: Arc<dyn ApplicationRepository>,
    /// Ranch local offset, used for "today"
    pub timezone: FixedOffset,
}

impl AppState {
    /// One store serving every repository
    pub fn with_store<S>(store: Arc<S>, timezone: FixedOffset) -> Self
    where
        S: LotRepository + ProductRepository + LivestockRepository + ApplicationRepository + 'static,
    {
        Self {
            lots: store.clone(),
            products: store.clone(),
            livestock: store.clone(),
            applications: store,
            timezone,
        }
    }

    pub fn sea_orm(db: DatabaseConnection, timezone: FixedOffset) -> Self {
        Self::with_store(Arc::new(SeaOrmStore::new(db)), timezone)
    }

    /// Empty in-process store at the default ranch offset
    pub fn in_memory() -> Self {
        Self::in_memory_with_timezone(config::offset_from_hours(config::DEFAULT_UTC_OFFSET_HOURS))
    }

    pub fn in_memory_with_timezone(timezone: FixedOffset) -> Self {
        Self::with_store(Arc::new(MemoryStore::new()), timezone)
    }

    /// Current calendar date at the ranch
    pub fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.timezone).date_naive()
    }
}

pub mod entities {
    pub mod prelude;
    pub mod lots;
    pub mod products;
    pub mod livestock;
    pub mod application_events;
    pub mod application_events_view;
}

pub mod services {
    pub mod ledger;
    pub mod validation;
    pub mod lots;
    pub mod products;
    pub mod livestock;
    pub mod applications;
    pub mod bulk_application;
    pub mod dashboard;
}

pub mod handlers {
    pub mod error;
    pub mod dashboard;
    pub mod lots;
    pub mod products;
    pub mod livestock;
    pub mod applications;
}

pub mod config;
pub mod error;
pub mod models;
pub mod repository;

async fn hello_ranch() -> &'static str {
    "Hello from Ranch Ledger!"
}

/// Every route of the HTTP API
pub fn build_router(state: AppState) -> Router {
    use handlers::{applications, dashboard, livestock, lots, products};

    Router::new()
        .route("/", get(hello_ranch))
        .route("/api/dashboard", get(dashboard::get_dashboard))
        .route("/api/lots", get(lots::list_lots).post(lots::create_lot))
        .route(
            "/api/lots/{id}",
            get(lots::get_lot).put(lots::update_lot).delete(lots::delete_lot),
        )
        .route("/api/products", get(products::list_products).post(products::create_product))
        .route(
            "/api/products/{id}",
            get(products::get_product)
                .put(products::update_product)
                .delete(products::delete_product),
        )
        .route("/api/livestock", get(livestock::list_livestock).post(livestock::create_livestock))
        .route(
            "/api/livestock/{id}",
            get(livestock::get_livestock)
                .put(livestock::update_livestock)
                .delete(livestock::delete_livestock),
        )
        .route("/api/livestock/{id}/sell", post(livestock::sell_livestock))
        .route(
            "/api/livestock/{id}/applications",
            get(applications::list_applications).post(applications::log_application),
        )
        .route("/api/applications/bulk", post(applications::apply_bulk))
        .route(
            "/api/applications/{id}",
            get(applications::get_application)
                .put(applications::update_application)
                .delete(applications::delete_application),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
