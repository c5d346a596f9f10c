pub use sea_orm_migration::prelude::*;

mod m20260301_000001_create_lots;
mod m20260301_000002_create_products;
mod m20260301_000003_create_livestock;
mod m20260301_000004_create_application_events;
mod m20260301_000005_create_application_events_view;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260301_000001_create_lots::Migration),
            Box::new(m20260301_000002_create_products::Migration),
            Box::new(m20260301_000003_create_livestock::Migration),
            Box::new(m20260301_000004_create_application_events::Migration),
            Box::new(m20260301_000005_create_application_events_view::Migration),
        ]
    }
}
