use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Events read back with the product's current name
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE OR REPLACE VIEW application_events_view AS
                SELECT
                    e.id,
                    e.livestock_id,
                    e.product_id,
                    p.name AS product_name,
                    e.quantity,
                    e.cost,
                    e.reason,
                    e.applied_on,
                    e.created_at
                FROM application_events e
                JOIN products p ON p.id = e.product_id;
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("DROP VIEW IF EXISTS application_events_view")
            .await?;

        Ok(())
    }
}
