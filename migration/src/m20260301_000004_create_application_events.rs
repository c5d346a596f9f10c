use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ApplicationEvents::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ApplicationEvents::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ApplicationEvents::LivestockId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ApplicationEvents::ProductId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ApplicationEvents::Quantity)
                            .string_len(64)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ApplicationEvents::Cost)
                            .decimal_len(12, 2)
                            .null(),
                    )
                    .col(ColumnDef::new(ApplicationEvents::Reason).text().null())
                    .col(
                        ColumnDef::new(ApplicationEvents::AppliedOn)
                            .date()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ApplicationEvents::CreatedAt)
                            .timestamp()
                            .not_null()
                            .default(SimpleExpr::Keyword(Keyword::CurrentTimestamp)),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_application_events_livestock")
                            .from(ApplicationEvents::Table, ApplicationEvents::LivestockId)
                            .to(Livestock::Table, Livestock::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_application_events_product")
                            .from(ApplicationEvents::Table, ApplicationEvents::ProductId)
                            .to(Products::Table, Products::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_application_events_livestock")
                    .table(ApplicationEvents::Table)
                    .col(ApplicationEvents::LivestockId)
                    .col(ApplicationEvents::AppliedOn)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ApplicationEvents::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ApplicationEvents {
    Table,
    Id,
    LivestockId,
    ProductId,
    Quantity,
    Cost,
    Reason,
    AppliedOn,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Livestock {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Products {
    Table,
    Id,
}
