use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // No foreign key on lot_id: deleting a lot leaves its animals in place.
        manager
            .create_table(
                Table::create()
                    .table(Livestock::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Livestock::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Livestock::Tag).string_len(64).not_null())
                    .col(ColumnDef::new(Livestock::LotId).integer().null())
                    .col(
                        ColumnDef::new(Livestock::EntryWeight)
                            .decimal_len(12, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Livestock::PurchaseUnitPrice)
                            .decimal_len(12, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Livestock::PurchaseTotal)
                            .decimal_len(16, 2)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Livestock::PurchaseDate).date().not_null())
                    .col(ColumnDef::new(Livestock::ExitWeight).decimal_len(12, 2).null())
                    .col(
                        ColumnDef::new(Livestock::SaleUnitPrice)
                            .decimal_len(12, 2)
                            .null(),
                    )
                    .col(ColumnDef::new(Livestock::SaleTotal).decimal_len(16, 2).null())
                    .col(ColumnDef::new(Livestock::SaleDate).date().null())
                    .col(ColumnDef::new(Livestock::ImageUrl).text().null())
                    .col(
                        ColumnDef::new(Livestock::CreatedAt)
                            .timestamp()
                            .not_null()
                            .default(SimpleExpr::Keyword(Keyword::CurrentTimestamp)),
                    )
                    .col(
                        ColumnDef::new(Livestock::UpdatedAt)
                            .timestamp()
                            .not_null()
                            .default(SimpleExpr::Keyword(Keyword::CurrentTimestamp)),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_livestock_lot_id")
                    .table(Livestock::Table)
                    .col(Livestock::LotId)
                    .to_owned(),
            )
            .await?;

        // A tag identifies at most one animal that is still on the ranch.
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE UNIQUE INDEX IF NOT EXISTS idx_livestock_active_tag
                ON livestock (tag)
                WHERE sale_date IS NULL;
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Livestock::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Livestock {
    Table,
    Id,
    Tag,
    LotId,
    EntryWeight,
    PurchaseUnitPrice,
    PurchaseTotal,
    PurchaseDate,
    ExitWeight,
    SaleUnitPrice,
    SaleTotal,
    SaleDate,
    ImageUrl,
    CreatedAt,
    UpdatedAt,
}
