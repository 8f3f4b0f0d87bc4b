use crate::audit::{drop_touch_trigger_sql, touch_trigger_sql, with_audit_columns};
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let mut table = Table::create();
        table
            .table(ProductItems::Table)
            .if_not_exists()
            .col(pk_uuid(ProductItems::Id))
            .col(uuid(ProductItems::CategoryId))
            .col(string_len(ProductItems::Name, 255))
            .col(string_len(ProductItems::Description, 255).default(""))
            .col(decimal_len_null(ProductItems::OgPrice, 10, 2).default(Expr::cust("0.00")))
            .col(decimal_len_null(ProductItems::Price, 10, 2).default(Expr::cust("0.00")))
            .col(integer(ProductItems::Stock).default(1))
            .col(boolean(ProductItems::IsPublished).default(true))
            .col(boolean(ProductItems::IsNewArrival).default(false))
            .col(boolean(ProductItems::IsFeatured).default(false))
            .col(
                ColumnDef::new(ProductItems::Slug)
                    .string_len(300)
                    .not_null()
                    .unique_key(),
            )
            .foreign_key(
                ForeignKey::create()
                    .name("fk_product_items_category_id")
                    .from(ProductItems::Table, ProductItems::CategoryId)
                    .to(Categories::Table, Categories::Id)
                    .on_delete(ForeignKeyAction::Cascade),
            );
        with_audit_columns(&mut table, "product_items");

        manager.create_table(table.to_owned()).await?;

        manager
            .get_connection()
            .execute_unprepared(
                "ALTER TABLE product_items ADD CONSTRAINT chk_product_items_stock CHECK (stock >= 0)",
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_product_items_category_id")
                    .table(ProductItems::Table)
                    .col(ProductItems::CategoryId)
                    .to_owned(),
            )
            .await?;

        // Every public read filters on the published flag
        manager
            .create_index(
                Index::create()
                    .name("idx_product_items_is_published")
                    .table(ProductItems::Table)
                    .col(ProductItems::IsPublished)
                    .to_owned(),
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(&touch_trigger_sql("product_items"))
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(&drop_touch_trigger_sql("product_items"))
            .await?;

        manager
            .drop_table(Table::drop().table(ProductItems::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum ProductItems {
    Table,
    Id,
    CategoryId,
    Name,
    Description,
    OgPrice,
    Price,
    Stock,
    IsPublished,
    IsNewArrival,
    IsFeatured,
    Slug,
}

#[derive(DeriveIden)]
enum Categories {
    Table,
    Id,
}
