use crate::audit::{drop_touch_trigger_sql, touch_trigger_sql, with_audit_columns};
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let mut table = Table::create();
        table
            .table(ProductImages::Table)
            .if_not_exists()
            .col(pk_uuid(ProductImages::Id))
            .col(uuid(ProductImages::ProductId))
            .col(string(ProductImages::Image))
            .col(string_len(ProductImages::AltText, 255).default(""))
            .col(integer(ProductImages::DisplayOrder).default(1))
            .foreign_key(
                ForeignKey::create()
                    .name("fk_product_images_product_id")
                    .from(ProductImages::Table, ProductImages::ProductId)
                    .to(ProductItems::Table, ProductItems::Id)
                    .on_delete(ForeignKeyAction::Cascade),
            );
        with_audit_columns(&mut table, "product_images");

        manager.create_table(table.to_owned()).await?;

        manager
            .get_connection()
            .execute_unprepared(
                "ALTER TABLE product_images ADD CONSTRAINT chk_product_images_display_order CHECK (display_order > 0)",
            )
            .await?;

        // One image per slot per product
        manager
            .create_index(
                Index::create()
                    .name("uq_product_images_product_display_order")
                    .table(ProductImages::Table)
                    .col(ProductImages::ProductId)
                    .col(ProductImages::DisplayOrder)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(&touch_trigger_sql("product_images"))
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(&drop_touch_trigger_sql("product_images"))
            .await?;

        manager
            .drop_table(Table::drop().table(ProductImages::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum ProductImages {
    Table,
    Id,
    ProductId,
    Image,
    AltText,
    DisplayOrder,
}

#[derive(DeriveIden)]
enum ProductItems {
    Table,
    Id,
}
