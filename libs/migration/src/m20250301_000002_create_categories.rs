use crate::audit::{drop_touch_trigger_sql, touch_trigger_sql, with_audit_columns};
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let mut table = Table::create();
        table
            .table(Categories::Table)
            .if_not_exists()
            .col(pk_uuid(Categories::Id))
            .col(
                ColumnDef::new(Categories::Name)
                    .string_len(128)
                    .not_null()
                    .unique_key(),
            )
            .col(string_len(Categories::Description, 255).default(""))
            .col(string_null(Categories::Icon))
            .col(boolean(Categories::IsPublished).default(true))
            .col(
                ColumnDef::new(Categories::Slug)
                    .string_len(150)
                    .not_null()
                    .unique_key(),
            );
        with_audit_columns(&mut table, "categories");

        manager.create_table(table.to_owned()).await?;

        manager
            .get_connection()
            .execute_unprepared(&touch_trigger_sql("categories"))
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(&drop_touch_trigger_sql("categories"))
            .await?;

        manager
            .drop_table(Table::drop().table(Categories::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Categories {
    Table,
    Id,
    Name,
    Description,
    Icon,
    IsPublished,
    Slug,
}
