pub use sea_orm_migration::prelude::*;

mod m20250301_000000_bootstrap;
mod m20250301_000001_create_users;
mod m20250301_000002_create_categories;
mod m20250301_000003_create_product_items;
mod m20250301_000004_create_product_images;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000000_bootstrap::Migration),
            Box::new(m20250301_000001_create_users::Migration),
            Box::new(m20250301_000002_create_categories::Migration),
            Box::new(m20250301_000003_create_product_items::Migration),
            Box::new(m20250301_000004_create_product_images::Migration),
        ]
    }
}

/// Columns shared by every catalog table: timestamps and nullable actor references.
pub(crate) mod audit {
    use sea_orm_migration::{prelude::*, schema::*};

    #[derive(DeriveIden)]
    pub enum Users {
        Table,
        Id,
    }

    #[derive(DeriveIden)]
    pub enum Audit {
        CreatedAt,
        UpdatedAt,
        CreatedBy,
        UpdatedBy,
    }

    /// Append the audit columns and their `ON DELETE SET NULL` foreign keys.
    pub fn with_audit_columns(table: &mut TableCreateStatement, name: &str) {
        table
            .col(timestamp_with_time_zone(Audit::CreatedAt).default(Expr::current_timestamp()))
            .col(timestamp_with_time_zone(Audit::UpdatedAt).default(Expr::current_timestamp()))
            .col(uuid_null(Audit::CreatedBy))
            .col(uuid_null(Audit::UpdatedBy))
            .foreign_key(
                ForeignKey::create()
                    .name(format!("fk_{}_created_by", name))
                    .from(Alias::new(name), Audit::CreatedBy)
                    .to(Users::Table, Users::Id)
                    .on_delete(ForeignKeyAction::SetNull),
            )
            .foreign_key(
                ForeignKey::create()
                    .name(format!("fk_{}_updated_by", name))
                    .from(Alias::new(name), Audit::UpdatedBy)
                    .to(Users::Table, Users::Id)
                    .on_delete(ForeignKeyAction::SetNull),
            );
    }

    /// Row diff with the audit columns removed. Updates that only touch
    /// these (such as `ON DELETE SET NULL` from `users`) keep `updated_at`.
    const CONTENT_DIFF: &str = "(to_jsonb(OLD) - 'updated_at' - 'created_by' - 'updated_by') \
         IS DISTINCT FROM (to_jsonb(NEW) - 'updated_at' - 'created_by' - 'updated_by')";

    /// SQL for the `updated_at` trigger on `table`.
    pub fn touch_trigger_sql(table: &str) -> String {
        format!(
            "CREATE TRIGGER {table}_touch_updated_at \
             BEFORE UPDATE ON {table} \
             FOR EACH ROW WHEN ({CONTENT_DIFF}) \
             EXECUTE FUNCTION util.touch_updated_at()"
        )
    }

    pub fn drop_touch_trigger_sql(table: &str) -> String {
        format!("DROP TRIGGER IF EXISTS {table}_touch_updated_at ON {table}")
    }
}
