//! Sea-ORM entities for the catalog tables

pub mod category;
pub mod product_image;
pub mod product_item;

pub use category::Entity as CategoryEntity;
pub use product_image::Entity as ProductImageEntity;
pub use product_item::Entity as ProductItemEntity;

use domain_accounts::AuditStamp;
use sea_orm::entity::prelude::{DateTimeWithTimeZone, Uuid};

fn audit_stamp(
    created_at: DateTimeWithTimeZone,
    updated_at: DateTimeWithTimeZone,
    created_by: Option<Uuid>,
    updated_by: Option<Uuid>,
) -> AuditStamp {
    AuditStamp {
        created_at: created_at.into(),
        updated_at: updated_at.into(),
        created_by,
        updated_by,
    }
}
