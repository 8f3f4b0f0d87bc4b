use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::Set;
use serde::{Deserialize, Serialize};

use crate::models::ProductImage;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "product_images")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub product_id: Uuid,
    pub image: String,
    #[sea_orm(column_type = "String(StringLen::N(255))")]
    pub alt_text: String,
    pub display_order: i32,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    pub created_by: Option<Uuid>,
    pub updated_by: Option<Uuid>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::product_item::Entity",
        from = "Column::ProductId",
        to = "super::product_item::Column::Id",
        on_delete = "Cascade"
    )]
    Product,
}

impl Related<super::product_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for ProductImage {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            product_id: model.product_id,
            image: model.image,
            alt_text: model.alt_text,
            display_order: model.display_order,
            audit: super::audit_stamp(
                model.created_at,
                model.updated_at,
                model.created_by,
                model.updated_by,
            ),
        }
    }
}

impl From<ProductImage> for ActiveModel {
    fn from(image: ProductImage) -> Self {
        ActiveModel {
            id: Set(image.id),
            product_id: Set(image.product_id),
            image: Set(image.image),
            alt_text: Set(image.alt_text),
            display_order: Set(image.display_order),
            created_at: Set(image.audit.created_at.into()),
            updated_at: Set(image.audit.updated_at.into()),
            created_by: Set(image.audit.created_by),
            updated_by: Set(image.audit.updated_by),
        }
    }
}
