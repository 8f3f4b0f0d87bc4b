use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::Set;
use serde::{Deserialize, Serialize};

use crate::models::ProductItem;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "product_items")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub category_id: Uuid,
    #[sea_orm(column_type = "String(StringLen::N(255))")]
    pub name: String,
    #[sea_orm(column_type = "String(StringLen::N(255))")]
    pub description: String,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))", nullable)]
    pub og_price: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))", nullable)]
    pub price: Option<Decimal>,
    pub stock: i32,
    pub is_published: bool,
    pub is_new_arrival: bool,
    pub is_featured: bool,
    #[sea_orm(column_type = "String(StringLen::N(300))", unique)]
    pub slug: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    pub created_by: Option<Uuid>,
    pub updated_by: Option<Uuid>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id",
        on_delete = "Cascade"
    )]
    Category,
    /// Reverse side of `product_images.product_id`
    #[sea_orm(has_many = "super::product_image::Entity")]
    Images,
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<super::product_image::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Images.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for ProductItem {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            category_id: model.category_id,
            name: model.name,
            description: model.description,
            og_price: model.og_price,
            price: model.price,
            stock: model.stock,
            is_published: model.is_published,
            is_new_arrival: model.is_new_arrival,
            is_featured: model.is_featured,
            slug: model.slug,
            audit: super::audit_stamp(
                model.created_at,
                model.updated_at,
                model.created_by,
                model.updated_by,
            ),
        }
    }
}

impl From<ProductItem> for ActiveModel {
    fn from(product: ProductItem) -> Self {
        ActiveModel {
            id: Set(product.id),
            category_id: Set(product.category_id),
            name: Set(product.name),
            description: Set(product.description),
            og_price: Set(product.og_price),
            price: Set(product.price),
            stock: Set(product.stock),
            is_published: Set(product.is_published),
            is_new_arrival: Set(product.is_new_arrival),
            is_featured: Set(product.is_featured),
            slug: Set(product.slug),
            created_at: Set(product.audit.created_at.into()),
            updated_at: Set(product.audit.updated_at.into()),
            created_by: Set(product.audit.created_by),
            updated_by: Set(product.audit.updated_by),
        }
    }
}
