use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::Set;
use serde::{Deserialize, Serialize};

use crate::models::Category;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "categories")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(column_type = "String(StringLen::N(128))", unique)]
    pub name: String,
    #[sea_orm(column_type = "String(StringLen::N(255))")]
    pub description: String,
    #[sea_orm(nullable)]
    pub icon: Option<String>,
    pub is_published: bool,
    #[sea_orm(column_type = "String(StringLen::N(150))", unique)]
    pub slug: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    pub created_by: Option<Uuid>,
    pub updated_by: Option<Uuid>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::product_item::Entity")]
    Products,
}

impl Related<super::product_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Products.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Category {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            icon: model.icon,
            is_published: model.is_published,
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

impl From<Category> for ActiveModel {
    fn from(category: Category) -> Self {
        ActiveModel {
            id: Set(category.id),
            name: Set(category.name),
            description: Set(category.description),
            icon: Set(category.icon),
            is_published: Set(category.is_published),
            slug: Set(category.slug),
            created_at: Set(category.audit.created_at.into()),
            updated_at: Set(category.audit.updated_at.into()),
            created_by: Set(category.audit.created_by),
            updated_by: Set(category.audit.updated_by),
        }
    }
}
