use async_trait::async_trait;
use database::postgres::{is_unique_violation, unique_violation_constraint};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect,
};
use uuid::Uuid;

use crate::entity::{category, product_image, product_item};
use crate::error::{CatalogError, CatalogResult};
use crate::models::{
    Category, CreateCategory, CreateProductImage, CreateProductItem, ProductImage, ProductItem,
};
use crate::query::{ImageQuery, ProductQuery};
use crate::repository::CatalogRepository;

/// PostgreSQL implementation of CatalogRepository.
///
/// Cascades and `ON DELETE SET NULL` on the audit columns live in the schema's
/// foreign keys; `clear_user_references` is for callers that detach a user
/// without deleting the row.
#[derive(Clone)]
pub struct PgCatalogRepository {
    db: DatabaseConnection,
}

impl PgCatalogRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// `slug = base OR slug LIKE 'base-%'`, with LIKE wildcards in `base` escaped
fn slug_family<C: ColumnTrait>(column: C, base: &str) -> Condition {
    let escaped = base
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    Condition::any()
        .add(column.eq(base))
        .add(column.like(format!("{}-%", escaped)))
}

/// Postgres' name for the column-level `UNIQUE` on `categories.slug`
const CATEGORY_SLUG_CONSTRAINT: &str = "categories_slug_key";

/// Both the name and the slug of a category are unique; tell them apart.
fn category_conflict(err: DbErr, name: String, slug: String) -> CatalogError {
    match unique_violation_constraint(&err) {
        Some(constraint) if constraint.contains(CATEGORY_SLUG_CONSTRAINT) => {
            CatalogError::DuplicateSlug(slug)
        }
        Some(_) => CatalogError::DuplicateCategoryName(name),
        None => CatalogError::database(err),
    }
}

fn on_unique_violation(err: DbErr, conflict: impl FnOnce() -> CatalogError) -> CatalogError {
    if is_unique_violation(&err) {
        conflict()
    } else {
        CatalogError::database(err)
    }
}

#[async_trait]
impl CatalogRepository for PgCatalogRepository {
    async fn create_category(
        &self,
        input: CreateCategory,
        slug: String,
        actor: Option<Uuid>,
    ) -> CatalogResult<Category> {
        let name = input.name.clone();
        let taken_slug = slug.clone();
        let active_model: category::ActiveModel = Category::new(input, slug, actor).into();

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(|e| category_conflict(e, name, taken_slug))?;

        tracing::info!(category_id = %model.id, slug = %model.slug, "Created category");
        Ok(model.into())
    }

    async fn get_category(&self, id: Uuid) -> CatalogResult<Option<Category>> {
        let model = category::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(CatalogError::database)?;
        Ok(model.map(Into::into))
    }

    async fn get_category_by_name(&self, name: &str) -> CatalogResult<Option<Category>> {
        let model = category::Entity::find()
            .filter(category::Column::Name.eq(name))
            .one(&self.db)
            .await
            .map_err(CatalogError::database)?;
        Ok(model.map(Into::into))
    }

    async fn category_slugs(&self, base: &str) -> CatalogResult<Vec<String>> {
        category::Entity::find()
            .select_only()
            .column(category::Column::Slug)
            .filter(slug_family(category::Column::Slug, base))
            .into_tuple::<String>()
            .all(&self.db)
            .await
            .map_err(CatalogError::database)
    }

    async fn delete_category(&self, id: Uuid) -> CatalogResult<bool> {
        let result = category::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(CatalogError::database)?;

        if result.rows_affected > 0 {
            tracing::info!(category_id = %id, "Deleted category");
        }
        Ok(result.rows_affected > 0)
    }

    async fn create_product(
        &self,
        input: CreateProductItem,
        slug: String,
        actor: Option<Uuid>,
    ) -> CatalogResult<ProductItem> {
        let category_id = input.category_id;
        if self.get_category(category_id).await?.is_none() {
            return Err(CatalogError::CategoryNotFound(category_id));
        }

        let product = ProductItem::new(input, slug, actor);
        let slug = product.slug.clone();
        let active_model: product_item::ActiveModel = product.into();

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(|e| on_unique_violation(e, || CatalogError::DuplicateSlug(slug)))?;

        tracing::info!(product_id = %model.id, slug = %model.slug, "Created product");
        Ok(model.into())
    }

    async fn get_product(&self, id: Uuid) -> CatalogResult<Option<ProductItem>> {
        let model = product_item::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(CatalogError::database)?;
        Ok(model.map(Into::into))
    }

    async fn product_slugs(&self, base: &str) -> CatalogResult<Vec<String>> {
        product_item::Entity::find()
            .select_only()
            .column(product_item::Column::Slug)
            .filter(slug_family(product_item::Column::Slug, base))
            .into_tuple::<String>()
            .all(&self.db)
            .await
            .map_err(CatalogError::database)
    }

    async fn save_product(&self, product: ProductItem) -> CatalogResult<ProductItem> {
        let id = product.id;
        if self.get_category(product.category_id).await?.is_none() {
            return Err(CatalogError::CategoryNotFound(product.category_id));
        }

        let active_model: product_item::ActiveModel = product.into();
        let model = active_model.update(&self.db).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => CatalogError::ProductNotFound(id),
            other => CatalogError::database(other),
        })?;

        tracing::info!(product_id = %id, "Updated product");
        Ok(model.into())
    }

    async fn delete_product(&self, id: Uuid) -> CatalogResult<bool> {
        let result = product_item::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(CatalogError::database)?;

        if result.rows_affected > 0 {
            tracing::info!(product_id = %id, "Deleted product");
        }
        Ok(result.rows_affected > 0)
    }

    async fn list_products(&self, query: ProductQuery) -> CatalogResult<Vec<ProductItem>> {
        let models = product_item::Entity::find()
            .filter(query.to_condition())
            .order_by_asc(product_item::Column::Name)
            .order_by_asc(product_item::Column::Id)
            .all(&self.db)
            .await
            .map_err(CatalogError::database)?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn add_image(
        &self,
        product_id: Uuid,
        input: CreateProductImage,
        actor: Option<Uuid>,
    ) -> CatalogResult<ProductImage> {
        if self.get_product(product_id).await?.is_none() {
            return Err(CatalogError::ProductNotFound(product_id));
        }

        let display_order = input.display_order;
        let active_model: product_image::ActiveModel =
            ProductImage::new(product_id, input, actor).into();

        let model = active_model.insert(&self.db).await.map_err(|e| {
            on_unique_violation(e, || CatalogError::DuplicateDisplayOrder {
                product_id,
                display_order,
            })
        })?;

        tracing::info!(image_id = %model.id, product_id = %product_id, "Added product image");
        Ok(model.into())
    }

    async fn list_images(&self, query: ImageQuery) -> CatalogResult<Vec<ProductImage>> {
        if query.is_empty_set() {
            return Ok(Vec::new());
        }

        let models = product_image::Entity::find()
            .filter(query.to_condition())
            .order_by_desc(product_image::Column::DisplayOrder)
            .order_by_asc(product_image::Column::Id)
            .all(&self.db)
            .await
            .map_err(CatalogError::database)?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn clear_user_references(&self, user_id: Uuid) -> CatalogResult<u64> {
        let mut cleared = 0;

        macro_rules! clear {
            ($entity:ident, $column:ident) => {
                cleared += $entity::Entity::update_many()
                    .col_expr($entity::Column::$column, Expr::value(Option::<Uuid>::None))
                    .filter($entity::Column::$column.eq(user_id))
                    .exec(&self.db)
                    .await
                    .map_err(CatalogError::database)?
                    .rows_affected;
            };
        }

        clear!(category, CreatedBy);
        clear!(category, UpdatedBy);
        clear!(product_item, CreatedBy);
        clear!(product_item, UpdatedBy);
        clear!(product_image, CreatedBy);
        clear!(product_image, UpdatedBy);

        tracing::info!(user_id = %user_id, rows = cleared, "Cleared audit references");
        Ok(cleared)
    }
}
