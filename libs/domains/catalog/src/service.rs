use core_config::media::MediaConfig;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{CatalogError, CatalogResult};
use crate::models::{
    validate_update, Category, CreateCategory, CreateProductImage, CreateProductItem,
    ProductImage, ProductItem, UpdateProductItem,
};
use crate::query::ProductQuery;
use crate::repository::CatalogRepository;
use crate::serializers::{ProductAction, ProductItemRepr};
use crate::slug::{slugify, unique_slug};

/// Service layer for the catalog: write rules for internal callers and the
/// read path behind the public product API.
#[derive(Clone)]
pub struct CatalogService<R: CatalogRepository> {
    repository: Arc<R>,
    media: MediaConfig,
}

impl<R: CatalogRepository> CatalogService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
            media: MediaConfig::default(),
        }
    }

    /// Resolve image paths against this media root instead of `/media/`
    pub fn with_media(mut self, media: MediaConfig) -> Self {
        self.media = media;
        self
    }

    pub fn media(&self) -> &MediaConfig {
        &self.media
    }

    #[instrument(skip(self, input), fields(category_name = %input.name))]
    pub async fn create_category(
        &self,
        input: CreateCategory,
        actor: Option<Uuid>,
    ) -> CatalogResult<Category> {
        input
            .validate()
            .map_err(|e| CatalogError::Validation(e.to_string()))?;

        if self
            .repository
            .get_category_by_name(&input.name)
            .await?
            .is_some()
        {
            return Err(CatalogError::DuplicateCategoryName(input.name));
        }

        let base = slugify(&input.name);
        let taken = self.repository.category_slugs(&base).await?;
        let slug = unique_slug(&base, taken.iter().map(String::as_str));

        self.repository.create_category(input, slug, actor).await
    }

    pub async fn find_category_by_name(&self, name: &str) -> CatalogResult<Option<Category>> {
        self.repository.get_category_by_name(name).await
    }

    #[instrument(skip(self), fields(category_id = %id))]
    pub async fn delete_category(&self, id: Uuid) -> CatalogResult<()> {
        if !self.repository.delete_category(id).await? {
            return Err(CatalogError::CategoryNotFound(id));
        }
        Ok(())
    }

    #[instrument(skip(self, input), fields(product_name = %input.name))]
    pub async fn create_product(
        &self,
        input: CreateProductItem,
        actor: Option<Uuid>,
    ) -> CatalogResult<ProductItem> {
        input
            .validate()
            .map_err(|e| CatalogError::Validation(e.to_string()))?;

        if self
            .repository
            .get_category(input.category_id)
            .await?
            .is_none()
        {
            return Err(CatalogError::CategoryNotFound(input.category_id));
        }

        let base = slugify(&input.name);
        let taken = self.repository.product_slugs(&base).await?;
        let slug = unique_slug(&base, taken.iter().map(String::as_str));

        self.repository.create_product(input, slug, actor).await
    }

    pub async fn get_product(&self, id: Uuid) -> CatalogResult<ProductItem> {
        self.repository
            .get_product(id)
            .await?
            .ok_or(CatalogError::ProductNotFound(id))
    }

    /// Partial update; the slug never changes.
    #[instrument(skip(self, input), fields(product_id = %id))]
    pub async fn update_product(
        &self,
        id: Uuid,
        input: UpdateProductItem,
        actor: Option<Uuid>,
    ) -> CatalogResult<ProductItem> {
        validate_update(&input).map_err(CatalogError::Validation)?;

        if let Some(category_id) = input.category_id {
            if self.repository.get_category(category_id).await?.is_none() {
                return Err(CatalogError::CategoryNotFound(category_id));
            }
        }

        let mut product = self.get_product(id).await?;
        product.apply_update(input, actor);
        self.repository.save_product(product).await
    }

    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn delete_product(&self, id: Uuid) -> CatalogResult<()> {
        if !self.repository.delete_product(id).await? {
            return Err(CatalogError::ProductNotFound(id));
        }
        Ok(())
    }

    #[instrument(skip(self, input), fields(product_id = %product_id, display_order = input.display_order))]
    pub async fn add_product_image(
        &self,
        product_id: Uuid,
        input: CreateProductImage,
        actor: Option<Uuid>,
    ) -> CatalogResult<ProductImage> {
        input
            .validate()
            .map_err(|e| CatalogError::Validation(e.to_string()))?;

        self.repository.add_image(product_id, input, actor).await
    }

    /// Evaluate any product query, e.g. `ProductQuery::all().in_stock()`
    pub async fn products(&self, query: ProductQuery) -> CatalogResult<Vec<ProductItem>> {
        self.repository.list_products(query).await
    }

    /// Every published product, shaped by the serializer the action selects.
    #[instrument(skip(self))]
    pub async fn list_published_products(
        &self,
        action: ProductAction,
    ) -> CatalogResult<Vec<ProductItemRepr>> {
        let products = self
            .repository
            .list_products(ProductQuery::all().published())
            .await?;
        self.represent(&products, action).await
    }

    /// Detail view of a published product. Drafts are reported as missing.
    #[instrument(skip(self))]
    pub async fn retrieve_published_product(&self, slug: &str) -> CatalogResult<ProductItemRepr> {
        let products = self
            .repository
            .list_products(ProductQuery::all().published().with_slug(slug))
            .await?;

        let mut reprs = self.represent(&products, ProductAction::Retrieve).await?;
        if reprs.is_empty() {
            return Err(CatalogError::SlugNotFound(slug.to_string()));
        }
        Ok(reprs.swap_remove(0))
    }

    /// Serialize products with one image query for the whole batch.
    pub async fn represent(
        &self,
        products: &[ProductItem],
        action: ProductAction,
    ) -> CatalogResult<Vec<ProductItemRepr>> {
        if products.is_empty() {
            return Ok(Vec::new());
        }

        let serializer = action.serializer();
        let ids = products.iter().map(|p| p.id).collect();
        let images = self
            .repository
            .list_images(serializer.image_query().for_products(ids))
            .await?;

        let mut by_product: HashMap<Uuid, Vec<ProductImage>> = HashMap::new();
        for image in images {
            by_product.entry(image.product_id).or_default().push(image);
        }

        Ok(products
            .iter()
            .map(|product| {
                let images = by_product
                    .get(&product.id)
                    .map(Vec::as_slice)
                    .unwrap_or_default();
                serializer.serialize(product, images, &self.media)
            })
            .collect())
    }

    /// Clear audit references to a user who is being deleted
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn forget_user(&self, user_id: Uuid) -> CatalogResult<u64> {
        self.repository.clear_user_references(user_id).await
    }
}
