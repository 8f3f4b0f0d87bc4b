use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{CatalogError, CatalogResult};
use crate::models::{
    Category, CreateCategory, CreateProductImage, CreateProductItem, ProductImage, ProductItem,
};
use crate::query::{ImageQuery, ProductQuery};

/// Storage for categories, products and their images.
///
/// Deleting a category removes its products; deleting a product removes its
/// images. Slugs arrive already generated and unique-checked by the service,
/// but implementations still reject collisions.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    async fn create_category(
        &self,
        input: CreateCategory,
        slug: String,
        actor: Option<Uuid>,
    ) -> CatalogResult<Category>;

    async fn get_category(&self, id: Uuid) -> CatalogResult<Option<Category>>;

    async fn get_category_by_name(&self, name: &str) -> CatalogResult<Option<Category>>;

    /// Existing category slugs equal to `base` or starting with `base-`
    async fn category_slugs(&self, base: &str) -> CatalogResult<Vec<String>>;

    async fn delete_category(&self, id: Uuid) -> CatalogResult<bool>;

    async fn create_product(
        &self,
        input: CreateProductItem,
        slug: String,
        actor: Option<Uuid>,
    ) -> CatalogResult<ProductItem>;

    async fn get_product(&self, id: Uuid) -> CatalogResult<Option<ProductItem>>;

    /// Existing product slugs equal to `base` or starting with `base-`
    async fn product_slugs(&self, base: &str) -> CatalogResult<Vec<String>>;

    /// Persist a modified product
    async fn save_product(&self, product: ProductItem) -> CatalogResult<ProductItem>;

    async fn delete_product(&self, id: Uuid) -> CatalogResult<bool>;

    /// Products matching the query, ordered by name then id
    async fn list_products(&self, query: ProductQuery) -> CatalogResult<Vec<ProductItem>>;

    async fn add_image(
        &self,
        product_id: Uuid,
        input: CreateProductImage,
        actor: Option<Uuid>,
    ) -> CatalogResult<ProductImage>;

    /// Images matching the query, highest display order first
    async fn list_images(&self, query: ImageQuery) -> CatalogResult<Vec<ProductImage>>;

    /// Null out `created_by`/`updated_by` wherever they point at this user.
    /// Returns the number of references cleared.
    async fn clear_user_references(&self, user_id: Uuid) -> CatalogResult<u64>;
}

fn is_slug_family(slug: &str, base: &str) -> bool {
    slug == base
        || slug
            .strip_prefix(base)
            .is_some_and(|rest| rest.starts_with('-'))
}

#[derive(Debug, Default)]
struct CatalogStore {
    categories: HashMap<Uuid, Category>,
    products: HashMap<Uuid, ProductItem>,
    images: HashMap<Uuid, ProductImage>,
}

impl CatalogStore {
    fn remove_product(&mut self, id: Uuid) -> bool {
        let removed = self.products.remove(&id).is_some();
        if removed {
            self.images.retain(|_, image| image.product_id != id);
        }
        removed
    }
}

/// In-memory implementation of CatalogRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryCatalogRepository {
    store: Arc<RwLock<CatalogStore>>,
}

impl InMemoryCatalogRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CatalogRepository for InMemoryCatalogRepository {
    async fn create_category(
        &self,
        input: CreateCategory,
        slug: String,
        actor: Option<Uuid>,
    ) -> CatalogResult<Category> {
        let mut store = self.store.write().await;

        if store.categories.values().any(|c| c.name == input.name) {
            return Err(CatalogError::DuplicateCategoryName(input.name));
        }
        if store.categories.values().any(|c| c.slug == slug) {
            return Err(CatalogError::DuplicateSlug(slug));
        }

        let category = Category::new(input, slug, actor);
        store.categories.insert(category.id, category.clone());

        tracing::info!(category_id = %category.id, slug = %category.slug, "Created category");
        Ok(category)
    }

    async fn get_category(&self, id: Uuid) -> CatalogResult<Option<Category>> {
        let store = self.store.read().await;
        Ok(store.categories.get(&id).cloned())
    }

    async fn get_category_by_name(&self, name: &str) -> CatalogResult<Option<Category>> {
        let store = self.store.read().await;
        Ok(store.categories.values().find(|c| c.name == name).cloned())
    }

    async fn category_slugs(&self, base: &str) -> CatalogResult<Vec<String>> {
        let store = self.store.read().await;
        Ok(store
            .categories
            .values()
            .filter(|c| is_slug_family(&c.slug, base))
            .map(|c| c.slug.clone())
            .collect())
    }

    async fn delete_category(&self, id: Uuid) -> CatalogResult<bool> {
        let mut store = self.store.write().await;
        if store.categories.remove(&id).is_none() {
            return Ok(false);
        }

        let product_ids: Vec<Uuid> = store
            .products
            .values()
            .filter(|p| p.category_id == id)
            .map(|p| p.id)
            .collect();
        for product_id in &product_ids {
            store.remove_product(*product_id);
        }

        tracing::info!(category_id = %id, products = product_ids.len(), "Deleted category");
        Ok(true)
    }

    async fn create_product(
        &self,
        input: CreateProductItem,
        slug: String,
        actor: Option<Uuid>,
    ) -> CatalogResult<ProductItem> {
        let mut store = self.store.write().await;

        if !store.categories.contains_key(&input.category_id) {
            return Err(CatalogError::CategoryNotFound(input.category_id));
        }
        if store.products.values().any(|p| p.slug == slug) {
            return Err(CatalogError::DuplicateSlug(slug));
        }

        let product = ProductItem::new(input, slug, actor);
        store.products.insert(product.id, product.clone());

        tracing::info!(product_id = %product.id, slug = %product.slug, "Created product");
        Ok(product)
    }

    async fn get_product(&self, id: Uuid) -> CatalogResult<Option<ProductItem>> {
        let store = self.store.read().await;
        Ok(store.products.get(&id).cloned())
    }

    async fn product_slugs(&self, base: &str) -> CatalogResult<Vec<String>> {
        let store = self.store.read().await;
        Ok(store
            .products
            .values()
            .filter(|p| is_slug_family(&p.slug, base))
            .map(|p| p.slug.clone())
            .collect())
    }

    async fn save_product(&self, product: ProductItem) -> CatalogResult<ProductItem> {
        let mut store = self.store.write().await;

        if !store.products.contains_key(&product.id) {
            return Err(CatalogError::ProductNotFound(product.id));
        }
        if !store.categories.contains_key(&product.category_id) {
            return Err(CatalogError::CategoryNotFound(product.category_id));
        }

        store.products.insert(product.id, product.clone());
        tracing::info!(product_id = %product.id, "Updated product");
        Ok(product)
    }

    async fn delete_product(&self, id: Uuid) -> CatalogResult<bool> {
        let mut store = self.store.write().await;
        let removed = store.remove_product(id);
        if removed {
            tracing::info!(product_id = %id, "Deleted product");
        }
        Ok(removed)
    }

    async fn list_products(&self, query: ProductQuery) -> CatalogResult<Vec<ProductItem>> {
        let store = self.store.read().await;

        let mut result: Vec<ProductItem> = store
            .products
            .values()
            .filter(|p| query.matches(p))
            .cloned()
            .collect();
        result.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));

        Ok(result)
    }

    async fn add_image(
        &self,
        product_id: Uuid,
        input: CreateProductImage,
        actor: Option<Uuid>,
    ) -> CatalogResult<ProductImage> {
        let mut store = self.store.write().await;

        if !store.products.contains_key(&product_id) {
            return Err(CatalogError::ProductNotFound(product_id));
        }
        let slot_taken = store
            .images
            .values()
            .any(|i| i.product_id == product_id && i.display_order == input.display_order);
        if slot_taken {
            return Err(CatalogError::DuplicateDisplayOrder {
                product_id,
                display_order: input.display_order,
            });
        }

        let image = ProductImage::new(product_id, input, actor);
        store.images.insert(image.id, image.clone());

        tracing::info!(image_id = %image.id, product_id = %product_id, "Added product image");
        Ok(image)
    }

    async fn list_images(&self, query: ImageQuery) -> CatalogResult<Vec<ProductImage>> {
        let store = self.store.read().await;

        let mut result: Vec<ProductImage> = store
            .images
            .values()
            .filter(|i| query.matches(i))
            .cloned()
            .collect();
        ImageQuery::sort(&mut result);

        Ok(result)
    }

    async fn clear_user_references(&self, user_id: Uuid) -> CatalogResult<u64> {
        let mut store = self.store.write().await;
        let store = &mut *store;

        let cleared = store
            .categories
            .values_mut()
            .map(|c| &mut c.audit)
            .chain(store.products.values_mut().map(|p| &mut p.audit))
            .chain(store.images.values_mut().map(|i| &mut i.audit))
            .map(|audit| audit.forget_user(user_id))
            .sum();

        Ok(cleared)
    }
}
