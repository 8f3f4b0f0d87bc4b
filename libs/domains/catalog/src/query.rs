//! Chainable product and image filters.
//!
//! A query is a plain value. Building one never touches storage; a repository
//! evaluates it either in memory ([`ProductQuery::matches`]) or as SQL
//! ([`ProductQuery::to_condition`]). Every step narrows the result (logical AND).
//!
//! ```
//! use domain_catalog::query::ProductQuery;
//!
//! let query = ProductQuery::all().in_stock().new_arrivals();
//! assert_eq!(query.predicates().len(), 4);
//! ```

use sea_orm::{ColumnTrait, Condition};
use uuid::Uuid;

use crate::entity::{product_image, product_item};
use crate::models::{ProductImage, ProductItem};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductPredicate {
    Published(bool),
    StockAbove(i32),
    NewArrival,
    Featured,
    InCategory(Uuid),
    Slug(String),
}

impl ProductPredicate {
    pub fn matches(&self, item: &ProductItem) -> bool {
        match self {
            Self::Published(flag) => item.is_published == *flag,
            Self::StockAbove(min) => item.stock > *min,
            Self::NewArrival => item.is_new_arrival,
            Self::Featured => item.is_featured,
            Self::InCategory(id) => item.category_id == *id,
            Self::Slug(slug) => item.slug == *slug,
        }
    }

    fn to_condition(&self) -> Condition {
        use product_item::Column;

        let expr = match self {
            Self::Published(flag) => Column::IsPublished.eq(*flag),
            Self::StockAbove(min) => Column::Stock.gt(*min),
            Self::NewArrival => Column::IsNewArrival.eq(true),
            Self::Featured => Column::IsFeatured.eq(true),
            Self::InCategory(id) => Column::CategoryId.eq(*id),
            Self::Slug(slug) => Column::Slug.eq(slug.as_str()),
        };
        Condition::all().add(expr)
    }
}

/// Filter over product items
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductQuery {
    predicates: Vec<ProductPredicate>,
}

impl ProductQuery {
    /// Every product, published or not
    pub fn all() -> Self {
        Self::default()
    }

    pub fn filter(mut self, predicate: ProductPredicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    pub fn published(self) -> Self {
        self.filter(ProductPredicate::Published(true))
    }

    pub fn unpublished(self) -> Self {
        self.filter(ProductPredicate::Published(false))
    }

    /// Published with at least one unit left
    pub fn in_stock(self) -> Self {
        self.published().filter(ProductPredicate::StockAbove(0))
    }

    /// Published and flagged as a new arrival
    pub fn new_arrivals(self) -> Self {
        self.published().filter(ProductPredicate::NewArrival)
    }

    /// Published and flagged as featured
    pub fn featured(self) -> Self {
        self.published().filter(ProductPredicate::Featured)
    }

    pub fn in_category(self, category_id: Uuid) -> Self {
        self.filter(ProductPredicate::InCategory(category_id))
    }

    pub fn with_slug(self, slug: impl Into<String>) -> Self {
        self.filter(ProductPredicate::Slug(slug.into()))
    }

    pub fn predicates(&self) -> &[ProductPredicate] {
        &self.predicates
    }

    pub fn matches(&self, item: &ProductItem) -> bool {
        self.predicates.iter().all(|p| p.matches(item))
    }

    pub fn to_condition(&self) -> Condition {
        self.predicates
            .iter()
            .fold(Condition::all(), |cond, p| cond.add(p.to_condition()))
    }
}

/// Filter over product images. Results are always ordered by descending
/// `display_order`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageQuery {
    product_ids: Option<Vec<Uuid>>,
    display_order: Option<i32>,
}

impl ImageQuery {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn for_product(self, product_id: Uuid) -> Self {
        self.for_products(vec![product_id])
    }

    /// Restrict to these products. Chaining twice keeps the intersection.
    pub fn for_products(mut self, product_ids: Vec<Uuid>) -> Self {
        self.product_ids = Some(match self.product_ids.take() {
            Some(existing) => existing
                .into_iter()
                .filter(|id| product_ids.contains(id))
                .collect(),
            None => product_ids,
        });
        self
    }

    /// Only the image in display slot 1, used as a thumbnail.
    pub fn first_image(mut self) -> Self {
        self.display_order = Some(match self.display_order {
            // Two different slots can never both match
            Some(order) if order != 1 => 0,
            _ => 1,
        });
        self
    }

    pub fn matches(&self, image: &ProductImage) -> bool {
        let product_ok = self
            .product_ids
            .as_ref()
            .is_none_or(|ids| ids.contains(&image.product_id));
        let order_ok = self
            .display_order
            .is_none_or(|order| image.display_order == order);
        product_ok && order_ok
    }

    pub fn to_condition(&self) -> Condition {
        use product_image::Column;

        let mut cond = Condition::all();
        if let Some(ids) = &self.product_ids {
            cond = cond.add(Column::ProductId.is_in(ids.iter().copied()));
        }
        if let Some(order) = self.display_order {
            cond = cond.add(Column::DisplayOrder.eq(order));
        }
        cond
    }

    /// True when the query can be answered without asking storage.
    pub fn is_empty_set(&self) -> bool {
        matches!(&self.product_ids, Some(ids) if ids.is_empty())
    }

    /// Sort in the default image order: highest `display_order` first.
    pub fn sort(images: &mut [ProductImage]) {
        images.sort_by(|a, b| {
            b.display_order
                .cmp(&a.display_order)
                .then_with(|| a.id.cmp(&b.id))
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CreateProductImage, CreateProductItem};

    fn product(published: bool, stock: i32, new_arrival: bool) -> ProductItem {
        let mut input = CreateProductItem::new(Uuid::nil(), "p");
        input.is_published = published;
        input.stock = stock;
        input.is_new_arrival = new_arrival;
        ProductItem::new(input, "p".to_string(), None)
    }

    fn image(product_id: Uuid, order: i32) -> ProductImage {
        ProductImage::new(product_id, CreateProductImage::new("a.jpg", order), None)
    }

    #[test]
    fn test_published_and_unpublished() {
        let live = product(true, 1, false);
        let draft = product(false, 1, false);

        assert!(ProductQuery::all().published().matches(&live));
        assert!(!ProductQuery::all().published().matches(&draft));
        assert!(ProductQuery::all().unpublished().matches(&draft));
        assert!(!ProductQuery::all().unpublished().matches(&live));
    }

    #[test]
    fn test_in_stock_excludes_zero_stock_and_drafts() {
        let query = ProductQuery::all().in_stock();

        assert!(query.matches(&product(true, 3, false)));
        assert!(!query.matches(&product(true, 0, false)));
        assert!(!query.matches(&product(false, 3, false)));
    }

    #[test]
    fn test_new_arrivals_requires_flag() {
        let query = ProductQuery::all().new_arrivals();

        assert!(query.matches(&product(true, 1, true)));
        assert!(!query.matches(&product(true, 1, false)));
        assert!(!query.matches(&product(false, 1, true)));
    }

    #[test]
    fn test_chaining_is_intersection() {
        let query = ProductQuery::all().in_stock().new_arrivals();

        assert!(query.matches(&product(true, 2, true)));
        assert!(!query.matches(&product(true, 0, true)));
        assert!(!query.matches(&product(true, 2, false)));

        let nothing = ProductQuery::all().published().unpublished();
        assert!(!nothing.matches(&product(true, 1, false)));
        assert!(!nothing.matches(&product(false, 1, false)));
    }

    #[test]
    fn test_first_image_selects_slot_one() {
        let product_id = Uuid::now_v7();
        let query = ImageQuery::all().for_product(product_id).first_image();

        assert!(query.matches(&image(product_id, 1)));
        assert!(!query.matches(&image(product_id, 3)));
        assert!(!query.matches(&image(Uuid::now_v7(), 1)));
    }

    #[test]
    fn test_for_products_chained_intersects() {
        let a = Uuid::now_v7();
        let b = Uuid::now_v7();
        let query = ImageQuery::all().for_products(vec![a, b]).for_product(b);

        assert!(!query.matches(&image(a, 1)));
        assert!(query.matches(&image(b, 1)));
        assert!(ImageQuery::all().for_products(vec![]).is_empty_set());
    }

    #[test]
    fn test_sort_is_descending_display_order() {
        let product_id = Uuid::now_v7();
        let mut images = vec![image(product_id, 1), image(product_id, 3), image(product_id, 2)];

        ImageQuery::sort(&mut images);

        let orders: Vec<i32> = images.iter().map(|i| i.display_order).collect();
        assert_eq!(orders, vec![3, 2, 1]);
    }

    #[test]
    fn test_condition_renders_every_predicate() {
        use sea_orm::{DbBackend, EntityTrait, QueryFilter, QueryTrait};

        let sql = product_item::Entity::find()
            .filter(ProductQuery::all().in_stock().with_slug("runner").to_condition())
            .build(DbBackend::Postgres)
            .to_string();

        assert!(sql.contains(r#""product_items"."is_published""#));
        assert!(sql.contains(r#""product_items"."stock" > 0"#));
        assert!(sql.contains(r#""product_items"."slug" = 'runner'"#));
    }
}
