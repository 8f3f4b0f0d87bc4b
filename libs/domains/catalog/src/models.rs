use domain_accounts::AuditStamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Category used to group products
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Category {
    pub id: Uuid,
    /// Unique across all categories
    pub name: String,
    pub description: String,
    /// Relative path under the media root, e.g. `uploads/category-icons/shoes.svg`
    pub icon: Option<String>,
    pub is_published: bool,
    pub slug: String,
    #[serde(flatten)]
    pub audit: AuditStamp,
}

impl Category {
    pub fn new(input: CreateCategory, slug: String, actor: Option<Uuid>) -> Self {
        Self {
            id: Uuid::now_v7(),
            name: input.name,
            description: input.description,
            icon: input.icon,
            is_published: input.is_published,
            slug,
            audit: AuditStamp::new(actor),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateCategory {
    #[validate(length(min = 1, max = 128))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 255))]
    pub description: String,
    pub icon: Option<String>,
    #[serde(default = "default_true")]
    pub is_published: bool,
}

impl CreateCategory {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            icon: None,
            is_published: true,
        }
    }
}

/// A sellable product. Prices are fixed-point with two fraction digits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductItem {
    pub id: Uuid,
    pub category_id: Uuid,
    pub name: String,
    pub description: String,
    /// Price before any discount
    #[schema(value_type = Option<String>, example = "24.99")]
    pub og_price: Option<Decimal>,
    #[schema(value_type = Option<String>, example = "19.99")]
    pub price: Option<Decimal>,
    pub stock: i32,
    pub is_published: bool,
    pub is_new_arrival: bool,
    pub is_featured: bool,
    pub slug: String,
    #[serde(flatten)]
    pub audit: AuditStamp,
}

impl ProductItem {
    pub fn new(input: CreateProductItem, slug: String, actor: Option<Uuid>) -> Self {
        Self {
            id: Uuid::now_v7(),
            category_id: input.category_id,
            name: input.name,
            description: input.description,
            og_price: input.og_price.map(round_price),
            price: input.price.map(round_price),
            stock: input.stock,
            is_published: input.is_published,
            is_new_arrival: input.is_new_arrival,
            is_featured: input.is_featured,
            slug,
            audit: AuditStamp::new(actor),
        }
    }

    /// Apply a partial update. The slug is kept even when the name changes.
    pub fn apply_update(&mut self, update: UpdateProductItem, actor: Option<Uuid>) {
        if let Some(category_id) = update.category_id {
            self.category_id = category_id;
        }
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(og_price) = update.og_price {
            self.og_price = og_price.map(round_price);
        }
        if let Some(price) = update.price {
            self.price = price.map(round_price);
        }
        if let Some(stock) = update.stock {
            self.stock = stock;
        }
        if let Some(is_published) = update.is_published {
            self.is_published = is_published;
        }
        if let Some(is_new_arrival) = update.is_new_arrival {
            self.is_new_arrival = is_new_arrival;
        }
        if let Some(is_featured) = update.is_featured {
            self.is_featured = is_featured;
        }
        self.audit.touch(actor);
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateProductItem {
    pub category_id: Uuid,
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 255))]
    pub description: String,
    #[serde(default = "default_price")]
    #[validate(custom(function = "validate_price"))]
    #[schema(value_type = Option<String>)]
    pub og_price: Option<Decimal>,
    #[serde(default = "default_price")]
    #[validate(custom(function = "validate_price"))]
    #[schema(value_type = Option<String>)]
    pub price: Option<Decimal>,
    #[serde(default = "default_stock")]
    #[validate(range(min = 0))]
    pub stock: i32,
    #[serde(default = "default_true")]
    pub is_published: bool,
    #[serde(default)]
    pub is_new_arrival: bool,
    #[serde(default)]
    pub is_featured: bool,
}

impl CreateProductItem {
    /// Input with every optional field at its default
    pub fn new(category_id: Uuid, name: impl Into<String>) -> Self {
        Self {
            category_id,
            name: name.into(),
            description: String::new(),
            og_price: default_price(),
            price: default_price(),
            stock: default_stock(),
            is_published: true,
            is_new_arrival: false,
            is_featured: false,
        }
    }
}

/// Partial update. For the prices, `Some(None)` clears the value.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateProductItem {
    pub category_id: Option<Uuid>,
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    #[validate(length(max = 255))]
    pub description: Option<String>,
    #[schema(value_type = Option<String>)]
    pub og_price: Option<Option<Decimal>>,
    #[schema(value_type = Option<String>)]
    pub price: Option<Option<Decimal>>,
    #[validate(range(min = 0))]
    pub stock: Option<i32>,
    pub is_published: Option<bool>,
    pub is_new_arrival: Option<bool>,
    pub is_featured: Option<bool>,
}

impl UpdateProductItem {
    fn prices_valid(&self) -> bool {
        [self.og_price, self.price]
            .into_iter()
            .flatten()
            .flatten()
            .all(|p| price_in_range(&p))
    }
}

/// One image of a product. `(product_id, display_order)` is unique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductImage {
    pub id: Uuid,
    pub product_id: Uuid,
    /// Relative path under the media root, e.g. `uploads/product-images/a.jpg`
    pub image: String,
    pub alt_text: String,
    pub display_order: i32,
    #[serde(flatten)]
    pub audit: AuditStamp,
}

impl ProductImage {
    pub fn new(product_id: Uuid, input: CreateProductImage, actor: Option<Uuid>) -> Self {
        Self {
            id: Uuid::now_v7(),
            product_id,
            image: input.image,
            alt_text: input.alt_text,
            display_order: input.display_order,
            audit: AuditStamp::new(actor),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateProductImage {
    #[validate(length(min = 1))]
    pub image: String,
    #[serde(default)]
    #[validate(length(max = 255))]
    pub alt_text: String,
    #[serde(default = "default_display_order")]
    #[validate(range(min = 1))]
    pub display_order: i32,
}

impl CreateProductImage {
    pub fn new(image: impl Into<String>, display_order: i32) -> Self {
        Self {
            image: image.into(),
            alt_text: String::new(),
            display_order,
        }
    }

    pub fn with_alt_text(mut self, alt_text: impl Into<String>) -> Self {
        self.alt_text = alt_text.into();
        self
    }
}

fn default_true() -> bool {
    true
}

fn default_stock() -> i32 {
    1
}

fn default_display_order() -> i32 {
    1
}

fn default_price() -> Option<Decimal> {
    Some(Decimal::new(0, 2))
}

/// Largest value a NUMERIC(10, 2) column holds
fn max_price() -> Decimal {
    Decimal::new(99_999_999_99, 2)
}

fn price_in_range(price: &Decimal) -> bool {
    !price.is_sign_negative() && *price <= max_price()
}

fn round_price(price: Decimal) -> Decimal {
    price.round_dp(2)
}

fn validate_price(price: &Decimal) -> Result<(), validator::ValidationError> {
    if price_in_range(price) {
        Ok(())
    } else {
        Err(validator::ValidationError::new("price_out_of_range"))
    }
}

/// Validation for partial updates, where prices are doubly optional.
pub(crate) fn validate_update(update: &UpdateProductItem) -> Result<(), String> {
    update.validate().map_err(|e| e.to_string())?;
    if !update.prices_valid() {
        return Err("price must be between 0 and 99999999.99".to_string());
    }
    Ok(())
}
