//! Wire representations of products.
//!
//! The read API picks a serializer by action: listings show a single
//! thumbnail per product, detail pages show every image.

use core_config::media::MediaConfig;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;

use crate::models::{ProductImage, ProductItem};
use crate::query::ImageQuery;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProductImageRepr {
    /// Absolute or media-root-relative URL
    #[schema(example = "/media/uploads/product-images/runner-front.jpg")]
    pub image: String,
    pub alt_text: String,
    #[schema(example = 1)]
    pub display_order: i32,
}

impl ProductImageRepr {
    pub fn new(image: &ProductImage, media: &MediaConfig) -> Self {
        Self {
            image: media.url_for(&image.image),
            alt_text: image.alt_text.clone(),
            display_order: image.display_order,
        }
    }
}

/// Product as returned by the read API. The list variant carries at most one image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProductItemRepr {
    #[schema(example = "trail-runner")]
    pub slug: String,
    #[schema(example = "Trail Runner")]
    pub name: String,
    pub description: String,
    pub images: Vec<ProductImageRepr>,
}

/// What the caller is doing with the product collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum ProductAction {
    List,
    Retrieve,
}

impl ProductAction {
    pub fn serializer(self) -> ProductSerializer {
        match self {
            Self::List => ProductSerializer::List,
            Self::Retrieve => ProductSerializer::Detail,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductSerializer {
    /// Thumbnail only: the image in display slot 1, if any
    List,
    /// All images, highest display order first
    Detail,
}

impl ProductSerializer {
    /// Which images this variant shows
    pub fn image_query(self) -> ImageQuery {
        match self {
            Self::List => ImageQuery::all().first_image(),
            Self::Detail => ImageQuery::all(),
        }
    }

    /// `images` may hold images of other products; only this product's are used.
    pub fn serialize(
        self,
        product: &ProductItem,
        images: &[ProductImage],
        media: &MediaConfig,
    ) -> ProductItemRepr {
        let query = self.image_query().for_product(product.id);
        let mut own: Vec<ProductImage> = images
            .iter()
            .filter(|image| query.matches(image))
            .cloned()
            .collect();
        ImageQuery::sort(&mut own);

        ProductItemRepr {
            slug: product.slug.clone(),
            name: product.name.clone(),
            description: product.description.clone(),
            images: own
                .iter()
                .map(|image| ProductImageRepr::new(image, media))
                .collect(),
        }
    }
}
