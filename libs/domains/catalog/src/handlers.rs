use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use axum_helpers::errors::responses::{InternalServerErrorResponse, NotFoundResponse};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::CatalogResult;
use crate::repository::CatalogRepository;
use crate::serializers::{ProductAction, ProductImageRepr, ProductItemRepr};
use crate::service::CatalogService;

pub const TAG: &str = "products";

/// OpenAPI documentation for the read-only product API
#[derive(OpenApi)]
#[openapi(
    paths(list_products, retrieve_product),
    components(
        schemas(ProductItemRepr, ProductImageRepr),
        responses(NotFoundResponse, InternalServerErrorResponse)
    ),
    tags(
        (name = TAG, description = "Published products, looked up by slug")
    )
)]
pub struct ApiDoc;

/// Read-only product routes. Both paths answer with and without a trailing slash.
pub fn router<R: CatalogRepository + 'static>(service: CatalogService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/products", get(list_products::<R>))
        .route("/products/", get(list_products::<R>))
        .route("/products/{slug}", get(retrieve_product::<R>))
        .route("/products/{slug}/", get(retrieve_product::<R>))
        .with_state(shared_service)
}

/// List published products with a single thumbnail each
#[utoipa::path(
    get,
    path = "/products/",
    tag = TAG,
    responses(
        (status = 200, description = "Published products", body = Vec<ProductItemRepr>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<R: CatalogRepository>(
    State(service): State<Arc<CatalogService<R>>>,
) -> CatalogResult<Json<Vec<ProductItemRepr>>> {
    let products = service.list_published_products(ProductAction::List).await?;
    Ok(Json(products))
}

/// Get a published product with all of its images
#[utoipa::path(
    get,
    path = "/products/{slug}/",
    tag = TAG,
    params(
        ("slug" = String, Path, description = "Product slug")
    ),
    responses(
        (status = 200, description = "Product found", body = ProductItemRepr),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn retrieve_product<R: CatalogRepository>(
    State(service): State<Arc<CatalogService<R>>>,
    Path(slug): Path<String>,
) -> CatalogResult<Json<ProductItemRepr>> {
    let product = service.retrieve_published_product(&slug).await?;
    Ok(Json(product))
}
