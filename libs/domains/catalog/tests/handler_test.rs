//! Handler tests for the read-only product API
//!
//! These drive the catalog router directly with `oneshot`, backed by the
//! in-memory repository:
//! - list vs detail response shape
//! - unpublished products stay hidden
//! - 404 body for unknown slugs
//! - trailing-slash and bare paths both resolve

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use core_config::media::MediaConfig;
use domain_catalog::*;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt; // For oneshot()

async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Two published products (one with images at slots 1 and 3, one without a
/// slot-1 image) and one draft.
async fn seeded_app() -> Router {
    let service = CatalogService::new(InMemoryCatalogRepository::new())
        .with_media(MediaConfig::new("/media/"));

    let shoes = service
        .create_category(CreateCategory::new("Shoes"), None)
        .await
        .unwrap();

    let runner = service
        .create_product(CreateProductItem::new(shoes.id, "Trail Runner"), None)
        .await
        .unwrap();
    service
        .add_product_image(
            runner.id,
            CreateProductImage::new("uploads/product-images/front.jpg", 1).with_alt_text("front"),
            None,
        )
        .await
        .unwrap();
    service
        .add_product_image(
            runner.id,
            CreateProductImage::new("uploads/product-images/side.jpg", 3).with_alt_text("side"),
            None,
        )
        .await
        .unwrap();

    let boot = service
        .create_product(CreateProductItem::new(shoes.id, "Winter Boot"), None)
        .await
        .unwrap();
    service
        .add_product_image(boot.id, CreateProductImage::new("boot.jpg", 2), None)
        .await
        .unwrap();

    let mut draft = CreateProductItem::new(shoes.id, "Secret Sneaker");
    draft.is_published = false;
    service.create_product(draft, None).await.unwrap();

    handlers::router(service)
}

#[tokio::test]
async fn test_list_returns_published_products_with_thumbnail() {
    let app = seeded_app().await;

    let response = app.oneshot(get("/products/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let products: Vec<ProductItemRepr> = json_body(response.into_body()).await;
    let slugs: Vec<&str> = products.iter().map(|p| p.slug.as_str()).collect();
    assert_eq!(slugs, vec!["trail-runner", "winter-boot"]);

    assert_eq!(products[0].images.len(), 1);
    assert_eq!(products[0].images[0].alt_text, "front");
    assert_eq!(
        products[0].images[0].image,
        "/media/uploads/product-images/front.jpg"
    );
    assert!(products[1].images.is_empty());
}

#[tokio::test]
async fn test_detail_returns_all_images_descending() {
    let app = seeded_app().await;

    let response = app.oneshot(get("/products/trail-runner/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let product: ProductItemRepr = json_body(response.into_body()).await;
    assert_eq!(product.name, "Trail Runner");
    let orders: Vec<i32> = product.images.iter().map(|i| i.display_order).collect();
    assert_eq!(orders, vec![3, 1]);
}

#[tokio::test]
async fn test_paths_without_trailing_slash() {
    let app = seeded_app().await;

    let response = app.clone().oneshot(get("/products")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.oneshot(get("/products/winter-boot")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_unpublished_product_is_not_found() {
    let app = seeded_app().await;

    let response = app.oneshot(get("/products/secret-sneaker/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_slug_returns_error_body() {
    let app = seeded_app().await;

    let response = app.oneshot(get("/products/unknown-slug/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "NOT_FOUND");
    assert!(body["message"].as_str().unwrap().contains("unknown-slug"));
}

#[tokio::test]
async fn test_list_response_field_set() {
    let app = seeded_app().await;

    let response = app.oneshot(get("/products/")).await.unwrap();
    let body: Value = json_body(response.into_body()).await;

    let first = body[0].as_object().unwrap();
    let mut keys: Vec<&str> = first.keys().map(String::as_str).collect();
    keys.sort();
    assert_eq!(keys, vec!["description", "images", "name", "slug"]);

    let image = body[0]["images"][0].as_object().unwrap();
    let mut keys: Vec<&str> = image.keys().map(String::as_str).collect();
    keys.sort();
    assert_eq!(keys, vec!["alt_text", "display_order", "image"]);
}
