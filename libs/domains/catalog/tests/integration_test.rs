//! Integration tests for the Postgres catalog repository
//!
//! Each test gets its own migrated Postgres container.
//!
//! Run with: cargo test -p domain_catalog --test integration_test

use domain_catalog::*;
use rust_decimal::Decimal;
use test_utils::{
    assertions::{assert_some, assert_uuid_eq},
    TestDataBuilder, TestDatabase,
};

fn service(db: &TestDatabase) -> CatalogService<PgCatalogRepository> {
    CatalogService::new(PgCatalogRepository::new(db.connection()))
}

#[tokio::test]
async fn test_category_name_is_unique() {
    let db = TestDatabase::new().await;
    let service = service(&db);

    let shoes = service
        .create_category(CreateCategory::new("Shoes"), None)
        .await
        .expect("Failed to create category");
    assert_eq!(shoes.slug, "shoes");
    assert!(shoes.is_published);

    let found = assert_some(
        service.find_category_by_name("Shoes").await.unwrap(),
        "category by name",
    );
    assert_uuid_eq(found.id, shoes.id, "category by name");

    let err = service
        .create_category(CreateCategory::new("Shoes"), None)
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::DuplicateCategoryName(_)));
}

#[tokio::test]
async fn test_category_slug_race_reports_duplicate_slug() {
    let db = TestDatabase::new().await;
    let repository = PgCatalogRepository::new(db.connection());

    repository
        .create_category(CreateCategory::new("Shoes"), "shoes".to_string(), None)
        .await
        .unwrap();

    // A different name that lost the race for the same slug
    let err = repository
        .create_category(CreateCategory::new("Shoes!"), "shoes".to_string(), None)
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::DuplicateSlug(ref slug) if slug == "shoes"));

    let err = repository
        .create_category(CreateCategory::new("Shoes"), "shoes-2".to_string(), None)
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::DuplicateCategoryName(_)));
}

#[tokio::test]
async fn test_product_defaults_and_slug_suffix() {
    let db = TestDatabase::new().await;
    let service = service(&db);

    let category = service
        .create_category(CreateCategory::new("Hats"), None)
        .await
        .unwrap();

    let first = service
        .create_product(CreateProductItem::new(category.id, "Cap"), None)
        .await
        .unwrap();
    let second = service
        .create_product(CreateProductItem::new(category.id, "Cap"), None)
        .await
        .unwrap();

    assert_eq!(first.slug, "cap");
    assert_eq!(second.slug, "cap-2");
    assert_eq!(first.stock, 1);
    assert_eq!(first.price, Some(Decimal::ZERO));
    assert!(first.is_published);
    assert!(!first.is_new_arrival);
    assert!(!first.is_featured);
}

#[tokio::test]
async fn test_query_helpers_against_postgres() {
    let db = TestDatabase::new().await;
    let service = service(&db);

    let category = service
        .create_category(CreateCategory::new("Bags"), None)
        .await
        .unwrap();

    let mut sold_out = CreateProductItem::new(category.id, "Sold Out Tote");
    sold_out.stock = 0;
    service.create_product(sold_out, None).await.unwrap();

    let mut fresh = CreateProductItem::new(category.id, "Fresh Backpack");
    fresh.is_new_arrival = true;
    fresh.price = Some(Decimal::new(4999, 2));
    let fresh = service.create_product(fresh, None).await.unwrap();

    let mut draft = CreateProductItem::new(category.id, "Draft Duffel");
    draft.is_published = false;
    draft.is_new_arrival = true;
    service.create_product(draft, None).await.unwrap();

    let in_stock = service.products(ProductQuery::all().in_stock()).await.unwrap();
    let names: Vec<&str> = in_stock.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Fresh Backpack"]);

    let new_arrivals = service
        .products(ProductQuery::all().new_arrivals())
        .await
        .unwrap();
    assert_eq!(new_arrivals.len(), 1);
    assert_uuid_eq(new_arrivals[0].id, fresh.id, "new arrival");
    assert_eq!(new_arrivals[0].price, Some(Decimal::new(4999, 2)));

    let unpublished = service
        .products(ProductQuery::all().unpublished())
        .await
        .unwrap();
    assert_eq!(unpublished.len(), 1);
    assert_eq!(unpublished[0].name, "Draft Duffel");
}

#[tokio::test]
async fn test_images_unique_per_slot_and_serialized_by_action() {
    let db = TestDatabase::new().await;
    let service = service(&db);

    let category = service
        .create_category(CreateCategory::new("Shoes"), None)
        .await
        .unwrap();
    let product = service
        .create_product(CreateProductItem::new(category.id, "Runner"), None)
        .await
        .unwrap();

    service
        .add_product_image(product.id, CreateProductImage::new("a.jpg", 1), None)
        .await
        .unwrap();
    service
        .add_product_image(product.id, CreateProductImage::new("b.jpg", 3), None)
        .await
        .unwrap();

    let err = service
        .add_product_image(product.id, CreateProductImage::new("c.jpg", 3), None)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        CatalogError::DuplicateDisplayOrder { display_order: 3, .. }
    ));

    let list = service
        .list_published_products(ProductAction::List)
        .await
        .unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].images.len(), 1);
    assert_eq!(list[0].images[0].image, "/media/a.jpg");

    let detail = service.retrieve_published_product("runner").await.unwrap();
    let images: Vec<&str> = detail.images.iter().map(|i| i.image.as_str()).collect();
    assert_eq!(images, vec!["/media/b.jpg", "/media/a.jpg"]);
}

#[tokio::test]
async fn test_delete_category_cascades_to_products_and_images() {
    let db = TestDatabase::new().await;
    let service = service(&db);

    let category = service
        .create_category(CreateCategory::new("Socks"), None)
        .await
        .unwrap();
    let product = service
        .create_product(CreateProductItem::new(category.id, "Wool Sock"), None)
        .await
        .unwrap();
    service
        .add_product_image(product.id, CreateProductImage::new("sock.jpg", 1), None)
        .await
        .unwrap();

    service.delete_category(category.id).await.unwrap();

    assert!(matches!(
        service.get_product(product.id).await,
        Err(CatalogError::ProductNotFound(_))
    ));
    let images = service
        .represent(&[product], ProductAction::Retrieve)
        .await
        .unwrap();
    assert!(images[0].images.is_empty());
}

#[tokio::test]
async fn test_deleting_user_nulls_audit_references() {
    let db = TestDatabase::new().await;
    let builder = TestDataBuilder::from_test_name("test_deleting_user_nulls_audit_references");
    let service = service(&db);

    let editor = db.create_test_user(&builder.email("editor")).await;
    let category = service
        .create_category(CreateCategory::new("Scarves"), Some(editor))
        .await
        .unwrap();
    let product = service
        .create_product(CreateProductItem::new(category.id, "Silk Scarf"), Some(editor))
        .await
        .unwrap();
    assert_eq!(product.audit.created_by, Some(editor));

    let stored = service.get_product(product.id).await.unwrap();

    let accounts =
        domain_accounts::AccountService::new(domain_accounts::PgUserRepository::new(db.connection()));
    accounts.remove_user(editor).await.unwrap();

    let product = service.get_product(product.id).await.unwrap();
    assert_eq!(product.audit.created_by, None);
    assert_eq!(product.audit.updated_by, None);
    // Clearing references is not a content change
    assert_eq!(product.audit.updated_at, stored.audit.updated_at);

    // Rows survive, only the references are cleared
    let category = assert_some(
        service.find_category_by_name("Scarves").await.unwrap(),
        "category after user deletion",
    );
    assert_eq!(category.audit.created_by, None);
    let products = service
        .products(ProductQuery::all().in_category(category.id))
        .await
        .unwrap();
    assert_uuid_eq(products[0].id, product.id, "product survives user deletion");
}

#[tokio::test]
async fn test_update_product_sets_updated_by() {
    let db = TestDatabase::new().await;
    let builder = TestDataBuilder::from_test_name("test_update_product_sets_updated_by");
    let service = service(&db);

    let creator = db.create_test_user(&builder.email("creator")).await;
    let editor = db.create_test_user(&builder.email("editor")).await;

    let category = service
        .create_category(CreateCategory::new("Belts"), Some(creator))
        .await
        .unwrap();
    let product = service
        .create_product(CreateProductItem::new(category.id, "Leather Belt"), Some(creator))
        .await
        .unwrap();

    let updated = service
        .update_product(
            product.id,
            UpdateProductItem {
                name: Some("Brown Leather Belt".to_string()),
                stock: Some(5),
                ..Default::default()
            },
            Some(editor),
        )
        .await
        .unwrap();

    assert_eq!(updated.slug, "leather-belt");
    assert_eq!(updated.stock, 5);
    assert_eq!(updated.audit.created_by, Some(creator));
    assert_eq!(updated.audit.updated_by, Some(editor));
}

#[tokio::test]
async fn test_forget_user_keeps_updated_at() {
    let db = TestDatabase::new().await;
    let builder = TestDataBuilder::from_test_name("test_forget_user_keeps_updated_at");
    let service = service(&db);

    let editor = db.create_test_user(&builder.email("editor")).await;
    let category = service
        .create_category(CreateCategory::new("Gloves"), Some(editor))
        .await
        .unwrap();
    let product = service
        .create_product(CreateProductItem::new(category.id, "Wool Gloves"), Some(editor))
        .await
        .unwrap();
    let stored = service.get_product(product.id).await.unwrap();

    let cleared = service.forget_user(editor).await.unwrap();
    assert_eq!(cleared, 4);

    let product = service.get_product(product.id).await.unwrap();
    assert_eq!(product.audit.created_by, None);
    assert_eq!(product.audit.updated_at, stored.audit.updated_at);
}
