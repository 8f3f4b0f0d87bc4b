//! Integration tests for the Postgres user repository
//!
//! Run with: cargo test -p domain_accounts --test integration_test

use domain_accounts::{AccountError, AccountService, CreateUser, PgUserRepository};
use test_utils::{assertions::assert_some, TestDataBuilder, TestDatabase};

#[tokio::test]
async fn test_register_and_lookup_by_email() {
    let db = TestDatabase::new().await;
    let builder = TestDataBuilder::from_test_name("test_register_and_lookup_by_email");
    let service = AccountService::new(PgUserRepository::new(db.connection()));

    let email = builder.email("staff");
    let user = service
        .register(CreateUser::new(email.to_uppercase()).with_name("Staff"))
        .await
        .expect("Failed to register user");

    assert_eq!(user.email, email);

    let found = assert_some(
        service.find_by_email(&email).await.unwrap(),
        "user by email",
    );
    assert_eq!(found.id, user.id);
    assert_eq!(found.name, "Staff");
}

#[tokio::test]
async fn test_duplicate_email_is_rejected() {
    let db = TestDatabase::new().await;
    let builder = TestDataBuilder::from_test_name("test_duplicate_email_is_rejected");
    let service = AccountService::new(PgUserRepository::new(db.connection()));

    let email = builder.email("dup");
    service.register(CreateUser::new(&email)).await.unwrap();

    let err = service
        .register(CreateUser::new(format!(" {} ", email.to_uppercase())))
        .await
        .unwrap_err();
    assert!(matches!(err, AccountError::DuplicateEmail(_)));
}

#[tokio::test]
async fn test_remove_user() {
    let db = TestDatabase::new().await;
    let builder = TestDataBuilder::from_test_name("test_remove_user");
    let service = AccountService::new(PgUserRepository::new(db.connection()));

    let user = service
        .register(CreateUser::new(builder.email("leaver")))
        .await
        .unwrap();

    service.remove_user(user.id).await.unwrap();

    assert!(matches!(
        service.get_user(user.id).await,
        Err(AccountError::NotFound(_))
    ));
    assert!(matches!(
        service.remove_user(user.id).await,
        Err(AccountError::NotFound(_))
    ));
}
