use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{AccountError, AccountResult};
use crate::models::{CreateUser, User};
use crate::repository::UserRepository;

/// Service layer for user accounts
#[derive(Clone)]
pub struct AccountService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> AccountService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Register a user after validating the input
    #[instrument(skip(self, input), fields(is_staff = input.is_staff))]
    pub async fn register(&self, input: CreateUser) -> AccountResult<User> {
        input
            .validate()
            .map_err(|e| AccountError::Validation(e.to_string()))?;

        self.repository.create(input).await
    }

    #[instrument(skip(self), fields(user_id = %id))]
    pub async fn get_user(&self, id: Uuid) -> AccountResult<User> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(AccountError::NotFound(id))
    }

    #[instrument(skip(self, email))]
    pub async fn find_by_email(&self, email: &str) -> AccountResult<Option<User>> {
        self.repository.get_by_email(email).await
    }

    /// Delete a user. Audit references to them are cleared by the store.
    #[instrument(skip(self), fields(user_id = %id))]
    pub async fn remove_user(&self, id: Uuid) -> AccountResult<()> {
        if !self.repository.delete(id).await? {
            return Err(AccountError::NotFound(id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockUserRepository;
    use mockall::predicate;

    #[tokio::test]
    async fn test_register_rejects_invalid_email_without_touching_repository() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo.expect_create().never();

        let service = AccountService::new(mock_repo);
        let result = service.register(CreateUser::new("nope")).await;

        assert!(matches!(result, Err(AccountError::Validation(_))));
    }

    #[tokio::test]
    async fn test_register_passes_through_to_repository() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_create()
            .times(1)
            .returning(|input| Ok(User::new(input)));

        let service = AccountService::new(mock_repo);
        let user = service
            .register(CreateUser::new("Ada@Example.com").with_name("Ada"))
            .await
            .unwrap();

        assert_eq!(user.email, "ada@example.com");
        assert_eq!(user.name, "Ada");
    }

    #[tokio::test]
    async fn test_get_user_not_found() {
        let mut mock_repo = MockUserRepository::new();
        let id = Uuid::now_v7();
        mock_repo
            .expect_get_by_id()
            .with(predicate::eq(id))
            .returning(|_| Ok(None));

        let service = AccountService::new(mock_repo);
        let result = service.get_user(id).await;

        assert!(matches!(result, Err(AccountError::NotFound(missing)) if missing == id));
    }

    #[tokio::test]
    async fn test_remove_missing_user_is_not_found() {
        let mut mock_repo = MockUserRepository::new();
        let id = Uuid::now_v7();
        mock_repo
            .expect_delete()
            .with(predicate::eq(id))
            .returning(|_| Ok(false));

        let service = AccountService::new(mock_repo);

        assert!(matches!(
            service.remove_user(id).await,
            Err(AccountError::NotFound(_))
        ));
    }
}
