use async_trait::async_trait;
use database::postgres::is_unique_violation;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use uuid::Uuid;

use crate::{
    entity,
    error::{AccountError, AccountResult},
    models::{normalize_email, CreateUser, User},
    repository::UserRepository,
};

/// PostgreSQL implementation of UserRepository
#[derive(Clone)]
pub struct PgUserRepository {
    db: DatabaseConnection,
}

impl PgUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, input: CreateUser) -> AccountResult<User> {
        let email = normalize_email(&input.email);
        let active_model: entity::ActiveModel = input.into();

        let model = active_model.insert(&self.db).await.map_err(|e| {
            if is_unique_violation(&e) {
                AccountError::DuplicateEmail(email.clone())
            } else {
                AccountError::Internal(format!("Database error: {}", e))
            }
        })?;

        tracing::info!(user_id = %model.id, "Created user");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: Uuid) -> AccountResult<Option<User>> {
        let model = entity::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| AccountError::Internal(format!("Database error: {}", e)))?;

        Ok(model.map(Into::into))
    }

    async fn get_by_email(&self, email: &str) -> AccountResult<Option<User>> {
        let model = entity::Entity::find()
            .filter(entity::Column::Email.eq(normalize_email(email)))
            .one(&self.db)
            .await
            .map_err(|e| AccountError::Internal(format!("Database error: {}", e)))?;

        Ok(model.map(Into::into))
    }

    async fn delete(&self, id: Uuid) -> AccountResult<bool> {
        let result = entity::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| AccountError::Internal(format!("Database error: {}", e)))?;

        if result.rows_affected > 0 {
            tracing::info!(user_id = %id, "Deleted user");
        }
        Ok(result.rows_affected > 0)
    }
}
