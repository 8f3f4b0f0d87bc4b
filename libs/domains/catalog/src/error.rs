use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Category not found: {0}")]
    CategoryNotFound(Uuid),

    #[error("Product not found: {0}")]
    ProductNotFound(Uuid),

    #[error("No published product with slug '{0}'")]
    SlugNotFound(String),

    #[error("Category with name '{0}' already exists")]
    DuplicateCategoryName(String),

    #[error("Product {product_id} already has an image at display order {display_order}")]
    DuplicateDisplayOrder { product_id: Uuid, display_order: i32 },

    #[error("Slug '{0}' is already taken")]
    DuplicateSlug(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

impl CatalogError {
    pub(crate) fn database(err: impl std::fmt::Display) -> Self {
        Self::Internal(format!("Database error: {}", err))
    }
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        let message = err.to_string();
        match err {
            CatalogError::CategoryNotFound(_)
            | CatalogError::ProductNotFound(_)
            | CatalogError::SlugNotFound(_) => AppError::NotFound(message),
            CatalogError::DuplicateCategoryName(_)
            | CatalogError::DuplicateDisplayOrder { .. }
            | CatalogError::DuplicateSlug(_) => AppError::Conflict(message),
            CatalogError::Validation(msg) => AppError::BadRequest(msg),
            CatalogError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (CatalogError::SlugNotFound("x".into()), StatusCode::NOT_FOUND),
            (
                CatalogError::DuplicateCategoryName("Shoes".into()),
                StatusCode::CONFLICT,
            ),
            (
                CatalogError::DuplicateDisplayOrder {
                    product_id: Uuid::nil(),
                    display_order: 1,
                },
                StatusCode::CONFLICT,
            ),
            (CatalogError::Validation("bad".into()), StatusCode::BAD_REQUEST),
            (
                CatalogError::Internal("boom".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }
}
