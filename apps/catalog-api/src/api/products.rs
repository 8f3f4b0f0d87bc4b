use axum::Router;
use domain_catalog::{CatalogService, PgCatalogRepository, handlers};

pub fn router(state: &crate::state::AppState) -> Router {
    let repository = PgCatalogRepository::new(state.db.clone());
    let service = CatalogService::new(repository).with_media(state.config.media.clone());
    handlers::router(service)
}
