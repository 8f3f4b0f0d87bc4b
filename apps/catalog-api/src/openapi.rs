use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    components(
        schemas(axum_helpers::ErrorResponse)
    ),
    info(
        title = "Catalog API",
        version = "0.1.0",
        description = "Read-only access to published products"
    ),
    nest(
        (path = "/api", api = domain_catalog::handlers::ApiDoc)
    )
)]
pub struct ApiDoc;
