//! Shared application state handed to routers and the readiness check.

/// Cloned per handler; the connection is a pooled handle.
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    pub db: database::postgres::DatabaseConnection,
}
