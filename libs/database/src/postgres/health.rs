use sea_orm::{ConnectionTrait, DatabaseBackend, DatabaseConnection, DbErr, SqlErr, Statement};
use tracing::debug;

use crate::common::DatabaseError;

/// `SELECT 1` against the pool, for readiness probes.
pub async fn check_health(db: &DatabaseConnection) -> Result<(), DatabaseError> {
    debug!("Running PostgreSQL health check");

    let stmt = Statement::from_string(DatabaseBackend::Postgres, "SELECT 1".to_owned());
    db.query_one_raw(stmt).await.map_err(|e| {
        DatabaseError::HealthCheckFailed(format!("PostgreSQL health check failed: {}", e))
    })?;

    debug!("PostgreSQL health check passed");
    Ok(())
}

/// True when `err` is a unique-constraint violation.
///
/// Repositories use it to turn duplicate inserts into domain conflicts.
pub fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

/// Name of the violated unique constraint, when `err` is a unique violation.
///
/// Falls back to the raw driver message if no quoted name can be found.
pub fn unique_violation_constraint(err: &DbErr) -> Option<String> {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(message)) => Some(
            constraint_name(&message)
                .map(str::to_string)
                .unwrap_or(message),
        ),
        _ => None,
    }
}

/// `... violates unique constraint "categories_slug_key"` -> `categories_slug_key`
fn constraint_name(message: &str) -> Option<&str> {
    let (_, rest) = message.split_once("constraint \"")?;
    rest.split_once('"').map(|(name, _)| name)
}
