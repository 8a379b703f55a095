use crate::error::DbError;
use configuration::StorageSettings;
use sqlx::{PgPool, postgres::PgPoolOptions};
use std::time::Duration;

/// Establishes a connection pool to the remote PostgreSQL store.
///
/// The URL comes from `storage.database_url`, which the configuration layer
/// already falls back to `DATABASE_URL` for.
pub async fn connect(settings: &StorageSettings) -> Result<PgPool, DbError> {
    let database_url = settings.database_url.as_deref().ok_or_else(|| {
        DbError::ConnectionConfigError(
            "storage.database_url or DATABASE_URL must be set.".to_string(),
        )
    })?;

    let pool = PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .acquire_timeout(Duration::from_secs(settings.acquire_timeout_secs))
        .connect(database_url)
        .await?;

    Ok(pool)
}

/// Applies the embedded schema migrations, creating the journal tables if needed.
pub async fn run_migrations(pool: &PgPool) -> Result<(), DbError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}
