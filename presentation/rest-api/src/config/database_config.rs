use persistence::db::{DEFAULT_MIGRATIONS_PATH, DatabaseConfig, create_postgres_pool, run_migrations};
use sqlx::PgPool;

use super::env;

/// Initialize the remote sync database, if one is configured
///
/// Environment variables:
/// - DATABASE_URL: PostgreSQL connection string. When unset, history stays
///   local and flushes report `sync_disabled`.
/// - MIGRATIONS_PATH: Migrations directory (default: "./migrations")
///
/// # Errors
/// Returns error if the connection or the migrations fail
pub async fn init_database() -> anyhow::Result<Option<PgPool>> {
    let Some(db_url) = env::optional("DATABASE_URL") else {
        tracing::info!("DATABASE_URL not set, remote history sync disabled");
        return Ok(None);
    };

    let pool = create_postgres_pool(&DatabaseConfig::new(db_url)).await?;
    let migrations_path =
        env::optional("MIGRATIONS_PATH").unwrap_or_else(|| DEFAULT_MIGRATIONS_PATH.to_string());
    run_migrations(&pool, &migrations_path).await?;

    Ok(Some(pool))
}
