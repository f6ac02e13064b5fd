use sqlx::{PgPool, postgres::PgPoolOptions};
use std::{path::Path, time::Duration};
use thiserror::Error;

pub const DEFAULT_MIGRATIONS_PATH: &str = "./migrations";

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("database.connection_error")]
    ConnectionError(#[source] sqlx::Error),
    #[error("database.migrations_not_found: {0}")]
    MigrationsNotFound(String),
    #[error("database.migration_error")]
    MigrationError(#[source] sqlx::migrate::MigrateError),
}

/// Configuration for the remote sync database
pub struct DatabaseConfig {
    pub connection_string: String,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

impl DatabaseConfig {
    /// Small pool: the only writer is the batch flush, one statement at a time
    pub fn new(connection_string: String) -> Self {
        Self {
            connection_string,
            max_connections: 2,
            acquire_timeout: Duration::from_secs(10),
        }
    }
}

/// Creates a PostgreSQL connection pool
pub async fn create_postgres_pool(config: &DatabaseConfig) -> Result<PgPool, DatabaseError> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout)
        .connect(&config.connection_string)
        .await
        .map_err(DatabaseError::ConnectionError)
}

/// Runs database migrations from the specified directory
pub async fn run_migrations(pool: &PgPool, migrations_path: &str) -> Result<(), DatabaseError> {
    let path = Path::new(migrations_path);

    if !path.exists() {
        return Err(DatabaseError::MigrationsNotFound(migrations_path.to_string()));
    }

    sqlx::migrate::Migrator::new(path)
        .await
        .map_err(DatabaseError::MigrationError)?
        .run(pool)
        .await
        .map_err(DatabaseError::MigrationError)
}
