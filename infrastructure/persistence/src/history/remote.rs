use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};

use business::domain::errors::RepositoryError;
use business::domain::history::model::ScanResult;
use business::domain::history::repository::ScanBatchStore;

use super::entity::ScanRecordEntity;

const INSERT_PREFIX: &str =
    r#"INSERT INTO scan_results (barcode, avg_price, sold_count, "timestamp") "#;

pub struct ScanBatchStorePostgres {
    pool: PgPool,
}

impl ScanBatchStorePostgres {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// One multi-row INSERT, so the batch lands atomically.
fn build_insert(rows: &[ScanRecordEntity]) -> QueryBuilder<'_, Postgres> {
    let mut builder = QueryBuilder::new(INSERT_PREFIX);
    builder.push_values(rows, |mut values, row| {
        values
            .push_bind(&row.barcode)
            .push_bind(&row.avg_price)
            .push_bind(row.sold_count)
            .push_bind(&row.timestamp);
    });
    builder
}

#[async_trait]
impl ScanBatchStore for ScanBatchStorePostgres {
    async fn insert_batch(&self, records: &[ScanResult]) -> Result<(), RepositoryError> {
        if records.is_empty() {
            return Ok(());
        }

        let rows: Vec<ScanRecordEntity> = records.iter().map(ScanRecordEntity::from).collect();
        let mut builder = build_insert(&rows);

        builder
            .build()
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, rows = rows.len(), "scan batch insert failed");
                RepositoryError::database_error()
            })?;

        Ok(())
    }
}
