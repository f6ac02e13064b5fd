use async_trait::async_trait;

use crate::domain::errors::RepositoryError;

use super::model::ScanResult;

/// Local durable storage for the history buffer, kept as one blob.
#[async_trait]
pub trait HistoryRepository: Send + Sync {
    /// Returns the stored entries, or an empty list when nothing was saved yet.
    async fn load(&self) -> Result<Vec<ScanResult>, RepositoryError>;
    /// Replaces the stored blob with `entries`.
    async fn replace(&self, entries: &[ScanResult]) -> Result<(), RepositoryError>;
}

/// Append-only remote sink for synced scan results.
#[async_trait]
pub trait ScanBatchStore: Send + Sync {
    /// Writes all records or none.
    async fn insert_batch(&self, records: &[ScanResult]) -> Result<(), RepositoryError>;
}
