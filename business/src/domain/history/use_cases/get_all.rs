use async_trait::async_trait;

use crate::domain::history::errors::HistoryError;
use crate::domain::history::model::ScanResult;

#[async_trait]
pub trait GetHistoryUseCase: Send + Sync {
    async fn execute(&self) -> Result<Vec<ScanResult>, HistoryError>;
}
