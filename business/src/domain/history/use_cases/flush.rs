use async_trait::async_trait;

use crate::domain::history::errors::HistoryError;
use crate::domain::history::model::FlushOutcome;

#[async_trait]
pub trait FlushHistoryUseCase: Send + Sync {
    async fn execute(&self) -> Result<FlushOutcome, HistoryError>;
}
