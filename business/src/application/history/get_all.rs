use std::sync::Arc;

use async_trait::async_trait;

use crate::application::history::buffer::HistoryBuffer;
use crate::domain::history::errors::HistoryError;
use crate::domain::history::model::ScanResult;
use crate::domain::history::use_cases::get_all::GetHistoryUseCase;
use crate::domain::logger::Logger;

pub struct GetHistoryUseCaseImpl {
    pub buffer: HistoryBuffer,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl GetHistoryUseCase for GetHistoryUseCaseImpl {
    async fn execute(&self) -> Result<Vec<ScanResult>, HistoryError> {
        let log = self.buffer.lock().await;
        self.logger
            .debug(&format!("Listing {} history entries", log.len()));
        Ok(log.entries().to_vec())
    }
}
