use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::application::history::buffer::HistoryBuffer;
use crate::domain::history::errors::HistoryError;
use crate::domain::history::model::ScanResult;
use crate::domain::history::repository::HistoryRepository;
use crate::domain::history::use_cases::record::{RecordScanParams, RecordScanUseCase};
use crate::domain::logger::Logger;

pub struct RecordScanUseCaseImpl {
    pub buffer: HistoryBuffer,
    pub repository: Arc<dyn HistoryRepository>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl RecordScanUseCase for RecordScanUseCaseImpl {
    async fn execute(&self, params: RecordScanParams) -> Result<ScanResult, HistoryError> {
        let barcode = params.barcode.trim();
        if barcode.is_empty() {
            return Err(HistoryError::BarcodeEmpty);
        }

        let result = ScanResult::new(barcode, params.average, params.sold_count, Utc::now());

        let mut log = self.buffer.lock().await;
        let mut next = log.clone();
        let evicted = next.record(result.clone());

        // The buffer only moves forward once the blob is on disk.
        if let Err(err) = self.repository.replace(next.entries()).await {
            self.logger
                .error(&format!("Failed to persist history for {}: {}", barcode, err));
            return Err(err.into());
        }
        *log = next;

        if evicted > 0 {
            self.logger.warn(&format!(
                "History full, dropped {} oldest entries that were never synced",
                evicted
            ));
        }
        self.logger.info(&format!(
            "Recorded scan {} ({} entries in history)",
            barcode,
            log.len()
        ));

        Ok(result)
    }
}
