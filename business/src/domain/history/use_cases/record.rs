use async_trait::async_trait;

use crate::domain::history::errors::HistoryError;
use crate::domain::history::model::ScanResult;
use crate::domain::pricing::model::AveragePrice;

pub struct RecordScanParams {
    pub barcode: String,
    pub average: AveragePrice,
    pub sold_count: usize,
}

#[async_trait]
pub trait RecordScanUseCase: Send + Sync {
    async fn execute(&self, params: RecordScanParams) -> Result<ScanResult, HistoryError>;
}
