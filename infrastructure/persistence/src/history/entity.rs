use serde::Serialize;

use business::domain::history::model::ScanResult;

/// Row shape of the remote `scan_results` table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanRecordEntity {
    pub barcode: String,
    pub avg_price: String,
    pub sold_count: i32,
    pub timestamp: String,
}

impl From<&ScanResult> for ScanRecordEntity {
    fn from(result: &ScanResult) -> Self {
        Self {
            barcode: result.barcode.clone(),
            avg_price: result.avg_price.clone(),
            sold_count: i32::try_from(result.sold_count).unwrap_or(i32::MAX),
            timestamp: result.timestamp.clone(),
        }
    }
}
