use poem_openapi::Object;

use business::domain::history::model::{FlushOutcome, ScanResult};

#[derive(Debug, Clone, Object)]
pub struct ScanResultResponse {
    pub barcode: String,
    /// Average sold price with two decimals
    #[oai(rename = "avgPrice")]
    pub avg_price: String,
    #[oai(rename = "soldCount")]
    pub sold_count: u64,
    /// Server time the result was recorded, "YYYY-MM-DD HH:MM:SS"
    pub timestamp: String,
}

impl From<ScanResult> for ScanResultResponse {
    fn from(result: ScanResult) -> Self {
        Self {
            barcode: result.barcode,
            avg_price: result.avg_price,
            sold_count: result.sold_count as u64,
            timestamp: result.timestamp,
        }
    }
}

#[derive(Debug, Clone, Object)]
pub struct RecordScanRequest {
    /// Scanned barcode (cannot be empty)
    pub barcode: String,
    /// Average price as a decimal string, e.g. "140.00"
    #[oai(rename = "avgPrice")]
    pub avg_price: String,
    #[oai(rename = "soldCount")]
    pub sold_count: u64,
}

#[derive(Debug, Clone, Object)]
pub struct FlushResponse {
    /// One of "flushed", "below_threshold" or "sync_disabled"
    pub status: String,
    /// Entries written to the remote store
    pub flushed: u64,
}

impl From<FlushOutcome> for FlushResponse {
    fn from(outcome: FlushOutcome) -> Self {
        let flushed = match outcome {
            FlushOutcome::Flushed(count) => count as u64,
            FlushOutcome::BelowThreshold | FlushOutcome::SyncDisabled => 0,
        };
        Self {
            status: outcome.to_string(),
            flushed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_report_flushed_count() {
        let response = FlushResponse::from(FlushOutcome::Flushed(10));

        assert_eq!(response.status, "flushed");
        assert_eq!(response.flushed, 10);
    }

    #[test]
    fn should_report_zero_when_nothing_sent() {
        let response = FlushResponse::from(FlushOutcome::SyncDisabled);

        assert_eq!(response.status, "sync_disabled");
        assert_eq!(response.flushed, 0);
    }
}
