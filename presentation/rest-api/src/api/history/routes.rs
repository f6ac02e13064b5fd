use std::sync::Arc;

use poem_openapi::{OpenApi, payload::Json};

use business::domain::history::use_cases::flush::FlushHistoryUseCase;
use business::domain::history::use_cases::get_all::GetHistoryUseCase;
use business::domain::history::use_cases::record::{RecordScanParams, RecordScanUseCase};
use business::domain::pricing::model::AveragePrice;

use crate::api::error::{ErrorResponse, IntoErrorResponse};
use crate::api::history::dto::{FlushResponse, RecordScanRequest, ScanResultResponse};
use crate::api::tags::ApiTags;

pub struct HistoryApi {
    get_all_use_case: Arc<dyn GetHistoryUseCase>,
    record_use_case: Arc<dyn RecordScanUseCase>,
    flush_use_case: Arc<dyn FlushHistoryUseCase>,
}

impl HistoryApi {
    pub fn new(
        get_all_use_case: Arc<dyn GetHistoryUseCase>,
        record_use_case: Arc<dyn RecordScanUseCase>,
        flush_use_case: Arc<dyn FlushHistoryUseCase>,
    ) -> Self {
        Self {
            get_all_use_case,
            record_use_case,
            flush_use_case,
        }
    }
}

/// Scan history API
///
/// The local log of recent lookups and its batched sync to the remote store.
#[OpenApi]
impl HistoryApi {
    /// List scan history
    ///
    /// Returns the buffered scan results, most recent first.
    #[oai(path = "/history", method = "get", tag = "ApiTags::History")]
    async fn get_history(&self) -> GetHistoryResponse {
        match self.get_all_use_case.execute().await {
            Ok(entries) => GetHistoryResponse::Ok(Json(
                entries.into_iter().map(ScanResultResponse::from).collect(),
            )),
            Err(err) => {
                let (_status, json) = err.into_error_response();
                GetHistoryResponse::InternalError(json)
            }
        }
    }

    /// Record a scan result
    ///
    /// Stamps the result with the server time, stores it, then attempts a
    /// batch flush. A failed flush keeps the entries and does not fail the request.
    #[oai(path = "/history", method = "post", tag = "ApiTags::History")]
    async fn record_scan(&self, body: Json<RecordScanRequest>) -> RecordScanResponse {
        let average: AveragePrice = match body.0.avg_price.parse() {
            Ok(average) => average,
            Err(_) => {
                return RecordScanResponse::BadRequest(Json(ErrorResponse::new(
                    "ValidationError",
                    "history.invalid_price",
                )));
            }
        };

        let params = RecordScanParams {
            barcode: body.0.barcode,
            average,
            sold_count: body.0.sold_count as usize,
        };

        let stored = match self.record_use_case.execute(params).await {
            Ok(stored) => stored,
            Err(err) => {
                let (status, json) = err.into_error_response();
                return match status.as_u16() {
                    400 => RecordScanResponse::BadRequest(json),
                    _ => RecordScanResponse::InternalError(json),
                };
            }
        };

        match self.flush_use_case.execute().await {
            Ok(outcome) => tracing::debug!(%outcome, "history flush attempted"),
            Err(err) => tracing::warn!(error = %err, "history flush failed, entries kept"),
        }

        RecordScanResponse::Created(Json(stored.into()))
    }

    /// Flush history to the remote store
    ///
    /// Sends the whole buffer as one batch once it holds at least the batch size.
    #[oai(path = "/history/flush", method = "post", tag = "ApiTags::History")]
    async fn flush_history(&self) -> FlushHistoryResponse {
        match self.flush_use_case.execute().await {
            Ok(outcome) => FlushHistoryResponse::Ok(Json(outcome.into())),
            Err(err) => {
                let (_status, json) = err.into_error_response();
                FlushHistoryResponse::InternalError(json)
            }
        }
    }
}

#[derive(poem_openapi::ApiResponse)]
pub enum GetHistoryResponse {
    #[oai(status = 200)]
    Ok(Json<Vec<ScanResultResponse>>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

#[derive(poem_openapi::ApiResponse)]
pub enum RecordScanResponse {
    #[oai(status = 201)]
    Created(Json<ScanResultResponse>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

#[derive(poem_openapi::ApiResponse)]
pub enum FlushHistoryResponse {
    #[oai(status = 200)]
    Ok(Json<FlushResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}
