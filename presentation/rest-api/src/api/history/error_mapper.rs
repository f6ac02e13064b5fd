use poem::http::StatusCode;
use poem_openapi::payload::Json;

use business::domain::history::errors::HistoryError;

use crate::api::error::{ErrorResponse, IntoErrorResponse};

impl IntoErrorResponse for HistoryError {
    fn into_error_response(self) -> (StatusCode, Json<ErrorResponse>) {
        let (status, name, message) = match &self {
            HistoryError::BarcodeEmpty => (
                StatusCode::BAD_REQUEST,
                "ValidationError",
                "history.barcode_empty",
            ),
            HistoryError::InvalidSettings => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "InternalError",
                "history.invalid_settings",
            ),
            HistoryError::PersistenceFailed(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "InternalError",
                "history.persistence_failed",
            ),
        };

        (status, Json(ErrorResponse::new(name, message)))
    }
}
