use poem::http::StatusCode;
use poem_openapi::payload::Json;

use business::domain::pricing::errors::LookupError;

use crate::api::error::{ErrorResponse, IntoErrorResponse};

impl IntoErrorResponse for LookupError {
    fn into_error_response(self) -> (StatusCode, Json<ErrorResponse>) {
        let (status, name, message) = match &self {
            LookupError::MissingInput => {
                (StatusCode::BAD_REQUEST, "ValidationError", "No barcode")
            }
            LookupError::LookupFailed => (StatusCode::BAD_GATEWAY, "UpstreamError", "eBay failed"),
        };

        (status, Json(ErrorResponse::new(name, message)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_map_missing_input_to_bad_request() {
        let (status, json) = LookupError::MissingInput.into_error_response();

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json.0.error, "No barcode");
    }

    #[test]
    fn should_map_lookup_failure_to_bad_gateway() {
        let (status, json) = LookupError::LookupFailed.into_error_response();

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(json.0.error, "eBay failed");
    }
}
