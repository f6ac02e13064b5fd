use std::sync::Arc;

use poem_openapi::{OpenApi, param::Query, payload::Json};

use business::domain::pricing::use_cases::lookup::{LookupPriceParams, LookupPriceUseCase};

use crate::api::error::{ErrorResponse, IntoErrorResponse};
use crate::api::lookup::dto::LookupResponseBody;
use crate::api::tags::ApiTags;

pub struct LookupApi {
    lookup_use_case: Arc<dyn LookupPriceUseCase>,
}

impl LookupApi {
    pub fn new(lookup_use_case: Arc<dyn LookupPriceUseCase>) -> Self {
        Self { lookup_use_case }
    }
}

/// Sold-price lookup API
#[OpenApi]
impl LookupApi {
    /// Look up recent sold prices for a barcode
    ///
    /// Queries eBay sold listings from the trailing window and returns the
    /// average price, the number of priced sales and a recommendation tier.
    #[oai(path = "/lookup", method = "get", tag = "ApiTags::Lookup")]
    async fn lookup(&self, barcode: Query<Option<String>>) -> LookupResponse {
        let barcode = barcode.0.unwrap_or_default().trim().to_string();

        match self
            .lookup_use_case
            .execute(LookupPriceParams {
                barcode: barcode.clone(),
            })
            .await
        {
            Ok(summary) => LookupResponse::Ok(Json(LookupResponseBody::new(barcode, &summary))),
            Err(err) => {
                let (status, json) = err.into_error_response();
                match status.as_u16() {
                    400 => LookupResponse::BadRequest(json),
                    _ => LookupResponse::BadGateway(json),
                }
            }
        }
    }
}

#[derive(poem_openapi::ApiResponse)]
pub enum LookupResponse {
    #[oai(status = 200)]
    Ok(Json<LookupResponseBody>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 502)]
    BadGateway(Json<ErrorResponse>),
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use poem::{Route, test::TestClient};
    use poem_openapi::OpenApiService;

    use business::domain::pricing::errors::LookupError;
    use business::domain::pricing::model::{AveragePrice, PriceSummary, RecommendationTier};

    struct StubLookup(Result<PriceSummary, fn() -> LookupError>);

    #[async_trait]
    impl LookupPriceUseCase for StubLookup {
        async fn execute(&self, params: LookupPriceParams) -> Result<PriceSummary, LookupError> {
            if params.barcode.is_empty() {
                return Err(LookupError::MissingInput);
            }
            self.0.clone().map_err(|make| make())
        }
    }

    fn client(stub: StubLookup) -> TestClient<Route> {
        let api = OpenApiService::new(LookupApi::new(Arc::new(stub)), "test", "0.0.0");
        TestClient::new(Route::new().nest("/", api))
    }

    fn priced() -> StubLookup {
        StubLookup(Ok(PriceSummary {
            average: AveragePrice::from_cents(20000),
            sold_count: 1,
            tier: RecommendationTier::Maybe,
        }))
    }

    #[tokio::test]
    async fn should_return_camel_case_summary() {
        let cli = client(priced());

        let resp = cli.get("/lookup").query("barcode", &"9321337").send().await;

        resp.assert_status_is_ok();
        resp.assert_json(serde_json::json!({
            "barcode": "9321337",
            "avgPrice": "200.00",
            "soldCount": 1,
            "tier": "maybe"
        }))
        .await;
    }

    #[tokio::test]
    async fn should_reject_missing_barcode() {
        let cli = client(priced());

        let resp = cli.get("/lookup").send().await;

        resp.assert_status(poem::http::StatusCode::BAD_REQUEST);
        resp.assert_json(serde_json::json!({"name": "ValidationError", "error": "No barcode"}))
            .await;
    }

    #[tokio::test]
    async fn should_report_bad_gateway_when_ebay_fails() {
        let cli = client(StubLookup(Err(|| LookupError::LookupFailed)));

        let resp = cli.get("/lookup").query("barcode", &"123").send().await;

        resp.assert_status(poem::http::StatusCode::BAD_GATEWAY);
        resp.assert_json(serde_json::json!({"name": "UpstreamError", "error": "eBay failed"}))
            .await;
    }
}
