use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use business::domain::pricing::errors::LookupError;
use business::domain::pricing::model::RawPrice;
use business::domain::pricing::services::{SoldListingsQuery, SoldListingsService};

use crate::client::{EbayClient, FINDING_SERVICE_VERSION};

const PRICE_POINTER: &str = "/sellingStatus/0/currentPrice/0/__value__";

#[derive(Deserialize)]
struct FindingEnvelope {
    #[serde(rename = "findCompletedItemsResponse", default)]
    responses: Vec<FindCompletedItemsResponse>,
}

#[derive(Deserialize)]
struct FindCompletedItemsResponse {
    #[serde(default)]
    ack: Vec<String>,
    #[serde(rename = "searchResult", default)]
    search_results: Vec<SearchResult>,
}

#[derive(Deserialize)]
struct SearchResult {
    #[serde(default)]
    item: Vec<Value>,
}

/// Sold-listings search over the eBay Finding API (`findCompletedItems`).
pub struct SoldListingsEbay {
    client: EbayClient,
}

impl SoldListingsEbay {
    pub fn new(client: EbayClient) -> Self {
        Self { client }
    }

    fn query_params(&self, query: &SoldListingsQuery) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("OPERATION-NAME", "findCompletedItems".to_string()),
            ("SERVICE-VERSION", FINDING_SERVICE_VERSION.to_string()),
            ("SECURITY-APPNAME", self.client.app_id.clone()),
            ("RESPONSE-DATA-FORMAT", "JSON".to_string()),
            ("keywords", query.keywords.clone()),
            ("itemFilter(0).name", "SoldItemsOnly".to_string()),
            ("itemFilter(0).value", "true".to_string()),
            ("itemFilter(1).name", "EndTimeFrom".to_string()),
            ("itemFilter(1).value", query.ended_after.format("%Y-%m-%d").to_string()),
            ("paginationInput.entriesPerPage", query.page_size.to_string()),
        ];

        if let Some(global_id) = &self.client.global_id {
            params.push(("GLOBAL-ID", global_id.clone()));
        }

        params
    }

    /// Extracts one raw price per item. A missing `searchResult` is an empty
    /// result; an `ack` of `Failure` or a body that is not an envelope fails.
    fn parse_prices(body: &str) -> Result<Vec<RawPrice>, LookupError> {
        let envelope: FindingEnvelope =
            serde_json::from_str(body).map_err(|_| LookupError::LookupFailed)?;

        let Some(response) = envelope.responses.into_iter().next() else {
            return Ok(Vec::new());
        };

        if response.ack.iter().any(|ack| ack == "Failure") {
            return Err(LookupError::LookupFailed);
        }

        let prices = response
            .search_results
            .into_iter()
            .next()
            .map(|result| result.item)
            .unwrap_or_default()
            .iter()
            .map(Self::item_price)
            .collect();

        Ok(prices)
    }

    fn item_price(item: &Value) -> RawPrice {
        match item.pointer(PRICE_POINTER) {
            Some(Value::String(text)) => RawPrice::Text(text.clone()),
            Some(Value::Number(number)) => number
                .as_f64()
                .map(RawPrice::Amount)
                .unwrap_or(RawPrice::Missing),
            _ => RawPrice::Missing,
        }
    }
}

#[async_trait]
impl SoldListingsService for SoldListingsEbay {
    async fn find_sold_prices(
        &self,
        query: &SoldListingsQuery,
    ) -> Result<Vec<RawPrice>, LookupError> {
        let response = self
            .client
            .client
            .get(self.client.finding_url())
            .query(&self.query_params(query))
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, timeout = e.is_timeout(), "eBay request failed");
                LookupError::LookupFailed
            })?;

        if !response.status().is_success() {
            tracing::warn!(status = %response.status(), "eBay returned an error status");
            return Err(LookupError::LookupFailed);
        }

        let body = response
            .text()
            .await
            .map_err(|_| LookupError::LookupFailed)?;

        Self::parse_prices(&body)
    }
}
