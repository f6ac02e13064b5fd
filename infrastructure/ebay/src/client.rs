use std::time::Duration;

use reqwest::Client;

pub const FINDING_SERVICE_URL: &str = "https://svcs.ebay.com/services/search/FindingService/v1";
pub const FINDING_SERVICE_VERSION: &str = "1.13.0";
/// Marketplace searched when none is configured; prices are shown in AUD.
pub const DEFAULT_GLOBAL_ID: &str = "EBAY-AU";
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Shared eBay HTTP client configuration.
pub struct EbayClient {
    pub client: Client,
    pub app_id: String,
    pub base_url: String,
    /// Marketplace to search, e.g. `EBAY-AU`. `None` uses the account default.
    pub global_id: Option<String>,
}

impl EbayClient {
    /// Builds a client whose requests give up after `timeout`.
    pub fn new(app_id: String, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            app_id,
            base_url: FINDING_SERVICE_URL.to_string(),
            global_id: None,
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_global_id(mut self, global_id: Option<String>) -> Self {
        self.global_id = global_id.filter(|id| !id.trim().is_empty());
        self
    }

    /// Returns the Finding API endpoint URL.
    pub fn finding_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}
