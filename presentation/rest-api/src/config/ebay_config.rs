use anyhow::Context;
use std::time::Duration;

use business::domain::pricing::settings::{
    DEFAULT_PAGE_SIZE, DEFAULT_WINDOW_MONTHS, LookupSettings,
};

use ebay::client::{DEFAULT_GLOBAL_ID, DEFAULT_TIMEOUT_SECS};

use super::env;

/// Configuration for eBay Finding API access and the lookup query shape.
pub struct EbayConfig {
    pub app_id: String,
    pub base_url: Option<String>,
    pub global_id: Option<String>,
    pub timeout: Duration,
    pub lookup: LookupSettings,
}

impl EbayConfig {
    /// Environment variables:
    /// - EBAY_APP_ID: Finding API application id (required)
    /// - EBAY_BASE_URL: Override of the Finding service endpoint
    /// - EBAY_GLOBAL_ID: Marketplace id (default: "EBAY-AU")
    /// - EBAY_TIMEOUT_SECS: Request timeout (default: 5)
    /// - LOOKUP_WINDOW_MONTHS: Sold-listing window (default: 6)
    /// - LOOKUP_PAGE_SIZE: Listings per query, clamped to 1..=100 (default: 100)
    pub fn from_env() -> anyhow::Result<Self> {
        let app_id = env::optional("EBAY_APP_ID").context("EBAY_APP_ID must be set")?;
        let global_id =
            env::optional("EBAY_GLOBAL_ID").or_else(|| Some(DEFAULT_GLOBAL_ID.to_string()));

        Ok(Self {
            app_id,
            base_url: env::optional("EBAY_BASE_URL"),
            global_id,
            timeout: Duration::from_secs(env::parse_or("EBAY_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?),
            lookup: LookupSettings::new(
                env::parse_or("LOOKUP_WINDOW_MONTHS", DEFAULT_WINDOW_MONTHS)?,
                env::parse_or("LOOKUP_PAGE_SIZE", DEFAULT_PAGE_SIZE)?,
            ),
        })
    }
}
