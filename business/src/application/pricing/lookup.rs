use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::logger::Logger;
use crate::domain::pricing::classifier::summarize;
use crate::domain::pricing::errors::LookupError;
use crate::domain::pricing::model::PriceSummary;
use crate::domain::pricing::services::{SoldListingsQuery, SoldListingsService};
use crate::domain::pricing::settings::LookupSettings;
use crate::domain::pricing::use_cases::lookup::{LookupPriceParams, LookupPriceUseCase};

pub struct LookupPriceUseCaseImpl {
    pub listings: Arc<dyn SoldListingsService>,
    pub settings: LookupSettings,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl LookupPriceUseCase for LookupPriceUseCaseImpl {
    async fn execute(&self, params: LookupPriceParams) -> Result<PriceSummary, LookupError> {
        let barcode = params.barcode.trim();
        if barcode.is_empty() {
            self.logger.warn("Price lookup rejected: no barcode");
            return Err(LookupError::MissingInput);
        }

        let query = SoldListingsQuery {
            keywords: barcode.to_string(),
            ended_after: self.settings.window_start(Utc::now().date_naive()),
            page_size: self.settings.page_size,
        };

        self.logger.info(&format!(
            "Looking up sold listings for {} since {}",
            query.keywords, query.ended_after
        ));

        let prices = match self.listings.find_sold_prices(&query).await {
            Ok(prices) => prices,
            Err(err) => {
                self.logger
                    .error(&format!("Sold listings lookup failed for {}: {}", barcode, err));
                return Err(err);
            }
        };

        let summary = summarize(&prices);

        self.logger.info(&format!(
            "Barcode {}: {} sold, average {} ({})",
            barcode, summary.sold_count, summary.average, summary.tier
        ));

        Ok(summary)
    }
}
