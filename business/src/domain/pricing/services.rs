use async_trait::async_trait;
use chrono::NaiveDate;

use super::errors::LookupError;
use super::model::RawPrice;

/// Parameters of a sold-listings search.
#[derive(Debug, Clone, PartialEq)]
pub struct SoldListingsQuery {
    pub keywords: String,
    /// Only listings that ended on or after this date are returned.
    pub ended_after: NaiveDate,
    pub page_size: u32,
}

/// Service port for searching completed, sold marketplace listings.
///
/// Returns one raw price per matching item. Items without a readable
/// price are reported as [`RawPrice::Missing`], never as zero.
#[async_trait]
pub trait SoldListingsService: Send + Sync {
    async fn find_sold_prices(&self, query: &SoldListingsQuery)
    -> Result<Vec<RawPrice>, LookupError>;
}
