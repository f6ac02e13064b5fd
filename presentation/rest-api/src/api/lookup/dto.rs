use poem_openapi::{Enum, Object};
use serde::{Deserialize, Serialize};

use business::domain::pricing::model::{PriceSummary, RecommendationTier};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Enum)]
pub enum RecommendationTierDto {
    #[oai(rename = "skip")]
    Skip,
    #[oai(rename = "maybe")]
    Maybe,
    #[oai(rename = "buy")]
    Buy,
    #[oai(rename = "premium")]
    Premium,
}

impl From<RecommendationTier> for RecommendationTierDto {
    fn from(tier: RecommendationTier) -> Self {
        match tier {
            RecommendationTier::Skip => RecommendationTierDto::Skip,
            RecommendationTier::Maybe => RecommendationTierDto::Maybe,
            RecommendationTier::Buy => RecommendationTierDto::Buy,
            RecommendationTier::Premium => RecommendationTierDto::Premium,
        }
    }
}

#[derive(Debug, Clone, Object)]
pub struct LookupResponseBody {
    /// Barcode that was looked up
    pub barcode: String,
    /// Mean sold price with two decimals
    #[oai(rename = "avgPrice")]
    pub avg_price: String,
    /// Number of sold listings that had a usable price
    #[oai(rename = "soldCount")]
    pub sold_count: u64,
    /// Recommendation tier
    pub tier: RecommendationTierDto,
}

impl LookupResponseBody {
    pub fn new(barcode: impl Into<String>, summary: &PriceSummary) -> Self {
        Self {
            barcode: barcode.into(),
            avg_price: summary.average.to_string(),
            sold_count: summary.sold_count as u64,
            tier: summary.tier.into(),
        }
    }
}
