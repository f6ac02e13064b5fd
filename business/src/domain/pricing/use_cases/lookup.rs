use async_trait::async_trait;

use crate::domain::pricing::errors::LookupError;
use crate::domain::pricing::model::PriceSummary;

pub struct LookupPriceParams {
    pub barcode: String,
}

#[async_trait]
pub trait LookupPriceUseCase: Send + Sync {
    async fn execute(&self, params: LookupPriceParams) -> Result<PriceSummary, LookupError>;
}
