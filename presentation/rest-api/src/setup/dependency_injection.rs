use std::sync::Arc;

use logger::TracingLogger;
use persistence::history::local::JsonFileHistoryRepository;
use persistence::history::remote::ScanBatchStorePostgres;

use ebay::client::EbayClient;
use ebay::sold_listings::SoldListingsEbay;

use business::application::history::buffer::load_history;
use business::application::history::flush::FlushHistoryUseCaseImpl;
use business::application::history::get_all::GetHistoryUseCaseImpl;
use business::application::history::record::RecordScanUseCaseImpl;
use business::application::pricing::lookup::LookupPriceUseCaseImpl;
use business::domain::history::repository::ScanBatchStore;

use crate::config::app_config::AppConfig;

pub struct DependencyContainer {
    pub health_api: crate::api::health::routes::HealthApi,
    pub lookup_api: crate::api::lookup::routes::LookupApi,
    pub history_api: crate::api::history::routes::HistoryApi,
}

impl DependencyContainer {
    pub async fn new(config: &AppConfig, pool: Option<sqlx::PgPool>) -> anyhow::Result<Self> {
        let logger = Arc::new(TracingLogger::new("rest-api"));
        let health_api = crate::api::health::routes::HealthApi::new();

        // Infrastructure adapters
        let mut ebay_client = EbayClient::new(config.ebay.app_id.clone(), config.ebay.timeout)?
            .with_global_id(config.ebay.global_id.clone());
        if let Some(base_url) = &config.ebay.base_url {
            ebay_client = ebay_client.with_base_url(base_url.clone());
        }
        let sold_listings = Arc::new(SoldListingsEbay::new(ebay_client));

        let history_repository = Arc::new(JsonFileHistoryRepository::new(&config.history.dir));
        let remote: Option<Arc<dyn ScanBatchStore>> = pool
            .map(|pool| Arc::new(ScanBatchStorePostgres::new(pool)) as Arc<dyn ScanBatchStore>);

        let buffer = load_history(
            history_repository.as_ref(),
            config.history.settings,
            logger.as_ref(),
        )
        .await?;

        // Pricing use cases
        let lookup_use_case = Arc::new(LookupPriceUseCaseImpl {
            listings: sold_listings,
            settings: config.ebay.lookup,
            logger: logger.clone(),
        });

        // History use cases
        let get_history_use_case = Arc::new(GetHistoryUseCaseImpl {
            buffer: buffer.clone(),
            logger: logger.clone(),
        });
        let record_use_case = Arc::new(RecordScanUseCaseImpl {
            buffer: buffer.clone(),
            repository: history_repository.clone(),
            logger: logger.clone(),
        });
        let flush_use_case = Arc::new(FlushHistoryUseCaseImpl {
            buffer,
            repository: history_repository,
            remote,
            logger,
        });

        let lookup_api = crate::api::lookup::routes::LookupApi::new(lookup_use_case);
        let history_api = crate::api::history::routes::HistoryApi::new(
            get_history_use_case,
            record_use_case,
            flush_use_case,
        );

        Ok(Self {
            health_api,
            lookup_api,
            history_api,
        })
    }
}
