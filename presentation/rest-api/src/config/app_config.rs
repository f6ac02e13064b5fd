use super::{
    cors_config, ebay_config::EbayConfig, history_config::HistoryConfig,
    server_config::ServerConfig,
};
use poem::middleware::Cors;

pub struct AppConfig {
    pub server: ServerConfig,
    pub cors: Cors,
    pub ebay: EbayConfig,
    pub history: HistoryConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            server: ServerConfig::from_env()?,
            cors: cors_config::init_cors(),
            ebay: EbayConfig::from_env()?,
            history: HistoryConfig::from_env()?,
        })
    }
}
