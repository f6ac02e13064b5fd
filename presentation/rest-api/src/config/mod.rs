pub mod app_config;
pub mod cors_config;
pub mod database_config;
pub mod ebay_config;
pub mod env;
pub mod history_config;
pub mod server_config;
