use anyhow::Context;
use std::{fmt::Display, path::PathBuf, str::FromStr, time::Duration};

use business::domain::history::model::{DEFAULT_BATCH_SIZE, DEFAULT_MAX_ENTRIES, HistorySettings};
use business::domain::pricing::settings::{
    DEFAULT_PAGE_SIZE, DEFAULT_WINDOW_MONTHS, LookupSettings,
};
use ebay::client::{DEFAULT_GLOBAL_ID, DEFAULT_TIMEOUT_SECS};
use persistence::db::DEFAULT_MIGRATIONS_PATH;
use persistence::history::local::DEFAULT_HISTORY_DIR;

/// Scanner settings, read from the same variables as the HTTP service.
#[derive(Debug)]
pub struct ScannerConfig {
    pub app_id: String,
    pub base_url: Option<String>,
    pub global_id: String,
    pub timeout: Duration,
    pub lookup: LookupSettings,
    pub history_dir: PathBuf,
    pub history: HistorySettings,
    pub database_url: Option<String>,
    pub migrations_path: String,
}

impl ScannerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Builds the config from any variable source. Blank values count as unset.
    pub fn from_vars<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let vars = Vars(lookup);

        Ok(Self {
            app_id: vars.optional("EBAY_APP_ID").context("EBAY_APP_ID must be set")?,
            base_url: vars.optional("EBAY_BASE_URL"),
            global_id: vars.or("EBAY_GLOBAL_ID", DEFAULT_GLOBAL_ID),
            timeout: Duration::from_secs(vars.parse_or("EBAY_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?),
            lookup: LookupSettings::new(
                vars.parse_or("LOOKUP_WINDOW_MONTHS", DEFAULT_WINDOW_MONTHS)?,
                vars.parse_or("LOOKUP_PAGE_SIZE", DEFAULT_PAGE_SIZE)?,
            ),
            history_dir: PathBuf::from(vars.or("HISTORY_DIR", DEFAULT_HISTORY_DIR)),
            history: HistorySettings::new(
                vars.parse_or("HISTORY_MAX_ENTRIES", DEFAULT_MAX_ENTRIES)?,
                vars.parse_or("HISTORY_BATCH_SIZE", DEFAULT_BATCH_SIZE)?,
            )?,
            database_url: vars.optional("DATABASE_URL"),
            migrations_path: vars.or("MIGRATIONS_PATH", DEFAULT_MIGRATIONS_PATH),
        })
    }
}

struct Vars<F>(F);

impl<F: Fn(&str) -> Option<String>> Vars<F> {
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    }

    fn or(&self, key: &str, default: &str) -> String {
        self.optional(key).unwrap_or_else(|| default.to_string())
    }

    fn parse_or<T>(&self, key: &str, default: T) -> anyhow::Result<T>
    where
        T: FromStr,
        T::Err: Display,
    {
        match self.optional(key) {
            Some(raw) => raw
                .parse()
                .map_err(|e: T::Err| anyhow::anyhow!("{}", e))
                .with_context(|| format!("{} has an invalid value: {}", key, raw)),
            None => Ok(default),
        }
    }
}
