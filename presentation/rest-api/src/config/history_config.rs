use std::path::PathBuf;

use business::domain::history::model::{DEFAULT_BATCH_SIZE, DEFAULT_MAX_ENTRIES, HistorySettings};
use persistence::history::local::DEFAULT_HISTORY_DIR;

use super::env;

pub struct HistoryConfig {
    pub dir: PathBuf,
    pub settings: HistorySettings,
}

impl HistoryConfig {
    /// Environment variables:
    /// - HISTORY_DIR: Directory of the history file (default: "./data")
    /// - HISTORY_MAX_ENTRIES: Local buffer cap (default: 50)
    /// - HISTORY_BATCH_SIZE: Entries needed before a remote flush (default: 10)
    pub fn from_env() -> anyhow::Result<Self> {
        let dir = env::optional("HISTORY_DIR").unwrap_or_else(|| DEFAULT_HISTORY_DIR.to_string());
        let settings = HistorySettings::new(
            env::parse_or("HISTORY_MAX_ENTRIES", DEFAULT_MAX_ENTRIES)?,
            env::parse_or("HISTORY_BATCH_SIZE", DEFAULT_BATCH_SIZE)?,
        )?;

        Ok(Self {
            dir: PathBuf::from(dir),
            settings,
        })
    }
}
