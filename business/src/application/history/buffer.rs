use std::sync::Arc;

use tokio::sync::Mutex;

use crate::domain::history::errors::HistoryError;
use crate::domain::history::model::{HistoryLog, HistorySettings};
use crate::domain::history::repository::HistoryRepository;
use crate::domain::logger::Logger;

/// The single in-memory history log. Every mutation goes through this lock.
pub type HistoryBuffer = Arc<Mutex<HistoryLog>>;

/// Reads the persisted log once at startup.
pub async fn load_history(
    repository: &dyn HistoryRepository,
    settings: HistorySettings,
    logger: &dyn Logger,
) -> Result<HistoryBuffer, HistoryError> {
    let entries = repository.load().await?;
    let stored = entries.len();
    let log = HistoryLog::restore(entries, settings);

    if stored > log.len() {
        logger.warn(&format!(
            "Stored history had {} entries, keeping the newest {}",
            stored,
            log.len()
        ));
    }
    logger.info(&format!("Loaded {} history entries", log.len()));

    Ok(Arc::new(Mutex::new(log)))
}
