use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use business::domain::errors::RepositoryError;
use business::domain::history::model::ScanResult;
use business::domain::history::repository::HistoryRepository;

/// Storage key of the history blob. The file is `<dir>/<key>.json`.
pub const HISTORY_KEY: &str = "flipscan-history";
pub const DEFAULT_HISTORY_DIR: &str = "./data";

/// History kept as a single JSON array on disk, most recent first.
///
/// Writes go to a sibling temp file that is renamed over the target, so a
/// crash mid-write leaves the previous blob intact.
pub struct JsonFileHistoryRepository {
    path: PathBuf,
}

impl JsonFileHistoryRepository {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(format!("{}.json", HISTORY_KEY)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        self.path.with_extension("json.tmp")
    }
}

#[async_trait]
impl HistoryRepository for JsonFileHistoryRepository {
    async fn load(&self) -> Result<Vec<ScanResult>, RepositoryError> {
        let raw = match tokio::fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                tracing::error!(path = %self.path.display(), error = %e, "history read failed");
                return Err(RepositoryError::persistence());
            }
        };

        serde_json::from_slice(&raw).map_err(|e| {
            tracing::error!(path = %self.path.display(), error = %e, "history blob is not valid JSON");
            RepositoryError::serialization()
        })
    }

    async fn replace(&self, entries: &[ScanResult]) -> Result<(), RepositoryError> {
        let body = serde_json::to_vec(entries).map_err(|_| RepositoryError::serialization())?;

        if let Some(dir) = self.path.parent() {
            tokio::fs::create_dir_all(dir)
                .await
                .map_err(|_| RepositoryError::persistence())?;
        }

        let temp = self.temp_path();
        tokio::fs::write(&temp, body).await.map_err(|e| {
            tracing::error!(path = %temp.display(), error = %e, "history write failed");
            RepositoryError::persistence()
        })?;
        tokio::fs::rename(&temp, &self.path).await.map_err(|e| {
            tracing::error!(path = %self.path.display(), error = %e, "history rename failed");
            RepositoryError::persistence()
        })?;

        tracing::debug!(entries = entries.len(), "history saved");
        Ok(())
    }
}
