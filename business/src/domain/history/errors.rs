#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    #[error("history.barcode_empty")]
    BarcodeEmpty,
    #[error("history.invalid_settings")]
    InvalidSettings,
    /// Local or remote write failed. The buffer is left untouched.
    #[error("history.persistence_failed")]
    PersistenceFailed(#[from] crate::domain::errors::RepositoryError),
}
