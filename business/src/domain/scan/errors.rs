#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// The scan source could not be started (no camera, permission denied, ...).
    #[error("scan.source_unavailable: {0}")]
    SourceUnavailable(String),
}
