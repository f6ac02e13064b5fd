#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    /// No barcode was supplied. Raised before any network call.
    #[error("lookup.missing_input")]
    MissingInput,
    /// Transport failure, timeout, non-success status or unreadable body.
    #[error("lookup.failed")]
    LookupFailed,
}
