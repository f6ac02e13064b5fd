use async_trait::async_trait;

use super::errors::ScanError;

/// One decode attempt reported by the scan source.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectionEvent {
    pub code: Option<String>,
}

impl DetectionEvent {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
        }
    }

    pub fn empty() -> Self {
        Self { code: None }
    }

    /// The detected code when it is usable as a lookup candidate.
    pub fn candidate(&self) -> Option<&str> {
        self.code
            .as_deref()
            .map(str::trim)
            .filter(|code| !code.is_empty())
    }
}

/// Port for anything that yields barcodes: a camera decoder, manual entry, a test feed.
///
/// The source holds a scoped resource between `start` and `stop`.
/// `stop` must be idempotent and must release the resource. Anything
/// detected while stopped is discarded, not queued for the next `start`.
#[async_trait]
pub trait ScanSource: Send + Sync {
    async fn start(&self) -> Result<(), ScanError>;
    /// Waits for the next detection. `None` once the source is exhausted.
    async fn next_detection(&self) -> Option<DetectionEvent>;
    fn stop(&self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_only_accept_non_empty_codes() {
        assert_eq!(DetectionEvent::new(" 123 ").candidate(), Some("123"));
        assert_eq!(DetectionEvent::new("   ").candidate(), None);
        assert_eq!(DetectionEvent::empty().candidate(), None);
    }
}
