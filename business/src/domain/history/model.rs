use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::errors::HistoryError;
use crate::domain::pricing::model::AveragePrice;

pub const DEFAULT_MAX_ENTRIES: usize = 50;
pub const DEFAULT_BATCH_SIZE: usize = 10;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Outcome of one completed price lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanResult {
    pub barcode: String,
    pub avg_price: String,
    pub sold_count: usize,
    pub timestamp: String,
}

impl ScanResult {
    pub fn new(
        barcode: impl Into<String>,
        average: AveragePrice,
        sold_count: usize,
        at: DateTime<Utc>,
    ) -> Self {
        Self {
            barcode: barcode.into(),
            avg_price: average.to_string(),
            sold_count,
            timestamp: at.format(TIMESTAMP_FORMAT).to_string(),
        }
    }
}

/// Result of a flush attempt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FlushOutcome {
    /// Fewer entries than the batch size; nothing sent.
    BelowThreshold,
    /// No remote store configured; entries stay local.
    SyncDisabled,
    /// This many entries were written remotely and cleared locally.
    Flushed(usize),
}

impl std::fmt::Display for FlushOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FlushOutcome::BelowThreshold => write!(f, "below_threshold"),
            FlushOutcome::SyncDisabled => write!(f, "sync_disabled"),
            FlushOutcome::Flushed(_) => write!(f, "flushed"),
        }
    }
}

/// Size limits of the local history buffer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistorySettings {
    pub max_entries: usize,
    pub batch_size: usize,
}

impl HistorySettings {
    /// Requires `1 <= batch_size <= max_entries`, otherwise a flush could never trigger.
    pub fn new(max_entries: usize, batch_size: usize) -> Result<Self, HistoryError> {
        if max_entries == 0 || batch_size == 0 || batch_size > max_entries {
            return Err(HistoryError::InvalidSettings);
        }
        Ok(Self {
            max_entries,
            batch_size,
        })
    }
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_MAX_ENTRIES,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

/// Most-recent-first buffer of scan results, bounded to `max_entries`.
#[derive(Debug, Clone)]
pub struct HistoryLog {
    entries: Vec<ScanResult>,
    settings: HistorySettings,
}

impl HistoryLog {
    pub fn new(settings: HistorySettings) -> Self {
        Self {
            entries: Vec::new(),
            settings,
        }
    }

    /// Rebuilds a log from persisted entries, dropping anything past the cap.
    pub fn restore(mut entries: Vec<ScanResult>, settings: HistorySettings) -> Self {
        entries.truncate(settings.max_entries);
        Self { entries, settings }
    }

    /// Prepends a result and returns the number of evicted entries.
    pub fn record(&mut self, result: ScanResult) -> usize {
        self.entries.insert(0, result);
        let evicted = self.entries.len().saturating_sub(self.settings.max_entries);
        self.entries.truncate(self.settings.max_entries);
        evicted
    }

    pub fn is_flush_due(&self) -> bool {
        self.entries.len() >= self.settings.batch_size
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[ScanResult] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
