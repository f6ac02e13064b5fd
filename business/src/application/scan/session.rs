use std::sync::Arc;

use crate::domain::history::use_cases::flush::FlushHistoryUseCase;
use crate::domain::history::use_cases::record::{RecordScanParams, RecordScanUseCase};
use crate::domain::logger::Logger;
use crate::domain::pricing::errors::LookupError;
use crate::domain::pricing::model::{PriceSummary, UNAVAILABLE_PRICE};
use crate::domain::pricing::use_cases::lookup::{LookupPriceParams, LookupPriceUseCase};
use crate::domain::scan::errors::ScanError;
use crate::domain::scan::source::ScanSource;
use crate::domain::scan::state::{ScanEvent, ScanState};

/// What one scan cycle produced.
#[derive(Debug)]
pub enum ScanOutcome {
    /// The lookup succeeded. `saved` is false when the history write failed.
    Priced {
        barcode: String,
        summary: PriceSummary,
        saved: bool,
    },
    /// The lookup failed; show the fallback values.
    Failed { barcode: String, error: LookupError },
    /// The source ended before yielding a usable code.
    Exhausted,
}

impl ScanOutcome {
    /// Average to display: two decimals, or `N/A` when the lookup failed.
    pub fn display_price(&self) -> String {
        match self {
            ScanOutcome::Priced { summary, .. } => summary.average.to_string(),
            _ => UNAVAILABLE_PRICE.to_string(),
        }
    }

    pub fn display_count(&self) -> usize {
        match self {
            ScanOutcome::Priced { summary, .. } => summary.sold_count,
            _ => 0,
        }
    }
}

/// Stops the source when dropped, whichever way the scan cycle ends.
struct ActiveSource(Arc<dyn ScanSource>);

impl Drop for ActiveSource {
    fn drop(&mut self) {
        self.0.stop();
    }
}

/// Drives a scan source through the scanner state machine.
///
/// Each cycle accepts at most one code and runs at most one lookup. The
/// source is stopped as soon as a code is accepted, so nothing it detects
/// while the lookup is in flight reaches the session.
pub struct ScanSession {
    source: Arc<dyn ScanSource>,
    lookup: Arc<dyn LookupPriceUseCase>,
    record: Arc<dyn RecordScanUseCase>,
    flush: Arc<dyn FlushHistoryUseCase>,
    logger: Arc<dyn Logger>,
    state: ScanState,
}

impl ScanSession {
    pub fn new(
        source: Arc<dyn ScanSource>,
        lookup: Arc<dyn LookupPriceUseCase>,
        record: Arc<dyn RecordScanUseCase>,
        flush: Arc<dyn FlushHistoryUseCase>,
        logger: Arc<dyn Logger>,
    ) -> Self {
        Self {
            source,
            lookup,
            record,
            flush,
            logger,
            state: ScanState::Idle,
        }
    }

    pub fn state(&self) -> ScanState {
        self.state
    }

    fn apply(&mut self, event: ScanEvent) -> bool {
        match self.state.next(event) {
            Some(next) => {
                self.logger
                    .debug(&format!("Scanner {} -> {} on {:?}", self.state, next, event));
                self.state = next;
                true
            }
            None => {
                self.logger
                    .debug(&format!("Scanner ignored {:?} while {}", event, self.state));
                false
            }
        }
    }

    /// Runs one scan cycle: start the source, wait for a code, look it up,
    /// record the result and try a history flush.
    pub async fn run_once(&mut self) -> Result<ScanOutcome, ScanError> {
        self.apply(ScanEvent::Start);

        if let Err(err) = self.source.start().await {
            self.source.stop();
            self.apply(ScanEvent::SourceFailed);
            self.logger.error(&format!("Scan source failed to start: {}", err));
            return Err(err);
        }
        let active = ActiveSource(self.source.clone());

        let barcode = loop {
            match self.source.next_detection().await {
                Some(event) => match event.candidate() {
                    Some(code) => break code.to_string(),
                    None => self.logger.debug("Ignoring empty detection"),
                },
                None => {
                    drop(active);
                    self.apply(ScanEvent::Stop);
                    self.logger.info("Scan source exhausted");
                    return Ok(ScanOutcome::Exhausted);
                }
            }
        };

        drop(active);
        self.apply(ScanEvent::Detected);
        self.logger.info(&format!("Detected barcode {}", barcode));

        let outcome = match self
            .lookup
            .execute(LookupPriceParams {
                barcode: barcode.clone(),
            })
            .await
        {
            Ok(summary) => {
                self.apply(ScanEvent::LookupSucceeded);
                let saved = self.save(&barcode, &summary).await;
                ScanOutcome::Priced {
                    barcode,
                    summary,
                    saved,
                }
            }
            Err(error) => {
                self.apply(ScanEvent::LookupFailed);
                self.logger
                    .warn(&format!("Lookup failed for {}: {}", barcode, error));
                ScanOutcome::Failed { barcode, error }
            }
        };

        Ok(outcome)
    }

    async fn save(&self, barcode: &str, summary: &PriceSummary) -> bool {
        let recorded = self
            .record
            .execute(RecordScanParams {
                barcode: barcode.to_string(),
                average: summary.average,
                sold_count: summary.sold_count,
            })
            .await;

        if let Err(err) = recorded {
            self.logger
                .error(&format!("Could not save {} to history: {}", barcode, err));
            return false;
        }

        match self.flush.execute().await {
            Ok(outcome) => self.logger.debug(&format!("History flush: {}", outcome)),
            Err(err) => self
                .logger
                .warn(&format!("History flush failed, will retry later: {}", err)),
        }

        true
    }

    /// Returns the scanner to idle and releases the source.
    pub fn stop(&mut self) {
        self.source.stop();
        self.apply(ScanEvent::Stop);
    }
}

impl Drop for ScanSession {
    fn drop(&mut self) {
        self.source.stop();
    }
}
