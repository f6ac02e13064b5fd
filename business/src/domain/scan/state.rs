/// Scanner states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    Idle,
    Scanning,
    Processing,
    Success,
    Error,
}

/// Inputs that drive the scanner state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanEvent {
    Start,
    Detected,
    LookupSucceeded,
    LookupFailed,
    SourceFailed,
    Stop,
}

impl std::fmt::Display for ScanState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScanState::Idle => write!(f, "idle"),
            ScanState::Scanning => write!(f, "scanning"),
            ScanState::Processing => write!(f, "processing"),
            ScanState::Success => write!(f, "success"),
            ScanState::Error => write!(f, "error"),
        }
    }
}

impl ScanState {
    /// Transition table. `None` means the event is not accepted in this state
    /// and must be ignored, e.g. a detection while a lookup is in flight.
    pub fn next(self, event: ScanEvent) -> Option<ScanState> {
        use ScanEvent::*;
        use ScanState::*;

        match (self, event) {
            (Idle | Success | Error, Start) => Some(Scanning),
            (Scanning, Detected) => Some(Processing),
            (Scanning, Stop) => Some(Idle),
            (Scanning, SourceFailed) => Some(Error),
            (Processing, LookupSucceeded) => Some(Success),
            (Processing, LookupFailed) => Some(Error),
            (Success | Error, Stop) => Some(Idle),
            _ => None,
        }
    }
}
