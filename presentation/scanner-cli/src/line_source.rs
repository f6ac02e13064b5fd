use async_trait::async_trait;
use std::io::BufRead;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::{Mutex, mpsc};

use business::domain::scan::errors::ScanError;
use business::domain::scan::source::{DetectionEvent, ScanSource};

const QUEUE_CAPACITY: usize = 16;

/// Manual-entry scan source: every input line is one detection.
///
/// Lines are read on a dedicated OS thread, never on the runtime's blocking
/// pool, so a pending read cannot hold up shutdown. Lines that arrive while
/// the source is stopped are dropped on the floor.
pub struct LineScanSource {
    active: Arc<AtomicBool>,
    lines: Mutex<mpsc::Receiver<String>>,
}

impl LineScanSource {
    pub fn stdin() -> std::io::Result<Self> {
        Self::new(std::io::BufReader::new(std::io::stdin()))
    }

    pub fn new<R>(reader: R) -> std::io::Result<Self>
    where
        R: BufRead + Send + 'static,
    {
        let active = Arc::new(AtomicBool::new(false));
        let (sender, receiver) = mpsc::channel(QUEUE_CAPACITY);
        let reader_active = active.clone();
        std::thread::Builder::new()
            .name("scanner-input".to_string())
            .spawn(move || read_lines(reader, reader_active, sender))?;

        Ok(Self {
            active,
            lines: Mutex::new(receiver),
        })
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    fn drain(&self) {
        if let Ok(mut lines) = self.lines.try_lock() {
            while lines.try_recv().is_ok() {}
        }
    }
}

fn read_lines<R: BufRead>(reader: R, active: Arc<AtomicBool>, sender: mpsc::Sender<String>) {
    for line in reader.lines() {
        match line {
            Ok(_) if !active.load(Ordering::SeqCst) => {
                tracing::debug!("Scanner idle, discarding input");
            }
            Ok(line) => {
                if sender.blocking_send(line).is_err() {
                    break;
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "Reading scanner input failed");
                break;
            }
        }
    }
}

#[async_trait]
impl ScanSource for LineScanSource {
    async fn start(&self) -> Result<(), ScanError> {
        self.drain();
        self.active.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn next_detection(&self) -> Option<DetectionEvent> {
        self.lines.lock().await.recv().await.map(DetectionEvent::new)
    }

    fn stop(&self) {
        self.active.store(false, Ordering::SeqCst);
        self.drain();
    }
}
