//! Capture progress events.
//!
//! The pipeline emits an ordered stream of stage events; nothing in the core
//! depends on how (or whether) they are consumed.

use crate::resolve::AssetCounts;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureEvent {
    PageFetchStarted { url: String },
    AssetsDiscovered { total: usize },
    /// Sent after each successful asset download.
    AssetProgress { downloaded: usize, total: usize },
    Rewriting,
    Completed { counts: AssetCounts, total_bytes: u64 },
    Failed { reason: String },
}

/// Receives capture events in order.
pub trait CaptureObserver {
    fn on_event(&mut self, event: &CaptureEvent);
}

/// No-op observer.
impl CaptureObserver for () {
    fn on_event(&mut self, _event: &CaptureEvent) {}
}

impl<F: FnMut(&CaptureEvent)> CaptureObserver for F {
    fn on_event(&mut self, event: &CaptureEvent) {
        self(event)
    }
}

impl CaptureObserver for std::sync::mpsc::Sender<CaptureEvent> {
    fn on_event(&mut self, event: &CaptureEvent) {
        // Receiver gone means nobody is listening; the capture carries on.
        let _ = self.send(event.clone());
    }
}
