//! Record tracing events in memory.
//!
//! Install the layer from [`Capture::layer`] in a subscriber, run the code
//! under observation, then inspect [`Capture::records`]. Each event is stored
//! as a [`logfmt::RenderedLog`]. Tests use this to assert that a diagnostic
//! was emitted, and how many times.

use std::sync::Arc;

use logfmt::RenderedLog;
use parking_lot::Mutex;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer};

/// Shared store of captured events.
#[derive(Debug, Clone, Default)]
pub struct Capture {
    /// Events in emission order.
    records: Arc<Mutex<Vec<RenderedLog>>>,
}

impl Capture {
    /// An empty capture.
    pub fn new() -> Self {
        Self::default()
    }

    /// A layer appending every event it sees to this capture.
    pub fn layer(&self) -> CaptureLayer {
        CaptureLayer {
            records: Arc::clone(&self.records),
        }
    }

    /// Snapshot of the captured events.
    pub fn records(&self) -> Vec<RenderedLog> {
        self.records.lock().clone()
    }

    /// Messages of captured events at `level`.
    pub fn messages_at(&self, level: Level) -> Vec<String> {
        let level = level.to_string();
        self.records
            .lock()
            .iter()
            .filter(|r| r.level == level)
            .map(|r| r.message.clone())
            .collect()
    }

    /// Number of captured events whose message contains `needle`.
    pub fn count_containing(&self, needle: &str) -> usize {
        self.records
            .lock()
            .iter()
            .filter(|r| r.message.contains(needle))
            .count()
    }

    /// Drop everything captured so far.
    pub fn clear(&self) {
        self.records.lock().clear();
    }
}

/// Tracing layer feeding a [`Capture`].
#[derive(Debug, Clone)]
pub struct CaptureLayer {
    /// Destination store.
    records: Arc<Mutex<Vec<RenderedLog>>>,
}

impl<S> Layer<S> for CaptureLayer
where
    S: Subscriber,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let rendered = logfmt::render_event(event);
        self.records.lock().push(rendered);
    }
}
