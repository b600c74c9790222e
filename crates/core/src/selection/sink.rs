//! Selection sink trait and implementations.

use log::debug;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use super::Selection;

/// Trait for observing selection changes.
///
/// # Design Rules
///
/// - `selection_changed()` must be fast and non-blocking (no network calls)
/// - Implementations queue the selection and act on it later
/// - Failure to deliver must not affect the selection itself (best-effort)
pub trait SelectionSink: Send + Sync {
    /// Called once per distinct selection value, after it became current.
    fn selection_changed(&self, selection: &Selection);
}

/// No-op implementation for contexts that don't react to selections.
#[derive(Clone, Default)]
pub struct NoOpSelectionSink;

impl SelectionSink for NoOpSelectionSink {
    fn selection_changed(&self, _selection: &Selection) {}
}

/// Queues selections on an unbounded channel for a dispatcher to drain.
#[derive(Clone)]
pub struct ChannelSelectionSink {
    tx: UnboundedSender<Selection>,
}

impl ChannelSelectionSink {
    /// Create the sink together with the receiving end of its queue.
    pub fn new() -> (Self, UnboundedReceiver<Selection>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl SelectionSink for ChannelSelectionSink {
    fn selection_changed(&self, selection: &Selection) {
        if self.tx.send(selection.clone()).is_err() {
            debug!("Selection queue closed, dropping {}", selection);
        }
    }
}
