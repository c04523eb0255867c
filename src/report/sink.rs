//! Result sink contract and the bridge's recording sink.

use super::Outcome;
use crate::decode::ScanResult;
use std::cell::RefCell;
use std::rc::Rc;

/// The single channel through which a session reports its outcome.
///
/// Each method is terminal: the session guarantees at most one call
/// across all three, so a sink need not deduplicate. A host-facing sink
/// is also the place to release any session-scoped registration and to
/// signal the surrounding UI to return to the view that initiated the
/// scan.
pub trait ResultSink {
    /// Delivers a recognized barcode.
    fn report_success(&mut self, result: ScanResult);

    /// Delivers a device-initialization failure message.
    fn report_error(&mut self, message: &str);

    /// Signals silent cancellation; the caller's request is dropped.
    fn report_cancelled(&mut self);
}

/// A sink that records the outcome for the bridge to return.
///
/// Clones share one slot; the first delivery wins, which keeps the slot
/// well-defined even if a misbehaving session were to report twice.
#[derive(Debug, Clone, Default)]
pub struct OutcomeSlot(Rc<RefCell<Option<Outcome>>>);

impl OutcomeSlot {
    /// Creates an empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes the recorded outcome, if any.
    pub fn take(&self) -> Option<Outcome> {
        self.0.borrow_mut().take()
    }

    fn record(&self, outcome: Outcome) {
        let mut slot = self.0.borrow_mut();
        if slot.is_none() {
            *slot = Some(outcome);
        }
    }
}

impl ResultSink for OutcomeSlot {
    fn report_success(&mut self, result: ScanResult) {
        self.record(Outcome::Success(result));
    }

    fn report_error(&mut self, message: &str) {
        self.record(Outcome::Error(message.to_owned()));
    }

    fn report_cancelled(&mut self) {
        self.record(Outcome::Cancelled);
    }
}
