//! Outcome delivery back to the calling application.
//!
//! Exactly one outcome crosses the session boundary per scan: a decoded
//! barcode, a device-initialization error, or a silent cancellation.
//! This module owns the outcome type, the sink contract the session
//! reports through, and the bridge entry point a host shell binds to.

mod bridge;
mod outcome;
mod sink;

pub use bridge::scan;
pub use outcome::Outcome;
pub use sink::{OutcomeSlot, ResultSink};
