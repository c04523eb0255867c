//! Barcode Scan Session Controller
//!
//! Exposes a device camera as a barcode-scanning service: a caller
//! requests a scan, live preview frames are sampled at a fixed interval
//! and decoded until a barcode is recognized or the user cancels, and
//! exactly one outcome is handed back.
//!
//! # Architecture
//!
//! The system follows an explicit event flow:
//!
//! ```text
//! capture (frame source) --completions--> session --outcome--> report
//!                        <--focus/frames--   |
//!                                            v
//!                                          decode
//! ```
//!
//! # Design Principles
//!
//! - **Single resolution**: exactly one success-or-error-or-cancel
//!   delivery per session, under every event interleaving
//! - **Serialized events**: device completions, timer ticks, and
//!   cancellation are applied on one logical execution context, so the
//!   session needs no locks
//! - **Bounded polling**: frames are decoded on a fixed-interval timer;
//!   ticks are skipped, never queued
//! - **Unconditional release**: the camera and pixel buffer are freed
//!   on every exit path, cancellation included
//!
//! # Example
//!
//! ```
//! use barcode_scan::capture::{MockFrameSource, ScanConfig};
//! use barcode_scan::decode::{ScanResult, ScriptedDecoder};
//! use barcode_scan::report::scan;
//! use barcode_scan::session::channel;
//!
//! // Wire the event channel: completions flow from the frame source,
//! // the handle stays with the caller for cancellation.
//! let (handle, events) = channel();
//! let completions = handle.completions();
//! let mut source = MockFrameSource::ready(640, 480);
//! source.on_completion(move |ev| completions.deliver(ev));
//!
//! // One miss, then a hit on the second sampled frame.
//! let decoder = ScriptedDecoder::new(vec![
//!     None,
//!     Some(ScanResult::new("978020137962", "EAN_13")),
//! ]);
//!
//! let config = ScanConfig {
//!     poll_interval_ms: 5,
//!     ..Default::default()
//! };
//! let outcome = scan(source, decoder, events, &config);
//! assert!(outcome.is_success());
//! # drop(handle);
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod capture;
pub mod decode;
pub mod report;
pub mod session;

// Re-export commonly used types at crate root
pub use capture::{FrameBuffer, FrameSource, FrameSourceEvent, MockFrameSource, ScanConfig};
pub use decode::{DecodeOptions, Decoder, ScanResult, ScriptedDecoder};
pub use report::{scan, Outcome, ResultSink};
pub use session::{channel, drive, ScanHandle, ScanSession, SessionEvent, SessionState};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
