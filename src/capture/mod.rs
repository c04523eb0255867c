//! Camera input and preview-frame handling.
//!
//! This module provides the abstractions the scan session consumes: a
//! trait-based frame source wrapping the camera device, the reusable
//! pixel buffer frames are sampled into, and the scan configuration.

mod buffer;
mod config;
mod source;

pub use buffer::FrameBuffer;
pub use config::{ConfigError, FileConfig, ScanConfig};
pub use source::{FrameSource, FrameSourceError, FrameSourceEvent, MockFrameSource, MockProbe};
