//! Decoder trait and scripted test double.

use super::ScanResult;
use crate::capture::FrameBuffer;
use std::collections::VecDeque;

/// Decode-effort settings for concrete decoder implementations.
#[derive(Debug, Clone, Copy)]
pub struct DecodeOptions {
    /// Spend more time per frame for a better hit rate on small or
    /// blurry symbols, at the cost of frame rate.
    pub try_harder: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self { try_harder: true }
    }
}

/// Trait for barcode decoders.
///
/// `decode` inspects a single frame and returns a result only when a
/// barcode is confidently recognized. Implementations may keep internal
/// scratch state between calls but must not otherwise depend on call
/// history: a miss is `None`, never an error.
pub trait Decoder {
    /// Attempts to decode a barcode from one preview frame.
    fn decode(&mut self, buffer: &FrameBuffer) -> Option<ScanResult>;
}

/// Scripted decoder for testing.
///
/// Yields the scripted responses in order, then misses forever.
#[derive(Debug, Default)]
pub struct ScriptedDecoder {
    script: VecDeque<Option<ScanResult>>,
}

impl ScriptedDecoder {
    /// Creates a decoder that answers successive frames from `script`.
    pub fn new(script: Vec<Option<ScanResult>>) -> Self {
        Self {
            script: script.into(),
        }
    }

    /// A decoder that never recognizes anything.
    pub fn never() -> Self {
        Self::default()
    }
}

impl Decoder for ScriptedDecoder {
    fn decode(&mut self, _buffer: &FrameBuffer) -> Option<ScanResult> {
        self.script.pop_front().flatten()
    }
}
