//! Barcode decoding contract.
//!
//! The decoding algorithm itself is an opaque collaborator: given a
//! pixel buffer it either confidently recognizes a barcode or yields
//! nothing. A frame with no barcode is an expected, frequent outcome,
//! never a fault condition for the session.

mod decoder;
mod result;

pub use decoder::{DecodeOptions, Decoder, ScriptedDecoder};
pub use result::ScanResult;
