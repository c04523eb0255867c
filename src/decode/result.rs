//! Decoded barcode value.

use serde::Serialize;

/// A successfully decoded barcode.
///
/// Immutable; produced at most once per session and handed wholesale to
/// the result sink. Serializes to the `{"text": ..., "format": ...}`
/// shape the calling application expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanResult {
    text: String,
    format: String,
}

impl ScanResult {
    /// Creates a result from the decoder's text and symbology name.
    ///
    /// The format is the decoder's free-text symbology identifier
    /// (e.g. `QR_CODE`, `EAN_13`, `CODE_128`), passed through unmodified.
    pub fn new(text: impl Into<String>, format: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            format: format.into(),
        }
    }

    /// The decoded barcode text.
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The symbology name reported by the decoder.
    #[inline]
    pub fn format(&self) -> &str {
        &self.format
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_to_plugin_shape() {
        let result = ScanResult::new("123456789012", "EAN_13");
        let json = serde_json::to_string(&result).unwrap();
        assert_eq!(json, r#"{"text":"123456789012","format":"EAN_13"}"#);
    }
}
