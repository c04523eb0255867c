//! Terminal outcome of a scan session.

use crate::decode::ScanResult;

/// The single terminal delivery of a scan session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A barcode was recognized.
    Success(ScanResult),
    /// The device could not be initialized; human-readable message.
    Error(String),
    /// The user dismissed the scan view. No payload.
    Cancelled,
}

impl Outcome {
    /// Returns true for a successful scan.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Serializes the outcome for the host transport.
    ///
    /// Success yields the `{"text": ..., "format": ...}` JSON object,
    /// an error yields its raw message string, and cancellation yields
    /// nothing: the caller's pending request is simply dropped.
    pub fn payload(&self) -> Result<Option<String>, serde_json::Error> {
        match self {
            Self::Success(result) => serde_json::to_string(result).map(Some),
            Self::Error(message) => Ok(Some(message.clone())),
            Self::Cancelled => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_payload_is_json() {
        let outcome = Outcome::Success(ScanResult::new("978020137962", "EAN_13"));
        assert_eq!(
            outcome.payload().unwrap().as_deref(),
            Some(r#"{"text":"978020137962","format":"EAN_13"}"#)
        );
    }

    #[test]
    fn test_error_payload_is_raw_message() {
        let outcome = Outcome::Error("Unable to initialize the camera".to_owned());
        assert_eq!(
            outcome.payload().unwrap().as_deref(),
            Some("Unable to initialize the camera")
        );
    }

    #[test]
    fn test_cancellation_has_no_payload() {
        assert_eq!(Outcome::Cancelled.payload().unwrap(), None);
    }
}
