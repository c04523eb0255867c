//! Entry point a host shell binds its "scan" command to.

use super::{Outcome, OutcomeSlot};
use crate::capture::{FrameSource, ScanConfig};
use crate::decode::Decoder;
use crate::session::{drive, EventReceiver, ScanSession};

/// Runs one scan to completion and returns its outcome.
///
/// The caller wires the pieces explicitly: it creates the event channel
/// with [`crate::session::channel`], hands the completion side to the
/// frame source, keeps the [`crate::session::ScanHandle`] for
/// cancellation, and passes the receiver here. No shared registry is
/// involved; ownership of the session and its resources stays inside
/// this call.
///
/// Blocks the calling thread for the duration of the scan.
pub fn scan<F, D>(source: F, decoder: D, events: EventReceiver, config: &ScanConfig) -> Outcome
where
    F: FrameSource,
    D: Decoder,
{
    let slot = OutcomeSlot::new();
    let mut session = ScanSession::new(source, decoder, slot.clone());
    drive(&mut session, events, config.poll_interval());
    // The driver runs the session to Terminated, which always reports
    // exactly once; an empty slot can only mean an abandoned channel.
    slot.take().unwrap_or(Outcome::Cancelled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::MockFrameSource;
    use crate::decode::{ScanResult, ScriptedDecoder};
    use crate::session::{channel, CAMERA_INIT_ERROR};

    fn fast_config() -> ScanConfig {
        ScanConfig {
            poll_interval_ms: 5,
            ..Default::default()
        }
    }

    #[test]
    fn test_scan_returns_serializable_success() {
        let (handle, events) = channel();
        let completions = handle.completions();
        let mut source = MockFrameSource::ready(640, 480);
        source.on_completion(move |ev| completions.deliver(ev));
        let decoder = ScriptedDecoder::new(vec![
            None,
            None,
            Some(ScanResult::new("123456789012", "EAN_13")),
        ]);

        let outcome = scan(source, decoder, events, &fast_config());

        assert!(outcome.is_success());
        assert_eq!(
            outcome.payload().unwrap().as_deref(),
            Some(r#"{"text":"123456789012","format":"EAN_13"}"#)
        );
    }

    #[test]
    fn test_scan_surfaces_device_error() {
        let (handle, events) = channel();
        let completions = handle.completions();
        let mut source = MockFrameSource::failing("permission denied");
        source.on_completion(move |ev| completions.deliver(ev));

        let outcome = scan(source, ScriptedDecoder::never(), events, &fast_config());

        assert_eq!(outcome, Outcome::Error(CAMERA_INIT_ERROR.to_owned()));
        assert_eq!(outcome.payload().unwrap().as_deref(), Some(CAMERA_INIT_ERROR));
    }

    #[test]
    fn test_scan_cancellation_has_no_payload() {
        let (handle, events) = channel();
        let completions = handle.completions();
        let mut source = MockFrameSource::ready(640, 480);
        source.on_completion(move |ev| completions.deliver(ev));
        handle.cancel();

        let outcome = scan(source, ScriptedDecoder::never(), events, &fast_config());

        assert_eq!(outcome, Outcome::Cancelled);
        assert_eq!(outcome.payload().unwrap(), None);
    }
}
