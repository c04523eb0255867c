//! Frame source abstraction for the camera device.
//!
//! The camera is consumed as an opaque capability: start it, request
//! focus, sample the current preview frame into a caller-owned buffer,
//! release it. Start and focus are asynchronous; their completions are
//! delivered as [`FrameSourceEvent`]s through whatever completion handle
//! the concrete source was constructed with. `stop()` drops that
//! subscription, so no completion can arrive after release.

use super::FrameBuffer;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use thiserror::Error;

/// Errors that can occur during frame source operations.
#[derive(Debug, Error)]
pub enum FrameSourceError {
    #[error("failed to open camera device: {0}")]
    OpenFailed(String),
    #[error("frame source not started")]
    NotStarted,
    #[error("failed to capture preview frame: {0}")]
    CaptureFailed(String),
}

/// Completion notifications a frame source delivers asynchronously.
///
/// `start()` signals exactly one of `Ready` or `Failed`. Each
/// `request_focus()` signals at most one `FocusCompleted`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameSourceEvent {
    /// The device is ready and the preview resolution is known.
    Ready {
        /// Preview width in pixels.
        width: u32,
        /// Preview height in pixels.
        height: u32,
    },
    /// The device could not be initialized (busy, denied, unsupported).
    Failed {
        /// Driver-provided failure description.
        reason: String,
    },
    /// An outstanding focus request finished.
    FocusCompleted {
        /// Whether the autofocus sweep converged.
        succeeded: bool,
    },
}

/// Trait for camera-backed frame sources.
///
/// This abstraction allows swapping between real camera hardware
/// and mock implementations for testing.
pub trait FrameSource {
    /// Begins asynchronous device initialization.
    ///
    /// Completion is signaled once, as `Ready` or `Failed`. A synchronous
    /// `Err` means the kickoff itself failed and no completion will follow.
    fn start(&mut self) -> Result<(), FrameSourceError>;

    /// Requests an autofocus sweep. At most one request may be
    /// outstanding; completion is signaled as `FocusCompleted`.
    fn request_focus(&mut self);

    /// Enables or disables the flash/torch.
    fn set_flash(&mut self, enabled: bool);

    /// Fills `buffer` with the current preview frame as packed ARGB32
    /// pixels. Synchronous; safe to call at the polling cadence without
    /// accumulating resources.
    fn capture_into(&mut self, buffer: &mut FrameBuffer) -> Result<(), FrameSourceError>;

    /// Releases the device and unsubscribes from completions.
    /// Idempotent; safe to call even if `start()` never completed.
    fn stop(&mut self);
}

/// Call counters recorded by [`MockFrameSource`].
#[derive(Debug, Default)]
struct MockCounters {
    start_calls: u32,
    focus_requests: u32,
    capture_calls: u32,
    stop_calls: u32,
    flash_enabled: Option<bool>,
}

/// Shared inspection handle for a [`MockFrameSource`].
///
/// Remains usable after the source has been moved into a session.
#[derive(Debug, Clone, Default)]
pub struct MockProbe(Rc<RefCell<MockCounters>>);

impl MockProbe {
    /// Number of `start()` calls.
    pub fn start_calls(&self) -> u32 {
        self.0.borrow().start_calls
    }

    /// Number of `request_focus()` calls.
    pub fn focus_requests(&self) -> u32 {
        self.0.borrow().focus_requests
    }

    /// Number of `capture_into()` calls.
    pub fn capture_calls(&self) -> u32 {
        self.0.borrow().capture_calls
    }

    /// Number of `stop()` calls.
    pub fn stop_calls(&self) -> u32 {
        self.0.borrow().stop_calls
    }

    /// Last flash setting, if any was applied.
    pub fn flash_enabled(&self) -> Option<bool> {
        self.0.borrow().flash_enabled
    }
}

/// How a scripted mock responds to `start()`.
#[derive(Debug, Clone)]
enum StartScript {
    Ready { width: u32, height: u32 },
    Failed { reason: String },
    Unopenable { reason: String },
}

/// Mock frame source with scripted completions for testing.
///
/// Completions are emitted synchronously through the callback installed
/// with [`MockFrameSource::on_completion`]; without one the mock stays
/// silent and tests deliver events to the session directly. Focus
/// completions follow a finite script; once it is exhausted, further
/// focus requests are recorded but never complete.
pub struct MockFrameSource {
    script: StartScript,
    focus_script: VecDeque<bool>,
    completions: Option<Box<dyn FnMut(FrameSourceEvent)>>,
    started: bool,
    sequence: u64,
    probe: MockProbe,
}

impl MockFrameSource {
    /// A source whose `start()` completes with `Ready` at the given
    /// preview resolution.
    pub fn ready(width: u32, height: u32) -> Self {
        Self::with_script(StartScript::Ready { width, height })
    }

    /// A source whose `start()` completes with `Failed`.
    pub fn failing(reason: &str) -> Self {
        Self::with_script(StartScript::Failed {
            reason: reason.to_owned(),
        })
    }

    /// A source whose `start()` fails synchronously, before any
    /// completion can be delivered.
    pub fn unopenable(reason: &str) -> Self {
        Self::with_script(StartScript::Unopenable {
            reason: reason.to_owned(),
        })
    }

    fn with_script(script: StartScript) -> Self {
        Self {
            script,
            focus_script: VecDeque::new(),
            completions: None,
            started: false,
            sequence: 0,
            probe: MockProbe::default(),
        }
    }

    /// Scripts the outcomes of successive focus requests.
    pub fn with_focus_script(mut self, script: Vec<bool>) -> Self {
        self.focus_script = script.into();
        self
    }

    /// Installs the completion callback completions are emitted through.
    pub fn on_completion(&mut self, callback: impl FnMut(FrameSourceEvent) + 'static) {
        self.completions = Some(Box::new(callback));
    }

    /// Returns an inspection handle for call counts.
    pub fn probe(&self) -> MockProbe {
        self.probe.clone()
    }

    fn emit(&mut self, event: FrameSourceEvent) {
        if let Some(callback) = self.completions.as_mut() {
            callback(event);
        }
    }
}

impl FrameSource for MockFrameSource {
    fn start(&mut self) -> Result<(), FrameSourceError> {
        self.probe.0.borrow_mut().start_calls += 1;
        match self.script.clone() {
            StartScript::Ready { width, height } => {
                self.started = true;
                tracing::info!(width, height, "MockFrameSource started");
                self.emit(FrameSourceEvent::Ready { width, height });
                Ok(())
            }
            StartScript::Failed { reason } => {
                self.emit(FrameSourceEvent::Failed { reason });
                Ok(())
            }
            StartScript::Unopenable { reason } => Err(FrameSourceError::OpenFailed(reason)),
        }
    }

    fn request_focus(&mut self) {
        self.probe.0.borrow_mut().focus_requests += 1;
        if let Some(succeeded) = self.focus_script.pop_front() {
            self.emit(FrameSourceEvent::FocusCompleted { succeeded });
        }
    }

    fn set_flash(&mut self, enabled: bool) {
        self.probe.0.borrow_mut().flash_enabled = Some(enabled);
    }

    fn capture_into(&mut self, buffer: &mut FrameBuffer) -> Result<(), FrameSourceError> {
        if !self.started {
            return Err(FrameSourceError::NotStarted);
        }
        self.probe.0.borrow_mut().capture_calls += 1;

        // Deterministic synthetic pattern, opaque alpha. Only for
        // exercising the capture path, not for decoding.
        let sequence = self.sequence;
        for (i, px) in buffer.pixels_mut().iter_mut().enumerate() {
            *px = 0xFF00_0000 | ((i as u64 ^ sequence) as u32 & 0x00FF_FFFF);
        }
        self.sequence += 1;
        Ok(())
    }

    fn stop(&mut self) {
        self.started = false;
        self.completions = None;
        self.probe.0.borrow_mut().stop_calls += 1;
        tracing::info!("MockFrameSource stopped");
    }
}

impl std::fmt::Debug for MockFrameSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockFrameSource")
            .field("script", &self.script)
            .field("started", &self.started)
            .field("sequence", &self.sequence)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recorded() -> (Rc<RefCell<Vec<FrameSourceEvent>>>, MockFrameSource) {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        let mut source = MockFrameSource::ready(640, 480);
        source.on_completion(move |ev| sink.borrow_mut().push(ev));
        (events, source)
    }

    #[test]
    fn test_start_completes_ready() {
        let (events, mut source) = recorded();

        source.start().unwrap();
        assert_eq!(
            events.borrow().as_slice(),
            &[FrameSourceEvent::Ready {
                width: 640,
                height: 480
            }]
        );
    }

    #[test]
    fn test_capture_without_start() {
        let mut source = MockFrameSource::ready(640, 480);
        let mut buffer = FrameBuffer::new(640, 480);
        assert!(matches!(
            source.capture_into(&mut buffer),
            Err(FrameSourceError::NotStarted)
        ));
    }

    #[test]
    fn test_capture_fills_opaque_pixels() {
        let mut source = MockFrameSource::ready(8, 8);
        source.start().unwrap();

        let mut buffer = FrameBuffer::new(8, 8);
        source.capture_into(&mut buffer).unwrap();

        assert!(buffer.pixels().iter().all(|px| px >> 24 == 0xFF));
        assert_eq!(source.probe().capture_calls(), 1);
    }

    #[test]
    fn test_stop_unsubscribes_and_is_idempotent() {
        let (events, mut source) = recorded();
        let probe = source.probe();

        source.start().unwrap();
        source.stop();
        source.stop();

        // No completion after release, even if focus would complete.
        source.request_focus();
        assert_eq!(events.borrow().len(), 1);
        assert_eq!(probe.stop_calls(), 2);

        let mut buffer = FrameBuffer::new(640, 480);
        assert!(source.capture_into(&mut buffer).is_err());
    }

    #[test]
    fn test_focus_script_exhaustion() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        let mut source = MockFrameSource::ready(640, 480).with_focus_script(vec![true, false]);
        source.on_completion(move |ev| sink.borrow_mut().push(ev));
        source.start().unwrap();

        source.request_focus();
        source.request_focus();
        source.request_focus(); // script exhausted: recorded, never completes

        let focus_events: Vec<_> = events
            .borrow()
            .iter()
            .filter(|ev| matches!(ev, FrameSourceEvent::FocusCompleted { .. }))
            .cloned()
            .collect();
        assert_eq!(
            focus_events,
            vec![
                FrameSourceEvent::FocusCompleted { succeeded: true },
                FrameSourceEvent::FocusCompleted { succeeded: false },
            ]
        );
        assert_eq!(source.probe().focus_requests(), 3);
    }

    #[test]
    fn test_failing_start() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        let mut source = MockFrameSource::failing("camera busy");
        source.on_completion(move |ev| sink.borrow_mut().push(ev));

        source.start().unwrap();
        assert_eq!(
            events.borrow().as_slice(),
            &[FrameSourceEvent::Failed {
                reason: "camera busy".to_owned()
            }]
        );
    }

    #[test]
    fn test_unopenable_start() {
        let mut source = MockFrameSource::unopenable("no device");
        assert!(matches!(
            source.start(),
            Err(FrameSourceError::OpenFailed(_))
        ));
    }
}
