//! Scan session state machine.
//!
//! A [`ScanSession`] owns the frame source, the decoder, and one
//! reusable pixel buffer for its whole lifetime. It is driven by
//! discrete events on a single logical execution context (see
//! [`driver`]): device completions, polling ticks, and caller
//! cancellation. No two session handlers ever run concurrently, which
//! is why the state transitions below need no locks.
//!
//! Lifecycle: `Created → Initializing → Active → Terminating →
//! Terminated`. Every exit path runs through [`ScanSession::terminate`],
//! which disarms the timer, releases the device and buffer, and
//! delivers exactly one outcome to the sink.

mod driver;

pub use driver::{channel, drive, CompletionSender, EventReceiver, ScanHandle};

use crate::capture::{FrameBuffer, FrameSource, FrameSourceEvent};
use crate::decode::Decoder;
use crate::report::{Outcome, ResultSink};
use std::time::Duration;

/// Error message reported when the camera cannot be initialized.
pub const CAMERA_INIT_ERROR: &str = "Unable to initialize the camera";

/// Length of the confirmation pulse fired when a barcode is recognized.
const CONFIRM_PULSE: Duration = Duration::from_millis(100);

/// Lifecycle state of a scan session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Constructed, not yet started.
    Created,
    /// Waiting for the device-ready completion.
    Initializing,
    /// Polling loop running; refocus loop running.
    Active,
    /// Releasing resources and delivering the outcome.
    Terminating,
    /// Absorbing state; every further event is ignored.
    Terminated,
}

/// An event delivered into the session's execution context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// A frame-source completion (device ready/failed, focus done).
    Source(FrameSourceEvent),
    /// A polling-timer tick: sample and decode one frame.
    Tick,
    /// Caller-initiated cancellation (user dismissed the scan view).
    Cancel,
}

impl From<FrameSourceEvent> for SessionEvent {
    fn from(event: FrameSourceEvent) -> Self {
        Self::Source(event)
    }
}

/// Short confirmation feedback fired when a barcode is recognized.
pub trait Haptics {
    /// Fires a vibration/confirmation pulse of the given length.
    fn pulse(&mut self, duration: Duration);
}

/// No-op haptics for hosts without a vibration device.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHaptics;

impl Haptics for NoHaptics {
    fn pulse(&mut self, _duration: Duration) {}
}

/// The live unit of work for one scan request.
///
/// Exactly one outcome (success, error, or cancellation) is delivered
/// to the sink per session, regardless of how timer ticks, focus
/// completions, and cancellation interleave; the `result_reported`
/// flag gates delivery and the `Terminated` state absorbs everything
/// afterwards. Sessions are never reused across scans.
pub struct ScanSession<F, D, S> {
    state: SessionState,
    source: F,
    decoder: D,
    sink: S,
    haptics: Box<dyn Haptics>,
    /// Allocated once the device reports its preview resolution;
    /// released on termination, never retained past `stop()`.
    buffer: Option<FrameBuffer>,
    barcode_found: bool,
    result_reported: bool,
    focus_in_flight: bool,
    timer_armed: bool,
}

impl<F, D, S> ScanSession<F, D, S>
where
    F: FrameSource,
    D: Decoder,
    S: ResultSink,
{
    /// Creates a session over the given collaborators.
    pub fn new(source: F, decoder: D, sink: S) -> Self {
        Self {
            state: SessionState::Created,
            source,
            decoder,
            sink,
            haptics: Box::new(NoHaptics),
            buffer: None,
            barcode_found: false,
            result_reported: false,
            focus_in_flight: false,
            timer_armed: false,
        }
    }

    /// Replaces the confirmation feedback device.
    pub fn with_haptics(mut self, haptics: Box<dyn Haptics>) -> Self {
        self.haptics = haptics;
        self
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Whether the polling timer is armed. The driver synthesizes
    /// `Tick` events only while this holds.
    pub fn timer_armed(&self) -> bool {
        self.timer_armed
    }

    /// Whether the session has reached its absorbing state.
    pub fn is_finished(&self) -> bool {
        self.state == SessionState::Terminated
    }

    /// Kicks off device initialization.
    ///
    /// A synchronous start failure terminates the session immediately
    /// with the device-initialization error outcome.
    pub fn start(&mut self) {
        if self.state != SessionState::Created {
            tracing::warn!(state = ?self.state, "start ignored: session already driven");
            return;
        }
        self.state = SessionState::Initializing;
        tracing::info!("starting camera");
        if let Err(e) = self.source.start() {
            tracing::warn!(error = %e, "camera start failed");
            self.terminate(Outcome::Error(CAMERA_INIT_ERROR.to_owned()));
        }
    }

    /// Processes one event within the session's execution context.
    pub fn handle_event(&mut self, event: SessionEvent) {
        if matches!(
            self.state,
            SessionState::Terminating | SessionState::Terminated
        ) {
            tracing::trace!(?event, "event after termination ignored");
            return;
        }

        match event {
            SessionEvent::Cancel => {
                tracing::info!("scan cancelled by caller");
                self.terminate(Outcome::Cancelled);
            }
            SessionEvent::Source(FrameSourceEvent::Ready { width, height })
                if self.state == SessionState::Initializing =>
            {
                self.on_device_ready(width, height);
            }
            SessionEvent::Source(FrameSourceEvent::Failed { reason })
                if self.state == SessionState::Initializing =>
            {
                tracing::warn!(%reason, "camera initialization failed");
                self.terminate(Outcome::Error(CAMERA_INIT_ERROR.to_owned()));
            }
            SessionEvent::Tick if self.state == SessionState::Active => {
                self.poll_frame();
            }
            SessionEvent::Source(FrameSourceEvent::FocusCompleted { succeeded })
                if self.state == SessionState::Active =>
            {
                self.on_focus_completed(succeeded);
            }
            other => {
                tracing::debug!(state = ?self.state, event = ?other, "stray event ignored");
            }
        }
    }

    /// Device ready: allocate the pixel buffer at the preview
    /// resolution, force flash off, kick off the focus loop, arm the
    /// polling timer.
    fn on_device_ready(&mut self, width: u32, height: u32) {
        tracing::info!(width, height, "camera ready; arming scan timer");
        self.buffer = Some(FrameBuffer::new(width, height));
        self.source.set_flash(false);
        self.kick_focus();
        self.timer_armed = true;
        self.state = SessionState::Active;
    }

    /// Issues a focus request unless one is already outstanding.
    fn kick_focus(&mut self) {
        if self.focus_in_flight {
            return;
        }
        self.focus_in_flight = true;
        self.source.request_focus();
    }

    /// One polling tick: sample the current frame and try to decode it.
    /// A miss is expected and silent; a capture error is absorbed and
    /// retried on the next tick.
    fn poll_frame(&mut self) {
        let Some(buffer) = self.buffer.as_mut() else {
            tracing::warn!("tick with no frame buffer; ignoring");
            return;
        };
        if let Err(e) = self.source.capture_into(buffer) {
            tracing::warn!(error = %e, "frame capture failed; retrying on next tick");
            return;
        }
        if let Some(result) = self.decoder.decode(buffer) {
            self.barcode_found = true;
            tracing::info!(format = result.format(), "barcode recognized");
            self.haptics.pulse(CONFIRM_PULSE);
            self.terminate(Outcome::Success(result));
        }
    }

    /// Continuous refocus-until-found: a successful focus completion
    /// re-arms focusing while no barcode has been found; a failed one
    /// schedules nothing from this event alone. At most one request is
    /// in flight at a time.
    fn on_focus_completed(&mut self, succeeded: bool) {
        self.focus_in_flight = false;
        if self.barcode_found {
            return;
        }
        if succeeded {
            self.kick_focus();
        } else {
            tracing::debug!("autofocus attempt failed; awaiting next trigger");
        }
    }

    /// The single exit path: disarm the timer, release the device and
    /// buffer, deliver the outcome at most once, and absorb everything
    /// after.
    fn terminate(&mut self, outcome: Outcome) {
        self.state = SessionState::Terminating;
        self.timer_armed = false;
        self.source.stop();
        self.buffer = None;
        if !self.result_reported {
            self.result_reported = true;
            tracing::info!(outcome = ?outcome, "scan session finished");
            match outcome {
                Outcome::Success(result) => self.sink.report_success(result),
                Outcome::Error(message) => self.sink.report_error(&message),
                Outcome::Cancelled => self.sink.report_cancelled(),
            }
        }
        self.state = SessionState::Terminated;
    }
}
