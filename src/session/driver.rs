//! Single-threaded event loop for a scan session.
//!
//! All session events — device completions, cancellation, and the
//! synthesized polling ticks — travel through one channel and are
//! applied serially, so the session itself needs no locks. Ticks are
//! produced with `recv_timeout` against a deadline and are skipped
//! rather than queued: a slow decode delays the next tick, it never
//! builds a backlog.

use super::{ScanSession, SessionEvent};
use crate::capture::{FrameSource, FrameSourceEvent};
use crate::decode::Decoder;
use crate::report::ResultSink;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::time::{Duration, Instant};

/// Creates the event channel for one session.
///
/// The [`ScanHandle`] is the caller's side: it cancels the session and
/// mints [`CompletionSender`]s for the frame source. The
/// [`EventReceiver`] is consumed by [`drive`].
pub fn channel() -> (ScanHandle, EventReceiver) {
    let (tx, rx) = mpsc::channel();
    (ScanHandle { tx }, EventReceiver { rx })
}

/// Caller-side handle for a running session.
///
/// Cloneable and sendable, so a UI thread can cancel a scan the driver
/// is running elsewhere. Dropping every handle (and every completion
/// sender) cancels the session, so resource release still happens if
/// the host abandons the scan.
#[derive(Debug, Clone)]
pub struct ScanHandle {
    tx: Sender<SessionEvent>,
}

impl ScanHandle {
    /// Requests cancellation (user dismissed the scan view).
    pub fn cancel(&self) {
        // A closed channel means the session already finished.
        let _ = self.tx.send(SessionEvent::Cancel);
    }

    /// Mints a completion handle for a frame source to deliver its
    /// asynchronous completions through.
    pub fn completions(&self) -> CompletionSender {
        CompletionSender {
            tx: self.tx.clone(),
        }
    }
}

/// Frame-source side of the event channel.
#[derive(Debug, Clone)]
pub struct CompletionSender {
    tx: Sender<SessionEvent>,
}

impl CompletionSender {
    /// Delivers a frame-source completion into the session's loop.
    pub fn deliver(&self, event: FrameSourceEvent) {
        let _ = self.tx.send(SessionEvent::Source(event));
    }
}

/// Receiving end of the session event channel.
#[derive(Debug)]
pub struct EventReceiver {
    rx: Receiver<SessionEvent>,
}

/// Runs a session to completion on the calling thread.
///
/// Starts the session, then applies events serially. While the session
/// has its polling timer armed, a `Tick` is synthesized whenever
/// `interval` elapses without an event; the deadline resets after each
/// tick. If every event producer disappears, the session is cancelled
/// so the mandatory-cleanup guarantee holds.
pub fn drive<F, D, S>(session: &mut ScanSession<F, D, S>, events: EventReceiver, interval: Duration)
where
    F: FrameSource,
    D: Decoder,
    S: ResultSink,
{
    session.start();

    let mut deadline: Option<Instant> = None;
    while !session.is_finished() {
        if session.timer_armed() {
            let due = *deadline.get_or_insert_with(|| Instant::now() + interval);
            let now = Instant::now();
            // Tick first when overdue: a steady stream of queued
            // completions must not starve the capture loop.
            if now >= due {
                deadline = Some(now + interval);
                session.handle_event(SessionEvent::Tick);
                continue;
            }
            match events.rx.recv_timeout(due - now) {
                Ok(event) => session.handle_event(event),
                Err(RecvTimeoutError::Timeout) => {
                    deadline = Some(Instant::now() + interval);
                    session.handle_event(SessionEvent::Tick);
                }
                Err(RecvTimeoutError::Disconnected) => {
                    tracing::warn!("all event producers gone; cancelling scan");
                    session.handle_event(SessionEvent::Cancel);
                }
            }
        } else {
            deadline = None;
            match events.rx.recv() {
                Ok(event) => session.handle_event(event),
                Err(_) => {
                    tracing::warn!("all event producers gone; cancelling scan");
                    session.handle_event(SessionEvent::Cancel);
                }
            }
        }
    }
}
