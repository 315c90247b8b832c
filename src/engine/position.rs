use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender, channel};
use std::time::Duration;

use uuid::Uuid;

/// Wakes the UI thread so it drains pending notifications.
pub type Waker = Arc<dyn Fn() + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionUpdate {
    /// Session that produced the update; stale sessions are ignored.
    pub session: Uuid,
    pub position: Duration,
    pub duration: Option<Duration>,
}

impl PositionUpdate {
    /// Slider value for this update, if the duration is known and non-zero.
    pub fn percent(&self) -> Option<f64> {
        percent_of(self.position, self.duration?)
    }
}

/// Sending half handed to an engine. Safe to move onto the engine's thread.
#[derive(Clone)]
pub struct PositionSink {
    session: Uuid,
    tx: Sender<PositionUpdate>,
    waker: Option<Waker>,
}

impl PositionSink {
    /// Returns false once the receiving side is gone.
    pub fn send(&self, position: Duration, duration: Option<Duration>) -> bool {
        let update = PositionUpdate {
            session: self.session,
            position,
            duration,
        };
        if self.tx.send(update).is_err() {
            return false;
        }
        if let Some(waker) = &self.waker {
            waker();
        }
        true
    }
}

/// Hop from engine threads onto the UI thread: engines write through sinks,
/// the UI drains the receiver once per frame.
pub struct PositionChannel {
    tx: Sender<PositionUpdate>,
    rx: Receiver<PositionUpdate>,
    waker: Option<Waker>,
}

impl PositionChannel {
    pub fn new(waker: Option<Waker>) -> Self {
        let (tx, rx) = channel();
        Self { tx, rx, waker }
    }

    pub fn sink_for(&self, session: Uuid) -> PositionSink {
        PositionSink {
            session,
            tx: self.tx.clone(),
            waker: self.waker.clone(),
        }
    }

    /// Everything received so far, without blocking.
    pub fn drain(&self) -> Vec<PositionUpdate> {
        self.rx.try_iter().collect()
    }
}

pub fn percent_of(position: Duration, duration: Duration) -> Option<f64> {
    if duration.is_zero() {
        return None;
    }
    Some(position.as_secs_f64() / duration.as_secs_f64() * 100.0)
}

/// Offset `percent` of the way into `duration`. `percent` is clamped to 0..=100.
pub fn offset_at(duration: Duration, percent: f64) -> Duration {
    duration.mul_f64(percent.clamp(0.0, 100.0) / 100.0)
}
