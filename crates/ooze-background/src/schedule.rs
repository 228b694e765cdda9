//! Frame pacing and resize debouncing for the cooperative event loop.

use std::time::{Duration, Instant};

use ooze_core::Viewport;

/// Fires at a fixed rate. Each loop owns one, so loops drift independently.
#[derive(Debug, Clone)]
pub struct FrameTicker {
    interval: Duration,
    next_due: Instant,
}

impl FrameTicker {
    /// Ticker at `fps` frames per second whose first frame is due at `now`.
    pub fn new(fps: u32, now: Instant) -> Self {
        Self {
            interval: Duration::from_secs_f64(1.0 / f64::from(fps.max(1))),
            next_due: now,
        }
    }

    pub fn next_due(&self) -> Instant {
        self.next_due
    }

    /// Whether a frame is due at `now`. A due frame schedules the next one;
    /// frames missed while the loop was busy are dropped, not replayed.
    pub fn poll(&mut self, now: Instant) -> bool {
        if now < self.next_due {
            return false;
        }
        self.next_due += self.interval;
        if self.next_due <= now {
            self.next_due = now + self.interval;
        }
        true
    }
}

/// Collapses bursts of resize notifications into one, applied after the
/// viewport has been stable for `delay`.
#[derive(Debug, Clone)]
pub struct ResizeDebouncer {
    delay: Duration,
    pending: Option<(Viewport, Instant)>,
}

impl ResizeDebouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Record a resize, restarting the delay.
    pub fn notify(&mut self, viewport: Viewport, now: Instant) {
        self.pending = Some((viewport, now + self.delay));
    }

    /// When the pending resize becomes due, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.map(|(_, due)| due)
    }

    /// Take the pending viewport once its delay has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<Viewport> {
        match self.pending {
            Some((viewport, due)) if now >= due => {
                self.pending = None;
                Some(viewport)
            }
            _ => None,
        }
    }

    /// Drop any pending resize.
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}
