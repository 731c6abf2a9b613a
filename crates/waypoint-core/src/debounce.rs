#![forbid(unsafe_code)]

//! Trailing-edge debouncing for high-frequency surface events.
//!
//! Resize and scroll listeners can fire dozens of times per second while the
//! user drags a window edge or flicks a trackpad. Recomputing geometry on
//! every raw event is wasted work, so the controller feeds each event into a
//! [`Debouncer`] and only acts once the stream has been quiet for the
//! configured delay.
//!
//! # Design
//!
//! The debouncer is clock-agnostic: callers pass the current monotonic time
//! (as a [`Duration`] since an arbitrary epoch) into every call. This keeps it
//! deterministic under test and lets the host decide where time comes from.
//!
//! ```
//! use std::time::Duration;
//! use waypoint_core::Debouncer;
//!
//! let mut resize = Debouncer::new(Duration::from_millis(100));
//! resize.trigger(Duration::from_millis(0));
//! resize.trigger(Duration::from_millis(40)); // restarts the quiet window
//! assert!(!resize.poll(Duration::from_millis(120)));
//! assert!(resize.poll(Duration::from_millis(140)));
//! assert!(!resize.poll(Duration::from_millis(500))); // fires once
//! ```

use std::time::Duration;

/// Coalesces bursts of triggers into a single firing after a quiet period.
///
/// Not thread-safe; owned by a single controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Debouncer {
    delay: Duration,
    deadline: Option<Duration>,
    /// Triggers absorbed since the last firing.
    absorbed: u32,
}

impl Debouncer {
    /// Create a debouncer with the given quiet period.
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
            absorbed: 0,
        }
    }

    /// Quiet period this debouncer waits for.
    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Record a raw event at `now`, pushing the deadline out.
    pub fn trigger(&mut self, now: Duration) {
        self.deadline = Some(now.saturating_add(self.delay));
        self.absorbed = self.absorbed.saturating_add(1);
    }

    /// Returns `true` exactly once when the quiet period has elapsed.
    pub fn poll(&mut self, now: Duration) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                self.absorbed = 0;
                true
            }
            _ => false,
        }
    }

    /// Drop any pending firing.
    pub fn cancel(&mut self) {
        self.deadline = None;
        self.absorbed = 0;
    }

    /// Whether a firing is pending.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// When the pending firing is due, if any.
    #[must_use]
    pub const fn deadline(&self) -> Option<Duration> {
        self.deadline
    }

    /// Number of raw events folded into the pending firing.
    #[must_use]
    pub const fn absorbed(&self) -> u32 {
        self.absorbed
    }
}
