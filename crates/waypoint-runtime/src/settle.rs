#![forbid(unsafe_code)]

//! Scroll-settle detection.
//!
//! After asking the surface to scroll a target into view, the controller has
//! no completion signal: smooth scrolling is the host's business. Instead it
//! samples the scroll offset once per frame and treats motion as finished
//! after [`SettlePolicy::samples`] consecutive frames that each moved less
//! than [`SettlePolicy::threshold`].
//!
//! # Failure Modes
//!
//! | Condition | Behavior |
//! |-----------|----------|
//! | Surface never stops moving | [`SettleState::TimedOut`] after `max_frames` samples |
//! | Surface never moved at all | Settled after `samples + 1` frames |

use waypoint_core::Position;

/// How the settle detector decides motion has stopped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SettlePolicy {
    /// Consecutive still frames required.
    pub samples: u32,
    /// Largest per-frame movement (either axis) still counted as still.
    pub threshold: f64,
    /// Sampling cap.
    pub max_frames: u32,
}

impl SettlePolicy {
    pub const DEFAULT: Self = Self {
        samples: 3,
        threshold: 0.5,
        max_frames: 120,
    };
}

impl Default for SettlePolicy {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Result of one settle sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettleState {
    Moving,
    Settled,
    /// Gave up after `max_frames` samples.
    TimedOut,
}

impl SettleState {
    /// Whether waiting is over (settled or timed out).
    #[must_use]
    pub const fn is_done(self) -> bool {
        !matches!(self, Self::Moving)
    }
}

/// Per-frame scroll offset sampler.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollSettle {
    policy: SettlePolicy,
    last: Option<Position>,
    still: u32,
    frames: u32,
}

impl ScrollSettle {
    #[must_use]
    pub fn new(policy: SettlePolicy) -> Self {
        Self {
            policy,
            last: None,
            still: 0,
            frames: 0,
        }
    }

    /// Feed the current scroll offset. Call once per frame.
    pub fn sample(&mut self, offset: Position) -> SettleState {
        self.frames = self.frames.saturating_add(1);
        if let Some(last) = self.last {
            let moved = (offset.left - last.left)
                .abs()
                .max((offset.top - last.top).abs());
            if moved < self.policy.threshold {
                self.still += 1;
            } else {
                self.still = 0;
            }
        }
        self.last = Some(offset);

        if self.still >= self.policy.samples {
            SettleState::Settled
        } else if self.frames >= self.policy.max_frames {
            SettleState::TimedOut
        } else {
            SettleState::Moving
        }
    }

    /// Frames sampled so far.
    #[must_use]
    pub const fn frames(&self) -> u32 {
        self.frames
    }
}
