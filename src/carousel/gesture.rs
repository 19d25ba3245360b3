//! Horizontal swipe recognition.
//!
//! A touch sequence is `start`, any number of `move`s, then `end` (or
//! `cancel`). The tracker is a two-state machine:
//!
//! ```text
//!            start(x)                 end / cancel
//!   Idle ─────────────▶ Dragging ─────────────────▶ Idle
//!                        │    ▲
//!                        └────┘ move(x): delta = x - start_x
//! ```
//!
//! An `end` while idle has nothing to release and is ignored. Leaving
//! `Dragging` always goes through [`std::mem::take`], so no delta survives
//! into the next gesture.

/// Minimum horizontal travel, in input coordinate units, for a release to
/// count as a swipe. Travel of exactly this distance does not.
pub const SWIPE_THRESHOLD: f64 = 50.0;

/// Navigation requested by a completed swipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Swipe {
    /// Finger moved left: show the following slide.
    Next,
    /// Finger moved right: show the preceding slide.
    Previous,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Gesture {
    #[default]
    Idle,
    Dragging {
        start_x: f64,
        delta: f64,
    },
}

impl Gesture {
    /// Begin a new drag at `x`. A drag already in progress is replaced.
    pub fn start(&mut self, x: f64) {
        *self = Gesture::Dragging {
            start_x: x,
            delta: 0.0,
        };
    }

    /// Follow the finger to `x`.
    pub fn track(&mut self, x: f64) {
        if let Gesture::Dragging { start_x, delta } = self {
            *delta = x - *start_x;
        }
    }

    /// Finish the drag and classify it.
    ///
    /// Returns `None` when idle or when the travel stayed within `threshold`.
    pub fn release(&mut self, threshold: f64) -> Option<Swipe> {
        match std::mem::take(self) {
            Gesture::Idle => None,
            Gesture::Dragging { delta, .. } if delta.abs() > threshold => {
                Some(if delta < 0.0 {
                    Swipe::Next
                } else {
                    Swipe::Previous
                })
            }
            Gesture::Dragging { .. } => None,
        }
    }

    /// Abandon the drag without navigating.
    pub fn cancel(&mut self) {
        *self = Gesture::Idle;
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, Gesture::Dragging { .. })
    }
}
