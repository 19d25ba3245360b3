//! Statistics counters that count up once they scroll into view.
//!
//! Each counter is a number in the stats strip ("15+ godina iskustva"). It
//! sits at zero until its element is first seen, then eases up to the
//! target over a fixed duration. It runs once per page load.

use std::time::Duration;

/// Default time a counter takes to reach its target.
pub const DEFAULT_DURATION: Duration = Duration::from_millis(1600);

/// Share of the element that must be visible to start counting.
pub const DEFAULT_VISIBILITY_THRESHOLD: f64 = 0.4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Waiting,
    Running,
    Done,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Counter {
    target: u64,
    suffix: String,
    duration: Duration,
    threshold: f64,
    phase: Phase,
}

impl Counter {
    pub fn new(target: u64, suffix: impl Into<String>) -> Self {
        Self {
            target,
            suffix: suffix.into(),
            duration: DEFAULT_DURATION,
            threshold: DEFAULT_VISIBILITY_THRESHOLD,
            phase: Phase::Waiting,
        }
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Report the element's visible ratio.
    ///
    /// Returns `true` exactly once: the first time the ratio reaches the
    /// threshold. The caller starts its animation clock then.
    pub fn observe(&mut self, visible_ratio: f64) -> bool {
        if self.phase != Phase::Waiting || visible_ratio < self.threshold {
            return false;
        }
        self.phase = Phase::Running;
        true
    }

    /// Value to display `elapsed` after the counter started.
    pub fn value_at(&self, elapsed: Duration) -> u64 {
        if self.phase == Phase::Waiting {
            return 0;
        }
        if elapsed >= self.duration || self.duration.is_zero() {
            return self.target;
        }
        let t = elapsed.as_secs_f64() / self.duration.as_secs_f64();
        (self.target as f64 * ease_out_cubic(t)).round() as u64
    }

    /// Display text at `elapsed`, marking the counter done when it lands.
    pub fn tick(&mut self, elapsed: Duration) -> String {
        let value = self.value_at(elapsed);
        if self.phase == Phase::Running && value == self.target && elapsed >= self.duration {
            self.phase = Phase::Done;
        }
        self.render(value)
    }

    /// Skip straight to the target when no animation can run.
    pub fn finish(&mut self) -> String {
        self.phase = Phase::Done;
        self.render(self.target)
    }

    pub fn render(&self, value: u64) -> String {
        format!("{}{}", value, self.suffix)
    }

    pub fn is_started(&self) -> bool {
        self.phase != Phase::Waiting
    }

    pub fn is_done(&self) -> bool {
        self.phase == Phase::Done
    }

    pub fn target(&self) -> u64 {
        self.target
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }
}

fn ease_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}
