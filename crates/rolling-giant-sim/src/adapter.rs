//! Tick sources: how host callbacks reach the controller.
//!
//! The session does not assume a particular engine loop. It asks a
//! [`TickSource`] which ticks are due and dispatches each one to the
//! matching controller entry point.

use rolling_giant_core::constants::FRAME_DT;

/// One host callback.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tick {
    /// Slow-interval evaluation (state transitions, search start/stop).
    Interval,
    /// Per-frame evaluation with the frame's duration in seconds.
    Frame { dt: f32 },
}

pub trait TickSource {
    /// Append the ticks due for one host step, in the order they run.
    fn advance(&mut self, due: &mut Vec<Tick>);
}

/// One frame per step at a fixed rate, plus an interval tick every
/// `interval_secs`.
///
/// When both fall on the same step the interval runs first, as engine
/// update hooks do.
#[derive(Debug, Clone)]
pub struct FixedTicks {
    frame_dt: f32,
    interval_secs: f32,
    since_interval: f32,
}

impl FixedTicks {
    pub fn new(frame_dt: f32, interval_secs: f32) -> Self {
        Self {
            frame_dt,
            interval_secs,
            since_interval: 0.0,
        }
    }

    /// Fixed frame rate with the given interval.
    pub fn with_interval(interval_secs: f32) -> Self {
        Self::new(FRAME_DT, interval_secs)
    }
}

impl TickSource for FixedTicks {
    fn advance(&mut self, due: &mut Vec<Tick>) {
        self.since_interval += self.frame_dt;
        if self.since_interval >= self.interval_secs {
            self.since_interval -= self.interval_secs;
            due.push(Tick::Interval);
        }
        due.push(Tick::Frame { dt: self.frame_dt });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_every_twelve_frames() {
        // 0.2 s at 60 Hz.
        let mut source = FixedTicks::with_interval(0.2);
        let mut intervals = 0;
        let mut frames = 0;
        for _ in 0..120 {
            let mut due = Vec::new();
            source.advance(&mut due);
            intervals += due.iter().filter(|t| **t == Tick::Interval).count();
            frames += due
                .iter()
                .filter(|t| matches!(t, Tick::Frame { .. }))
                .count();
        }
        assert_eq!(frames, 120);
        assert!((9..=10).contains(&intervals), "got {intervals}");
    }

    #[test]
    fn test_interval_runs_before_frame() {
        let mut source = FixedTicks::new(0.5, 0.5);
        let mut due = Vec::new();
        source.advance(&mut due);
        assert_eq!(due, vec![Tick::Interval, Tick::Frame { dt: 0.5 }]);
    }
}
