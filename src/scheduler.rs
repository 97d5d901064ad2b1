//! Fixed-rate ticking driven by variable-length frames.
//!
//! Frame time accumulates until a full period is available, then one tick
//! fires with the fixed period as its length. At most one tick fires per
//! frame: after a long stall the backlog drains one tick per frame instead
//! of bursting.
use crate::constants::TICK_DURATION;

/// Accumulator deciding when the next fixed tick runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedTickScheduler {
    period: f32,
    accumulated: f32,
}

impl Default for FixedTickScheduler {
    fn default() -> Self {
        Self::new(TICK_DURATION)
    }
}

impl FixedTickScheduler {
    /// Creates a scheduler ticking every `period` seconds.
    ///
    /// Non-positive or non-finite periods fall back to [`TICK_DURATION`].
    #[must_use]
    pub fn new(period: f32) -> Self {
        let usable = if period.is_finite() && period > 0.0 {
            period
        } else {
            TICK_DURATION
        };
        Self {
            period: usable,
            accumulated: 0.0,
        }
    }

    /// Seconds between ticks.
    #[must_use]
    pub const fn period(&self) -> f32 {
        self.period
    }

    /// Time carried over toward the next tick.
    #[must_use]
    pub const fn accumulated(&self) -> f32 {
        self.accumulated
    }

    /// Adds a frame's elapsed time and returns the tick length when a tick
    /// is due.
    ///
    /// Negative or non-finite frame times are ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// use avatar_flight::scheduler::FixedTickScheduler;
    /// let mut scheduler = FixedTickScheduler::new(0.05);
    /// assert_eq!(scheduler.advance(0.03), None);
    /// assert_eq!(scheduler.advance(0.03), Some(0.05));
    /// ```
    pub fn advance(&mut self, frame_dt: f32) -> Option<f32> {
        if frame_dt.is_finite() && frame_dt > 0.0 {
            self.accumulated += frame_dt;
        }
        if self.accumulated >= self.period {
            self.accumulated -= self.period;
            Some(self.period)
        } else {
            None
        }
    }

    /// Drops any accumulated time.
    pub const fn reset(&mut self) {
        self.accumulated = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::{fixture, rstest};

    #[fixture]
    fn scheduler() -> FixedTickScheduler {
        FixedTickScheduler::default()
    }

    #[rstest]
    fn fires_once_per_period(mut scheduler: FixedTickScheduler) {
        let ticks = (0..60)
            .filter_map(|_| scheduler.advance(1.0 / 60.0))
            .count();
        assert!((19..=20).contains(&ticks), "fired {ticks} ticks");
    }

    #[rstest]
    fn lag_fires_a_single_tick(mut scheduler: FixedTickScheduler) {
        assert_eq!(scheduler.advance(0.5), Some(TICK_DURATION));
        assert_relative_eq!(scheduler.accumulated(), 0.45, epsilon = 1e-6);
    }

    #[rstest]
    fn backlog_drains_one_tick_per_frame(mut scheduler: FixedTickScheduler) {
        assert!(scheduler.advance(0.21).is_some());
        let drained = (0..3).filter_map(|_| scheduler.advance(0.0)).count();
        assert_eq!(drained, 3);
        assert_eq!(scheduler.advance(0.0), None);
    }

    #[rstest]
    #[case::negative(-1.0)]
    #[case::nan(f32::NAN)]
    #[case::infinite(f32::INFINITY)]
    fn ignores_bad_frame_times(mut scheduler: FixedTickScheduler, #[case] frame_dt: f32) {
        assert_eq!(scheduler.advance(frame_dt), None);
        assert_relative_eq!(scheduler.accumulated(), 0.0);
    }

    #[rstest]
    fn bad_period_falls_back() {
        assert_relative_eq!(FixedTickScheduler::new(0.0).period(), TICK_DURATION);
    }
}
