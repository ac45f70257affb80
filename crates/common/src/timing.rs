use crate::types::FrameTime;
use std::time::Instant;

/// Longest frame delta handed to the simulation. A stalled frame (window
/// drag, breakpoint) is treated as this long instead.
pub const MAX_FRAME_DELTA: f32 = 0.1;

/// Produces a [`FrameTime`] per frame from monotonic instants.
///
/// The clock is owned by the frame loop and passed around by value; there is
/// no process-wide "current frame" state.
#[derive(Debug, Clone)]
pub struct FrameClock {
    start: Instant,
    last: Instant,
}

impl FrameClock {
    pub fn new(now: Instant) -> Self {
        Self {
            start: now,
            last: now,
        }
    }

    /// Advance to `now` and return the time context for the new frame.
    pub fn tick(&mut self, now: Instant) -> FrameTime {
        let delta = now.saturating_duration_since(self.last);
        self.last = now;
        FrameTime {
            delta: delta.as_secs_f32().min(MAX_FRAME_DELTA),
            elapsed: self.elapsed_at(now),
        }
    }

    /// Seconds since the clock started.
    pub fn elapsed_at(&self, now: Instant) -> f32 {
        now.saturating_duration_since(self.start).as_secs_f32()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn tick_measures_delta_and_elapsed() {
        let t0 = Instant::now();
        let mut clock = FrameClock::new(t0);

        let f1 = clock.tick(t0 + Duration::from_millis(16));
        assert!((f1.delta - 0.016).abs() < 1e-6);
        assert!((f1.elapsed - 0.016).abs() < 1e-6);

        let f2 = clock.tick(t0 + Duration::from_millis(48));
        assert!((f2.delta - 0.032).abs() < 1e-6);
        assert!((f2.elapsed - 0.048).abs() < 1e-6);
    }

    #[test]
    fn long_frames_are_capped() {
        let t0 = Instant::now();
        let mut clock = FrameClock::new(t0);
        let f = clock.tick(t0 + Duration::from_secs(3));
        assert_eq!(f.delta, MAX_FRAME_DELTA);
        // elapsed still tracks wall time
        assert!((f.elapsed - 3.0).abs() < 1e-5);
    }

    #[test]
    fn earlier_instant_yields_zero_delta() {
        let t0 = Instant::now();
        let mut clock = FrameClock::new(t0 + Duration::from_millis(10));
        let f = clock.tick(t0);
        assert_eq!(f.delta, 0.0);
    }
}
