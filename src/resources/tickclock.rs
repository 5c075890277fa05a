//! Fixed-step clock.
//!
//! Wall-clock time is poured into an accumulator and drained in whole ticks.
//! The remainder carries over to the next frame. A frame that would need more
//! than `max_ticks_per_frame` ticks (a stall, a debugger pause) runs the
//! maximum and drops the rest of the backlog instead of spiralling.

use std::time::Duration;

use bevy_ecs::prelude::Resource;
use log::warn;

const DEFAULT_MAX_TICKS_PER_FRAME: u32 = 25;

#[derive(Resource, Debug, Clone, Copy)]
pub struct TickClock {
    pub step: Duration,
    pub accumulator: Duration,
    pub max_ticks_per_frame: u32,
    /// Ticks handed out so far.
    pub ticks: u64,
    /// Frames accumulated so far.
    pub frames: u64,
}

impl TickClock {
    pub fn new(step: Duration) -> Self {
        Self {
            step: step.max(Duration::from_millis(1)),
            accumulator: Duration::ZERO,
            max_ticks_per_frame: DEFAULT_MAX_TICKS_PER_FRAME,
            ticks: 0,
            frames: 0,
        }
    }

    pub fn with_max_ticks_per_frame(mut self, max: u32) -> Self {
        self.max_ticks_per_frame = max.max(1);
        self
    }

    /// Add `elapsed` and return how many ticks to run this frame.
    pub fn accumulate(&mut self, elapsed: Duration) -> u32 {
        self.frames += 1;
        self.accumulator += elapsed;

        let mut due = 0;
        while self.accumulator >= self.step && due < self.max_ticks_per_frame {
            self.accumulator -= self.step;
            due += 1;
        }

        if self.accumulator >= self.step {
            let dropped = self.accumulator.as_nanos() / self.step.as_nanos();
            warn!("Tick backlog too large, dropping {} ticks", dropped);
            self.accumulator = Duration::from_nanos(
                (self.accumulator.as_nanos() % self.step.as_nanos()) as u64,
            );
        }

        self.ticks += u64::from(due);
        due
    }

    /// Fraction of a tick left in the accumulator, for interpolating renders.
    pub fn alpha(&self) -> f32 {
        self.accumulator.as_secs_f32() / self.step.as_secs_f32()
    }
}

impl Default for TickClock {
    fn default() -> Self {
        Self::new(Duration::from_millis(10))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remainder_carries_between_frames() {
        let mut clock = TickClock::new(Duration::from_millis(10));
        assert_eq!(clock.accumulate(Duration::from_millis(16)), 1);
        assert_eq!(clock.accumulate(Duration::from_millis(16)), 2);
        assert_eq!(clock.accumulator, Duration::from_millis(2));
        assert_eq!(clock.ticks, 3);
        assert_eq!(clock.frames, 2);
    }

    #[test]
    fn short_frames_run_no_ticks() {
        let mut clock = TickClock::new(Duration::from_millis(10));
        assert_eq!(clock.accumulate(Duration::from_millis(4)), 0);
        assert!((clock.alpha() - 0.4).abs() < 1e-6);
    }

    #[test]
    fn backlog_is_clamped() {
        let mut clock =
            TickClock::new(Duration::from_millis(10)).with_max_ticks_per_frame(5);
        assert_eq!(clock.accumulate(Duration::from_millis(1003)), 5);
        assert_eq!(clock.accumulator, Duration::from_millis(3));
        assert_eq!(clock.accumulate(Duration::from_millis(7)), 1);
    }
}
