//! Render-loop frame rate derived from wall-clock deltas between ticks.
//!
//! This measures how often the window redraws, not the frame rate of the
//! video being played.

use std::time::Instant;

pub struct FrameClock {
    start: Instant,
    previous_elapsed: u64,
}

impl FrameClock {
    /// Start a clock at the current instant.
    pub fn start() -> Self {
        FrameClock {
            start: Instant::now(),
            previous_elapsed: 0,
        }
    }

    /// Milliseconds since the clock started.
    pub fn elapsed_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }

    /// Record a tick observed `elapsed` ms after start.
    ///
    /// Returns `floor(1000 / delta)`, or `None` when no whole millisecond has
    /// passed since the last recorded tick. A `None` leaves the clock as it was.
    pub fn tick_at(&mut self, elapsed: u64) -> Option<u64> {
        let delta = elapsed.saturating_sub(self.previous_elapsed);
        if delta == 0 {
            return None;
        }
        self.previous_elapsed = elapsed;
        Some(1000 / delta)
    }

    pub fn previous_elapsed(&self) -> u64 {
        self.previous_elapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_is_floor_of_thousand_over_delta() {
        let mut clock = FrameClock::start();
        assert_eq!(clock.tick_at(16), Some(62));
        assert_eq!(clock.tick_at(33), Some(58));
        assert_eq!(clock.tick_at(40), Some(142));
        assert_eq!(clock.tick_at(1040), Some(1));
        assert_eq!(clock.tick_at(4040), Some(0));
    }

    #[test]
    fn single_millisecond_delta_gives_thousand() {
        let mut clock = FrameClock::start();
        assert_eq!(clock.tick_at(1), Some(1000));
    }

    #[test]
    fn zero_delta_is_skipped_without_advancing() {
        let mut clock = FrameClock::start();
        assert_eq!(clock.tick_at(20), Some(50));
        assert_eq!(clock.tick_at(20), None);
        assert_eq!(clock.previous_elapsed(), 20);
        assert_eq!(clock.tick_at(30), Some(100));
    }

    #[test]
    fn first_tick_at_zero_is_skipped() {
        let mut clock = FrameClock::start();
        assert_eq!(clock.tick_at(0), None);
        assert_eq!(clock.previous_elapsed(), 0);
    }

    #[test]
    fn previous_elapsed_never_decreases() {
        let mut clock = FrameClock::start();
        clock.tick_at(50);
        assert_eq!(clock.tick_at(10), None);
        assert_eq!(clock.previous_elapsed(), 50);
    }
}
