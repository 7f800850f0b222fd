//! Monotonic timing for the game loop.
//!
//! Each periodic behavior keeps its own "next due" instant and is checked
//! against a single clock read per tick; none of them waits on another.

use embassy_time::{
    Duration,
    Instant,
};

const ONE_SECOND: Duration = Duration::from_secs(1);

/// Source of monotonic time.
pub trait Clock {
    fn now(&self) -> Instant;
}

/// The embassy time driver.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Deadlines for the automatic fall, the one-second countdown and the
/// redraw limiter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameClock {
    fall_at: Instant,
    second_at: Instant,
    redraw_at: Instant,
}

impl GameClock {
    /// Start all three timers at `now`. The first redraw is allowed at once.
    pub fn new(now: Instant, fall_interval: Duration) -> Self {
        Self {
            fall_at: now + fall_interval,
            second_at: now + ONE_SECOND,
            redraw_at: now,
        }
    }

    /// True once strictly more than the fall interval has passed since the
    /// last [`restart_fall`](Self::restart_fall).
    pub fn fall_due(&self, now: Instant) -> bool {
        now > self.fall_at
    }

    pub fn restart_fall(&mut self, now: Instant, fall_interval: Duration) {
        self.fall_at = now + fall_interval;
    }

    /// Consume one elapsed second, if any.
    ///
    /// The deadline advances by exactly one second so the countdown does not
    /// drift with loop jitter. A late loop catches up one second per call.
    pub fn take_second(&mut self, now: Instant) -> bool {
        if now < self.second_at {
            return false;
        }
        self.second_at = self.second_at + ONE_SECOND;
        true
    }

    pub fn redraw_allowed(&self, now: Instant) -> bool {
        now >= self.redraw_at
    }

    /// Record a redraw at `now`; the next one is allowed `min_interval` later.
    pub fn mark_redraw(&mut self, now: Instant, min_interval: Duration) {
        self.redraw_at = now + min_interval;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(ms: u64) -> Instant {
        Instant::from_millis(ms)
    }

    #[test]
    fn fall_fires_after_the_interval() {
        let mut clock = GameClock::new(at(0), Duration::from_millis(800));
        assert!(!clock.fall_due(at(799)));
        assert!(!clock.fall_due(at(800)));
        assert!(clock.fall_due(at(801)));

        clock.restart_fall(at(801), Duration::from_millis(400));
        assert!(!clock.fall_due(at(1000)));
        assert!(clock.fall_due(at(1202)));
    }

    #[test]
    fn countdown_fires_once_per_second_without_drift() {
        let mut clock = GameClock::new(at(0), Duration::from_secs(10));
        assert!(!clock.take_second(at(999)));
        assert!(clock.take_second(at(1005)));
        assert!(!clock.take_second(at(1500)));
        // Deadline is 2000, not 2005.
        assert!(clock.take_second(at(2000)));
    }

    #[test]
    fn late_loop_catches_up_one_second_per_call() {
        let mut clock = GameClock::new(at(0), Duration::from_secs(10));
        let now = at(3500);
        assert!(clock.take_second(now));
        assert!(clock.take_second(now));
        assert!(clock.take_second(now));
        assert!(!clock.take_second(now));
    }

    #[test]
    fn redraw_is_rate_limited() {
        let mut clock = GameClock::new(at(100), Duration::from_secs(1));
        assert!(clock.redraw_allowed(at(100)));
        clock.mark_redraw(at(100), Duration::from_millis(50));
        assert!(!clock.redraw_allowed(at(120)));
        assert!(clock.redraw_allowed(at(150)));
    }

    #[test]
    fn timers_are_independent() {
        let mut clock = GameClock::new(at(0), Duration::from_millis(200));
        clock.mark_redraw(at(0), Duration::from_millis(50));
        assert!(clock.fall_due(at(1000)));
        assert!(clock.take_second(at(1000)));
        assert!(clock.redraw_allowed(at(1000)));
        clock.restart_fall(at(1000), Duration::from_millis(200));
        assert!(!clock.fall_due(at(1000)));
        assert!(clock.redraw_allowed(at(1000)));
    }
}
