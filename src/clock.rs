use crate::settings::{MAX_SPEED, MIN_SPEED};
use std::time::{Duration, Instant};

/// Tick period at speed 1.0.
pub const BASE_INTERVAL_MS: f32 = 100.0;

/// Poll interval while the clock is stopped, so key events stay responsive.
const IDLE_POLL: Duration = Duration::from_millis(100);

/// Tick period for a given speed multiplier.
pub fn period_for(speed: f32) -> Duration {
    let speed = speed.clamp(MIN_SPEED, MAX_SPEED);
    Duration::from_millis((BASE_INTERVAL_MS / speed).round().max(1.0) as u64)
}

/// Drives the drop field at `BASE_INTERVAL_MS / speed`.
///
/// There is exactly one pending deadline at any time: reconfiguring the speed
/// or resuming drops the old deadline before installing the new one, so the
/// field can never be driven at a doubled rate, and stopping leaves no pending
/// deadline to fire later.
pub struct TickClock {
    period: Duration,
    next_tick: Instant,
    running: bool,
}

impl TickClock {
    /// A clock in the Running state, first tick one period from now.
    pub fn new(speed: f32) -> Self {
        let period = period_for(speed);
        Self {
            period,
            next_tick: Instant::now() + period,
            running: true,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Recompute the period and replace the pending deadline.
    pub fn set_speed(&mut self, speed: f32) {
        self.period = period_for(speed);
        self.next_tick = Instant::now() + self.period;
    }

    /// Flip Running <-> Stopped. Resuming schedules the next tick a full
    /// period out rather than firing immediately.
    pub fn toggle(&mut self) {
        self.running = !self.running;
        if self.running {
            self.next_tick = Instant::now() + self.period;
        }
    }

    /// Force the Running state and reschedule, regardless of prior state.
    pub fn restart(&mut self) {
        self.running = true;
        self.next_tick = Instant::now() + self.period;
    }

    /// How long the event loop may block before the next deadline.
    pub fn timeout(&self, now: Instant) -> Duration {
        if !self.running {
            return IDLE_POLL;
        }
        self.next_tick.saturating_duration_since(now)
    }

    /// Consume at most one due deadline and schedule the next.
    ///
    /// If the loop stalled past several periods, the lost time is dropped
    /// rather than replayed as a burst of catch-up ticks.
    pub fn tick_ready(&mut self, now: Instant) -> bool {
        if !self.running || now < self.next_tick {
            return false;
        }
        self.next_tick += self.period;
        if self.next_tick <= now {
            self.next_tick = now + self.period;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn doubling_speed_halves_the_period() {
        assert_eq!(period_for(1.0), Duration::from_millis(100));
        assert_eq!(period_for(2.0), Duration::from_millis(50));
    }

    #[test]
    fn period_speed_is_clamped() {
        assert_eq!(period_for(0.0), period_for(MIN_SPEED));
        assert_eq!(period_for(100.0), period_for(MAX_SPEED));
    }

    #[test]
    fn starts_running_and_fires_after_one_period() {
        let mut clock = TickClock::new(1.0);
        assert!(clock.is_running());

        let now = Instant::now();
        assert!(!clock.tick_ready(now));
        assert!(clock.tick_ready(now + Duration::from_millis(150)));
    }

    #[test]
    fn stopped_clock_never_fires() {
        let mut clock = TickClock::new(1.0);
        clock.toggle();
        assert!(!clock.is_running());
        assert!(!clock.tick_ready(Instant::now() + Duration::from_secs(10)));
    }

    #[test]
    fn resume_schedules_a_fresh_deadline() {
        let mut clock = TickClock::new(1.0);
        clock.toggle();
        clock.toggle();
        assert!(clock.is_running());
        // Nothing pending from before the pause
        assert!(!clock.tick_ready(Instant::now()));
    }

    #[test]
    fn restart_forces_running_from_stopped() {
        let mut clock = TickClock::new(1.0);
        clock.toggle();
        clock.restart();
        assert!(clock.is_running());

        let mut running = TickClock::new(1.0);
        running.restart();
        assert!(running.is_running());
    }

    #[test]
    fn set_speed_replaces_the_pending_deadline() {
        let mut clock = TickClock::new(0.1);
        let old_deadline = clock.next_tick;
        clock.set_speed(3.0);
        assert!(clock.next_tick < old_deadline);
        assert_eq!(clock.period(), period_for(3.0));
    }

    #[test]
    fn one_deadline_consumed_per_call() {
        let mut clock = TickClock::new(1.0);
        let later = Instant::now() + Duration::from_millis(120);
        assert!(clock.tick_ready(later));
        // The next deadline is a full period after the consumed one
        assert!(!clock.tick_ready(later));
    }

    #[test]
    fn stalls_are_dropped_instead_of_replayed() {
        let mut clock = TickClock::new(1.0);
        let much_later = Instant::now() + Duration::from_secs(5);
        assert!(clock.tick_ready(much_later));
        // 5 seconds of missed periods do not queue up
        assert!(!clock.tick_ready(much_later));
        assert!(clock.tick_ready(much_later + Duration::from_millis(100)));
    }

    #[test]
    fn timeout_is_bounded_while_stopped() {
        let mut clock = TickClock::new(0.1);
        clock.toggle();
        assert_eq!(clock.timeout(Instant::now()), IDLE_POLL);
    }
}
