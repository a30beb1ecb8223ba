
use std::time::{Instant,Duration};

/// Time spent so far in the current turn
pub trait TurnClock {
    fn elapsed(&self) -> Duration;
}

#[derive(Debug,Clone,Copy)]
pub struct WallClock {
    init:   Instant,
}

impl WallClock {
    pub fn start() -> Self {
        Self { init: Instant::now() }
    }
}

impl TurnClock for WallClock {
    fn elapsed(&self) -> Duration {
        self.init.elapsed()
    }
}

/// Decides between iterations whether another, deeper one is affordable.
///
/// Never interrupts an iteration: a depth that has started always finishes,
/// so a budget can be overrun by up to one iteration.
#[derive(Debug,Clone)]
pub struct Timer<C: TurnClock = WallClock> {
    pub budget:          Duration,
    pub growth_factor:   u32,
    clock:               C,
}

impl Timer<WallClock> {
    pub fn new(budget: Duration, growth_factor: u32) -> Self {
        Self::with_clock(WallClock::start(), budget, growth_factor)
    }

    /// Never refuses another iteration
    pub fn unbounded() -> Self {
        Self::new(Duration::MAX, 1)
    }
}

impl<C: TurnClock> Timer<C> {

    pub fn with_clock(clock: C, budget: Duration, growth_factor: u32) -> Self {
        Self {
            budget,
            growth_factor,
            clock,
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.clock.elapsed()
    }

    pub fn remaining(&self) -> Duration {
        self.budget.saturating_sub(self.elapsed())
    }

    /// The next iteration is assumed to cost `growth_factor` times the last one
    pub fn should_search(&self, last_iteration: Duration) -> bool {
        let needed = last_iteration
            .checked_mul(self.growth_factor)
            .unwrap_or(Duration::MAX);
        self.remaining() > needed
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct FixedClock(Cell<Duration>);

    impl TurnClock for FixedClock {
        fn elapsed(&self) -> Duration { self.0.get() }
    }

    #[test]
    fn test_timer_should_search_01() {
        let clock = FixedClock(Cell::new(Duration::from_millis(10)));
        let timer = Timer::with_clock(clock, Duration::from_millis(100), 3);

        assert_eq!(timer.remaining(), Duration::from_millis(90));
        assert!(timer.should_search(Duration::from_millis(10)));
        assert!(timer.should_search(Duration::from_millis(29)));
        assert!(!timer.should_search(Duration::from_millis(30)));

        timer.clock.0.set(Duration::from_millis(150));
        assert_eq!(timer.remaining(), Duration::ZERO);
        assert!(!timer.should_search(Duration::ZERO));
    }

    #[test]
    fn test_timer_unbounded_01() {
        let timer = Timer::unbounded();
        assert!(timer.should_search(Duration::from_secs(3600)));
    }

}
