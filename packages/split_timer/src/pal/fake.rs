//! Fake clock implementation for testing.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crate::pal::abstractions::Clock;

/// Internal state for the fake clock that can be shared between clones.
#[derive(Debug)]
struct FakeClockState {
    origin: Instant,
    elapsed: Duration,
}

/// Fake clock for testing.
///
/// Time stands still until [`advance()`](Self::advance) is called. Clones share the
/// same state, so a test can keep one clone and move time forward while a timer
/// holds the other.
#[derive(Clone, Debug)]
pub(crate) struct FakeClock {
    state: Arc<Mutex<FakeClockState>>,
}

impl FakeClock {
    pub(crate) fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(FakeClockState {
                origin: Instant::now(),
                elapsed: Duration::ZERO,
            })),
        }
    }

    /// Moves the clock forward by `by`.
    pub(crate) fn advance(&self, by: Duration) {
        let mut state = self
            .state
            .lock()
            .expect("FakeClock state lock should not be poisoned");

        state.elapsed = state
            .elapsed
            .checked_add(by)
            .expect("fake clock advanced beyond Duration::MAX");
    }
}

impl Clock for FakeClock {
    fn now(&self) -> Instant {
        let state = self
            .state
            .lock()
            .expect("FakeClock state lock should not be poisoned");

        state
            .origin
            .checked_add(state.elapsed)
            .expect("fake clock advanced beyond the range of Instant")
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn stands_still_until_advanced() {
        let clock = FakeClock::new();
        assert_eq!(clock.now(), clock.now());
    }

    #[test]
    fn advance_moves_time_forward() {
        let clock = FakeClock::new();
        let before = clock.now();

        clock.advance(Duration::from_millis(150));

        assert_eq!(clock.now().duration_since(before), Duration::from_millis(150));
    }

    #[test]
    fn shared_state_between_clones() {
        let clock1 = FakeClock::new();
        let clock2 = clock1.clone();
        let before = clock2.now();

        clock1.advance(Duration::from_secs(2));

        assert_eq!(clock2.now().duration_since(before), Duration::from_secs(2));
    }
}
