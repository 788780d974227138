//! Clock facade for switching between real and fake implementations.

use std::time::Instant;

use crate::pal::abstractions::Clock;
#[cfg(test)]
use crate::pal::fake::FakeClock;
use crate::pal::real::RealClock;

/// Either the real clock or, in tests, a fake one.
#[derive(Clone, Debug)]
pub(crate) enum ClockFacade {
    Real(RealClock),

    #[cfg(test)]
    Fake(FakeClock),
}

impl ClockFacade {
    pub(crate) fn real() -> Self {
        Self::Real(RealClock)
    }

    #[cfg(test)]
    pub(crate) fn fake(clock: FakeClock) -> Self {
        Self::Fake(clock)
    }
}

impl Clock for ClockFacade {
    fn now(&self) -> Instant {
        match self {
            Self::Real(clock) => clock.now(),
            #[cfg(test)]
            Self::Fake(clock) => clock.now(),
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn real_clock_is_monotonic() {
        let facade = ClockFacade::real();
        let first = facade.now();
        let second = facade.now();

        assert!(second >= first);
    }

    #[test]
    fn fake_clock_follows_advances() {
        let clock = FakeClock::new();
        let facade = ClockFacade::fake(clock.clone());
        let before = facade.now();

        clock.advance(Duration::from_millis(300));

        assert_eq!(facade.now().duration_since(before), Duration::from_millis(300));
    }
}
