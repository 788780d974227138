//! Real clock implementation.

use std::time::Instant;

use crate::pal::abstractions::Clock;

/// The monotonic clock of the operating system.
#[derive(Clone, Debug)]
pub(crate) struct RealClock;

impl Clock for RealClock {
    #[cfg_attr(test, mutants::skip)] // Only the fake clock is observable in tests.
    fn now(&self) -> Instant {
        Instant::now()
    }
}
