//! Platform abstraction layer for reading the clock.
//!
//! Timers read the current instant through [`ClockFacade`], which is either the real
//! monotonic clock or, in tests, a fake clock whose time only moves when told to.

mod abstractions;
mod facade;
#[cfg(test)]
mod fake;
mod real;

pub(crate) use abstractions::Clock;
pub(crate) use facade::ClockFacade;
#[cfg(test)]
pub(crate) use fake::FakeClock;
