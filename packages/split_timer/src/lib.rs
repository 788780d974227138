#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Named checkpoint timing with rolling statistics and tabular summaries.
//!
//! This package measures elapsed time between start and stop checkpoints, keeps per-label
//! statistics (minimum, maximum and the mean over a rolling window of recent measurements)
//! and renders them as a table.
//!
//! The core functionality includes:
//! - [`Timer`] - Starts and stops measurements, owns the labels and converts units
//! - [`Label`] - Rolling statistics of one named measurement stream
//! - [`TimerSpan`] - Stops a label when it goes out of scope
//! - [`Unit`] - The unit in which durations are reported
//!
//! Timers report through two collaborators that can be replaced:
//! - [`Log`] - Receives errors, notices and summaries. [`Logger`] is the default.
//! - [`TableRenderer`] - Lays out summaries. [`TextTable`] is the default.
//!
//! # Simple usage
//!
//! ```
//! use std::thread;
//! use std::time::Duration;
//!
//! use split_timer::Timer;
//!
//! let timer = Timer::new();
//!
//! for _ in 0..5 {
//!     timer.start("a");
//!     thread::sleep(Duration::from_millis(2));
//!     timer.stop("a").unwrap();
//!
//!     timer.start("b");
//!     thread::sleep(Duration::from_millis(1));
//!     timer.stop("b").unwrap();
//! }
//!
//! // Logs a table like this one at info level and returns it:
//! //
//! // +------+-------+-------+-------+
//! // | Name |  Min  |  Max  |  Avg  |
//! // +======+=======+=======+=======+
//! // | a    | 0.002 | 0.002 | 0.002 |
//! // +------+-------+-------+-------+
//! // | b    | 0.001 | 0.001 | 0.001 |
//! // +------+-------+-------+-------+
//! // (second)
//! timer.summary();
//! ```
//!
//! # Errors are values
//!
//! Misuse such as stopping a label that was never started does not panic. The timer logs
//! the problem at error level and returns an [`Error`], so a missing measurement can be
//! told apart from a measurement of zero.
//!
//! ```
//! use split_timer::{Error, Timer};
//!
//! let timer = Timer::new();
//!
//! match timer.stop("never_started") {
//!     Ok(elapsed) => println!("took {elapsed}"),
//!     Err(Error::MissingStart { .. }) => println!("nothing to measure"),
//!     Err(other) => panic!("unexpected: {other}"),
//! }
//! ```
//!
//! # Units
//!
//! Durations are stored in seconds and converted when read. Unrecognized unit names fall
//! back to seconds.
//!
//! ```
//! use split_timer::{Timer, Unit};
//!
//! let timer = Timer::new();
//! timer.set_unit("ms").unwrap();
//! assert_eq!(timer.unit(), Unit::Millisecond);
//!
//! assert!(timer.set_unit("fortnight").is_err());
//! assert_eq!(timer.unit(), Unit::Second);
//! ```

mod error;
mod label;
mod log;
mod logger;
mod pal;
mod report;
mod span;
mod table;
mod timer;
mod unit;

pub use error::{Error, Result};
pub use label::{DEFAULT_HISTORY_LEN, Label};
#[cfg(test)]
pub(crate) use log::MockLog;
pub use log::Log;
pub use logger::{Logger, LoggerBuilder, LoggerRegistry};
pub use report::{HEADER, Row};
pub use span::TimerSpan;
pub use table::{Alignment, Cell, DEFAULT_PRECISION, TableRenderer, TextTable};
pub use timer::{DEFAULT_LOG_NAME, Timer, TimerBuilder};
pub use unit::Unit;

pub(crate) const ERR_POISONED_LOCK: &str =
    "encountered poisoned lock - program validity cannot be guaranteed";
