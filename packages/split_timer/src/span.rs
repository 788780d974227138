//! Scoped measurements.

use crate::{Result, Timer};

/// A measurement on one label that ends when the span is dropped.
///
/// Created by [`Timer::span()`], which starts the label. Dropping the span stops the
/// label, adding the measurement to its statistics. Use [`stop()`](Self::stop) instead
/// of dropping to also get the elapsed time.
///
/// # Examples
///
/// ```
/// use split_timer::Timer;
///
/// let timer = Timer::new();
///
/// let span = timer.span("checksum");
/// // Work happens here.
/// let elapsed = span.stop().unwrap();
///
/// assert!(elapsed >= 0.0);
/// ```
#[derive(Debug)]
#[must_use = "Measurements are taken between creation and drop"]
pub struct TimerSpan<'a> {
    timer: &'a Timer,

    // Taken by whichever of `stop()` or `drop()` comes first.
    name: Option<String>,
}

impl<'a> TimerSpan<'a> {
    pub(crate) fn new(timer: &'a Timer, name: String) -> Self {
        timer.start(&name);

        Self {
            timer,
            name: Some(name),
        }
    }

    /// The label this span measures.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }

    /// Stops the label and returns the elapsed time in the active unit.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingStart`][crate::Error::MissingStart] if the label lost its
    /// pending start while the span was open, e.g. because it was removed or stopped
    /// directly on the timer.
    pub fn stop(mut self) -> Result<f64> {
        self.finish().expect("span name is taken exactly once")
    }

    fn finish(&mut self) -> Option<Result<f64>> {
        self.name.take().map(|name| self.timer.stop(&name))
    }
}

impl Drop for TimerSpan<'_> {
    fn drop(&mut self) {
        // Errors are already reported through the timer's log.
        _ = self.finish();
    }
}
