//! Rolling statistics for one named measurement stream.

use std::collections::VecDeque;
use std::num::NonZero;
use std::time::Instant;

use new_zealand::nz;

/// Number of most recent observations a [`Label`] keeps for its rolling average
/// unless configured otherwise.
pub const DEFAULT_HISTORY_LEN: NonZero<usize> = nz!(1000);

/// Accumulates statistics for one named stream of durations.
///
/// Tracks the minimum and maximum over every observation since construction (or the last
/// [`reset()`](Self::reset)) and the mean over a rolling window of the most recent observations.
///
/// All durations are seconds.
///
/// # Examples
///
/// ```
/// use split_timer::Label;
///
/// let mut label = Label::new("parse");
/// label.update(0.25);
/// label.update(0.75);
///
/// assert_eq!(label.min(), 0.25);
/// assert_eq!(label.max(), 0.75);
/// assert_eq!(label.average(), Some(0.5));
/// ```
#[derive(Clone, Debug)]
pub struct Label {
    name: String,

    // Set by a start, taken by the matching stop.
    pending_start: Option<Instant>,

    min: f64,
    max: f64,

    // Oldest first. Never longer than `history_len`.
    history: VecDeque<f64>,
    history_len: NonZero<usize>,

    // None until the first observation.
    average: Option<f64>,

    count: u64,
}

impl Label {
    /// Creates a label that averages over the last [`DEFAULT_HISTORY_LEN`] observations.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_history_len(name, DEFAULT_HISTORY_LEN)
    }

    /// Creates a label that averages over the last `history_len` observations.
    #[must_use]
    pub fn with_history_len(name: impl Into<String>, history_len: NonZero<usize>) -> Self {
        Self {
            name: name.into(),
            pending_start: None,
            min: f64::INFINITY,
            max: 0.0,
            history: VecDeque::with_capacity(history_len.get().saturating_add(1)),
            history_len,
            average: None,
            count: 0,
        }
    }

    /// Records one observed duration, in seconds.
    ///
    /// The value is not validated. Negative values (e.g. from clock anomalies) are
    /// accepted and take part in the statistics like any other value.
    pub fn update(&mut self, duration: f64) {
        if duration < self.min {
            self.min = duration;
        }

        if duration > self.max {
            self.max = duration;
        }

        self.history.push_back(duration);
        if self.history.len() > self.history_len.get() {
            self.history.pop_front();
        }

        self.average = mean(&self.history);
        self.count = self.count.saturating_add(1);
    }

    /// Restores the statistics to their initial state.
    ///
    /// The name, the history capacity and any pending start are preserved.
    pub fn reset(&mut self) {
        self.min = f64::INFINITY;
        self.max = 0.0;
        self.history.clear();
        self.average = None;
        self.count = 0;
    }

    /// The name of the label.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The smallest observed duration, or positive infinity if nothing was observed.
    #[must_use]
    pub fn min(&self) -> f64 {
        self.min
    }

    /// The largest observed duration, or zero if nothing was observed.
    #[must_use]
    pub fn max(&self) -> f64 {
        self.max
    }

    /// The mean of the observations currently in the rolling window.
    ///
    /// `None` if nothing was observed.
    #[must_use]
    pub fn average(&self) -> Option<f64> {
        self.average
    }

    /// Total number of observations, including those already evicted from the window.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.count
    }

    /// The observations in the rolling window, oldest first.
    pub fn history(&self) -> impl Iterator<Item = f64> {
        self.history.iter().copied()
    }

    /// The capacity of the rolling window.
    #[must_use]
    pub fn history_len(&self) -> NonZero<usize> {
        self.history_len
    }

    /// Whether a start has been recorded that no stop has consumed yet.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending_start.is_some()
    }

    pub(crate) fn set_pending_start(&mut self, at: Instant) {
        self.pending_start = Some(at);
    }

    pub(crate) fn take_pending_start(&mut self) -> Option<Instant> {
        self.pending_start.take()
    }
}

fn mean(values: &VecDeque<f64>) -> Option<f64> {
    if values.is_empty() {
        return None;
    }

    #[expect(
        clippy::cast_precision_loss,
        reason = "window lengths are far below the 2^52 where f64 loses integer precision"
    )]
    let len = values.len() as f64;

    Some(values.iter().sum::<f64>() / len)
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
#[allow(clippy::float_cmp, reason = "test inputs are exactly representable")]
mod tests {
    use static_assertions::assert_impl_all;

    use super::*;

    assert_impl_all!(Label: Send, Sync);

    #[test]
    fn starts_empty() {
        let label = Label::new("empty");

        assert_eq!(label.name(), "empty");
        assert_eq!(label.min(), f64::INFINITY);
        assert_eq!(label.max(), 0.0);
        assert_eq!(label.average(), None);
        assert_eq!(label.count(), 0);
        assert_eq!(label.history().count(), 0);
        assert_eq!(label.history_len(), DEFAULT_HISTORY_LEN);
        assert!(!label.is_pending());
    }

    #[test]
    fn single_update_sets_all_statistics() {
        let mut label = Label::new("one");
        label.update(0.5);

        assert_eq!(label.min(), 0.5);
        assert_eq!(label.max(), 0.5);
        assert_eq!(label.average(), Some(0.5));
        assert_eq!(label.count(), 1);
    }

    #[test]
    fn extremes_bracket_every_observation() {
        let mut label = Label::new("extremes");
        let values = [0.5, 0.25, 2.0, 1.0, 0.125, 1.5];

        for (index, value) in values.into_iter().enumerate() {
            label.update(value);

            assert!(label.history().all(|v| label.min() <= v && v <= label.max()));
            assert_eq!(label.history().count(), index + 1);
        }

        assert_eq!(label.min(), 0.125);
        assert_eq!(label.max(), 2.0);
    }

    #[test]
    fn window_evicts_oldest_first() {
        let mut label = Label::with_history_len("window", nz!(4));

        for value in [1.0, 2.0, 3.0, 4.0, 5.0] {
            label.update(value);
        }

        assert_eq!(label.history().collect::<Vec<_>>(), vec![2.0, 3.0, 4.0, 5.0]);
        assert_eq!(label.average(), Some(3.5));
        assert_eq!(label.count(), 5);

        // Extremes are not windowed.
        assert_eq!(label.min(), 1.0);
        assert_eq!(label.max(), 5.0);
    }

    #[test]
    fn default_window_keeps_last_thousand() {
        let mut label = Label::new("large");

        for i in 0..=1000_u32 {
            label.update(f64::from(i));
        }

        let history = label.history().collect::<Vec<_>>();
        assert_eq!(history.len(), 1000);
        assert_eq!(history.first().copied(), Some(1.0));
        assert_eq!(history.last().copied(), Some(1000.0));
    }

    #[test]
    fn negative_durations_are_accepted() {
        let mut label = Label::new("skewed");
        label.update(-0.5);

        assert_eq!(label.min(), -0.5);
        // Max starts at zero, so a negative value never raises it.
        assert_eq!(label.max(), 0.0);
        assert_eq!(label.average(), Some(-0.5));
    }

    #[test]
    fn reset_restores_initial_statistics() {
        let mut label = Label::with_history_len("reset", nz!(8));
        label.set_pending_start(Instant::now());
        label.update(1.0);
        label.update(3.0);

        label.reset();

        assert_eq!(label.name(), "reset");
        assert_eq!(label.min(), f64::INFINITY);
        assert_eq!(label.max(), 0.0);
        assert_eq!(label.average(), None);
        assert_eq!(label.count(), 0);
        assert_eq!(label.history().count(), 0);
        assert_eq!(label.history_len().get(), 8);
        assert!(label.is_pending());
    }

    #[test]
    fn pending_start_is_consumed_once() {
        let mut label = Label::new("pending");
        let at = Instant::now();

        label.set_pending_start(at);
        assert!(label.is_pending());

        assert_eq!(label.take_pending_start(), Some(at));
        assert!(!label.is_pending());
        assert_eq!(label.take_pending_start(), None);
    }
}
