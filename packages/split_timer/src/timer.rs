use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fmt;
use std::num::NonZero;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Instant;

use crate::label::DEFAULT_HISTORY_LEN;
use crate::pal::{Clock, ClockFacade};
use crate::report::HEADER;
use crate::{
    Alignment, ERR_POISONED_LOCK, Error, Label, Log, Logger, Result, Row, TableRenderer,
    TextTable, TimerSpan, Unit,
};

/// Channel name of the logger a [`Timer`] creates when none is supplied.
pub const DEFAULT_LOG_NAME: &str = "timer";

const ALIGNMENTS: [Alignment; 4] = [
    Alignment::Left,
    Alignment::Right,
    Alignment::Right,
    Alignment::Right,
];

/// Measures durations between start and stop checkpoints and aggregates them per label.
///
/// Each label is an independent stream of measurements with its own [`Label`] statistics.
/// Labels are created on first use by [`start()`](Self::start) or explicitly by
/// [`create()`](Self::create). In addition, there is one anonymous stream that keeps no
/// statistics and only reports the elapsed time of each measurement.
///
/// Durations are stored in seconds and converted into the active [`Unit`] whenever they
/// are read.
///
/// Failed operations (e.g. stopping a label that was never started) are reported through
/// the timer's [`Log`] at error level and returned as [`Error`]. The timer stays usable
/// after any error.
///
/// # Thread safety
///
/// All operations take `&self` and are serialized by an internal lock, so a timer can be
/// shared between threads. Starting and stopping the same label from different threads
/// is well defined but rarely meaningful, as the last start wins.
///
/// # Examples
///
/// ```
/// use std::thread;
/// use std::time::Duration;
///
/// use split_timer::Timer;
///
/// let timer = Timer::new();
///
/// for _ in 0..3 {
///     timer.start("sleep");
///     thread::sleep(Duration::from_millis(10));
///     let elapsed = timer.stop("sleep").unwrap();
///     assert!(elapsed >= 0.01);
/// }
///
/// let row = timer.data().next().unwrap();
/// assert_eq!(row.name(), "sleep");
/// assert_eq!(row.count(), 3);
///
/// timer.summary();
/// ```
#[derive(Debug)]
pub struct Timer {
    state: Mutex<TimerState>,

    // Capacity of the rolling window of every label this timer creates.
    history_len: NonZero<usize>,

    clock: ClockFacade,
    log: Arc<dyn Log>,
    renderer: Box<dyn TableRenderer>,
}

#[derive(Debug)]
struct TimerState {
    labels: HashMap<String, Label>,

    anonymous_start: Option<Instant>,

    // Seconds.
    anonymous_last: Option<f64>,

    unit: Unit,
}

impl Timer {
    /// Creates a timer that reports in seconds and logs to the console.
    #[must_use]
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Starts configuring a timer.
    pub fn builder() -> TimerBuilder {
        TimerBuilder::new()
    }

    /// Creates a label with empty statistics.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateLabel`] if a label with this name already exists. The
    /// existing label is left untouched.
    pub fn create(&self, name: impl Into<String>) -> Result<()> {
        let name = name.into();

        let result = match self.lock().labels.entry(name) {
            Entry::Occupied(entry) => Err(Error::DuplicateLabel {
                name: entry.key().clone(),
            }),
            Entry::Vacant(entry) => {
                let label = Label::with_history_len(entry.key().clone(), self.history_len);
                entry.insert(label);
                Ok(())
            }
        };

        self.reported(result)
    }

    /// Records the current instant as the start of a measurement on the named label.
    ///
    /// The label is created if it does not exist. A start that was not yet consumed by a
    /// [`stop()`](Self::stop) is overwritten.
    pub fn start(&self, name: &str) {
        let now = self.clock.now();

        let created = {
            let mut state = self.lock();

            if let Some(label) = state.labels.get_mut(name) {
                label.set_pending_start(now);
                false
            } else {
                let mut label = Label::with_history_len(name, self.history_len);
                label.set_pending_start(now);
                state.labels.insert(name.to_string(), label);
                true
            }
        };

        if created {
            self.log.debug(&format!("label '{name}' created on start"));
        }
    }

    /// Records the current instant as the start of a measurement on the anonymous stream.
    ///
    /// A start that was not yet consumed by [`stop_anonymous()`](Self::stop_anonymous)
    /// is overwritten.
    pub fn start_anonymous(&self) {
        let now = self.clock.now();
        self.lock().anonymous_start = Some(now);
    }

    /// Ends the measurement on the named label, adds it to the label statistics and
    /// returns the elapsed time in the active unit.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingStart`] if the label does not exist or has no pending start,
    /// e.g. because it was never started, was already stopped or was removed after the
    /// start. Nothing changes in that case.
    pub fn stop(&self, name: &str) -> Result<f64> {
        let now = self.clock.now();

        let result = {
            let mut state = self.lock();
            let unit = state.unit;

            state
                .labels
                .get_mut(name)
                .and_then(|label| {
                    let start = label.take_pending_start()?;
                    let elapsed = now.saturating_duration_since(start).as_secs_f64();
                    label.update(elapsed);
                    Some(unit.from_seconds(elapsed))
                })
                .ok_or_else(|| Error::MissingStart {
                    label: Some(name.to_string()),
                })
        };

        self.reported(result)
    }

    /// Ends the measurement on the anonymous stream and returns the elapsed time in the
    /// active unit.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingStart`] (with no label) if the anonymous stream has no
    /// pending start.
    pub fn stop_anonymous(&self) -> Result<f64> {
        let now = self.clock.now();

        let result = {
            let mut state = self.lock();

            match state.anonymous_start.take() {
                Some(start) => {
                    let elapsed = now.saturating_duration_since(start).as_secs_f64();
                    state.anonymous_last = Some(elapsed);
                    Ok(state.unit.from_seconds(elapsed))
                }
                None => Err(Error::MissingStart { label: None }),
            }
        };

        self.reported(result)
    }

    /// Clears the statistics of the named label, keeping the label itself.
    ///
    /// A pending start survives the reset.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownLabel`] if there is no label with this name.
    pub fn reset_label(&self, name: &str) -> Result<()> {
        let result = self
            .lock()
            .labels
            .get_mut(name)
            .map(Label::reset)
            .ok_or_else(|| Error::UnknownLabel {
                name: name.to_string(),
            });

        if result.is_ok() {
            self.log.debug(&format!("label '{name}' reset"));
        }

        self.reported(result)
    }

    /// Removes the named label and its statistics.
    ///
    /// Afterwards the name behaves as if it had never been used.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownLabel`] if there is no label with this name.
    pub fn remove_label(&self, name: &str) -> Result<()> {
        let result = self
            .lock()
            .labels
            .remove(name)
            .map(drop)
            .ok_or_else(|| Error::UnknownLabel {
                name: name.to_string(),
            });

        if result.is_ok() {
            self.log.debug(&format!("label '{name}' removed"));
        }

        self.reported(result)
    }

    /// Sets the unit of all values read from now on, given its name or short code.
    ///
    /// Values returned before the change are not affected. See [`Unit`] for the accepted
    /// spellings.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownUnit`] if the unit is not recognized. The timer falls back
    /// to seconds in that case and logs the fallback at info level.
    pub fn set_unit(&self, unit: &str) -> Result<Unit> {
        match unit.parse::<Unit>() {
            Ok(parsed) => {
                self.set_unit_to(parsed);
                Ok(parsed)
            }
            Err(error) => {
                self.log.error(&error.to_string());

                self.lock().unit = Unit::Second;
                self.log.info(&format!(
                    "unit '{unit}' replaced by fallback unit {}",
                    Unit::Second
                ));

                Err(error)
            }
        }
    }

    /// Sets the unit of all values read from now on.
    pub fn set_unit_to(&self, unit: Unit) {
        self.lock().unit = unit;
        self.log.info(&format!("unit set to {unit}"));
    }

    /// The active unit.
    #[must_use]
    pub fn unit(&self) -> Unit {
        self.lock().unit
    }

    /// Statistics of every label, converted into the active unit.
    ///
    /// The rows are a snapshot taken when this is called. Their order is unspecified.
    pub fn data(&self) -> impl Iterator<Item = Row> {
        self.snapshot().0.into_iter()
    }

    /// Renders the statistics of every label as a table, emits it at info level and
    /// returns it.
    ///
    /// The last line names the active unit, e.g. `(second)`.
    pub fn summary(&self) -> String {
        let rendered = self.render();
        self.log.info(&format!("summary\n{rendered}"));
        rendered
    }

    /// A snapshot of the named label, if it exists.
    #[must_use]
    pub fn label(&self, name: &str) -> Option<Label> {
        self.lock().labels.get(name).cloned()
    }

    /// Whether a label with this name exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.lock().labels.contains_key(name)
    }

    /// Number of labels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().labels.len()
    }

    /// Whether there are no labels.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().labels.is_empty()
    }

    /// The last elapsed time measured on the anonymous stream, in the active unit.
    #[must_use]
    pub fn last_anonymous(&self) -> Option<f64> {
        let state = self.lock();
        state
            .anonymous_last
            .map(|elapsed| state.unit.from_seconds(elapsed))
    }

    /// Starts the named label and returns a span that stops it when dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use split_timer::Timer;
    ///
    /// let timer = Timer::new();
    ///
    /// {
    ///     let _span = timer.span("work");
    ///     // Work happens here.
    /// }
    ///
    /// assert_eq!(timer.label("work").unwrap().count(), 1);
    /// ```
    pub fn span(&self, name: impl Into<String>) -> TimerSpan<'_> {
        TimerSpan::new(self, name.into())
    }

    fn snapshot(&self) -> (Vec<Row>, Unit) {
        let state = self.lock();

        let rows = state
            .labels
            .values()
            .map(|label| Row::new(label, state.unit))
            .collect();

        (rows, state.unit)
    }

    fn render(&self) -> String {
        let (rows, unit) = self.snapshot();
        let cells = rows.iter().map(Row::to_cells).collect::<Vec<_>>();

        let table = self.renderer.render(&HEADER, &cells, &ALIGNMENTS);
        format!("{table}\n({unit})")
    }

    fn reported<T>(&self, result: Result<T>) -> Result<T> {
        result.inspect_err(|error| self.log.error(&error.to_string()))
    }

    fn lock(&self) -> MutexGuard<'_, TimerState> {
        self.state.lock().expect(ERR_POISONED_LOCK)
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Timer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Configures a [`Timer`].
///
/// Created via [`Timer::builder()`]. Every setting is optional.
///
/// # Examples
///
/// ```
/// use std::num::NonZero;
/// use std::sync::Arc;
///
/// use split_timer::{Logger, Timer, Unit};
///
/// let timer = Timer::builder()
///     .labels(["load", "parse"])
///     .unit(Unit::Millisecond)
///     .history_len(NonZero::new(100).unwrap())
///     .log(Arc::new(Logger::console("ingest")))
///     .build();
///
/// assert!(timer.contains("load"));
/// assert_eq!(timer.unit(), Unit::Millisecond);
/// ```
#[derive(Debug)]
#[must_use]
pub struct TimerBuilder {
    labels: Vec<String>,
    unit: Unit,
    history_len: NonZero<usize>,
    log: Option<Arc<dyn Log>>,
    renderer: Option<Box<dyn TableRenderer>>,
    clock: ClockFacade,
}

impl TimerBuilder {
    fn new() -> Self {
        Self {
            labels: Vec::new(),
            unit: Unit::Second,
            history_len: DEFAULT_HISTORY_LEN,
            log: None,
            renderer: None,
            clock: ClockFacade::real(),
        }
    }

    /// Labels to create when the timer is built.
    ///
    /// Repeated names are reported as [`Error::DuplicateLabel`] through the log and
    /// otherwise ignored.
    pub fn labels(self, names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            labels: names.into_iter().map(Into::into).collect(),
            ..self
        }
    }

    /// The initial unit. Defaults to [`Unit::Second`].
    pub fn unit(self, unit: Unit) -> Self {
        Self { unit, ..self }
    }

    /// Capacity of the rolling window of every label. Defaults to
    /// [`DEFAULT_HISTORY_LEN`][crate::DEFAULT_HISTORY_LEN].
    pub fn history_len(self, history_len: NonZero<usize>) -> Self {
        Self {
            history_len,
            ..self
        }
    }

    /// Where the timer sends its messages. Defaults to a console [`Logger`] named
    /// [`DEFAULT_LOG_NAME`].
    pub fn log(self, log: Arc<dyn Log>) -> Self {
        Self {
            log: Some(log),
            ..self
        }
    }

    /// How the timer renders summaries. Defaults to [`TextTable`].
    pub fn renderer(self, renderer: impl TableRenderer + 'static) -> Self {
        Self {
            renderer: Some(Box::new(renderer)),
            ..self
        }
    }

    #[cfg(test)]
    pub(crate) fn clock(self, clock: ClockFacade) -> Self {
        Self { clock, ..self }
    }

    /// Builds the timer.
    #[must_use]
    pub fn build(self) -> Timer {
        let timer = Timer {
            state: Mutex::new(TimerState {
                labels: HashMap::new(),
                anonymous_start: None,
                anonymous_last: None,
                unit: self.unit,
            }),
            history_len: self.history_len,
            clock: self.clock,
            log: self
                .log
                .unwrap_or_else(|| Arc::new(Logger::console(DEFAULT_LOG_NAME))),
            renderer: self
                .renderer
                .unwrap_or_else(|| Box::new(TextTable::new())),
        };

        for name in self.labels {
            // Duplicates have already been reported by the time this returns.
            _ = timer.create(name);
        }

        timer
    }
}
