//! Converted statistics rows.

use crate::{Cell, Label, Unit};

/// Column titles of the summary table, in the order of [`Row::to_cells()`].
pub const HEADER: [&str; 4] = ["Name", "Min", "Max", "Avg"];

/// Statistics of one label, converted into the unit that was active when the row was taken.
///
/// Produced by [`Timer::data()`][crate::Timer::data].
#[derive(Clone, Debug, PartialEq)]
pub struct Row {
    name: String,
    min: f64,
    max: f64,
    average: Option<f64>,
    count: u64,
}

impl Row {
    pub(crate) fn new(label: &Label, unit: Unit) -> Self {
        Self {
            name: label.name().to_string(),
            min: unit.from_seconds(label.min()),
            max: unit.from_seconds(label.max()),
            average: label.average().map(|average| unit.from_seconds(average)),
            count: label.count(),
        }
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

    /// The rolling average, or `None` if nothing was observed.
    #[must_use]
    pub fn average(&self) -> Option<f64> {
        self.average
    }

    /// Total number of observations.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.count
    }

    /// The row as table cells matching [`HEADER`].
    ///
    /// Labels without observations have `-` in every statistic column.
    #[must_use]
    pub fn to_cells(&self) -> Vec<Cell> {
        let name = Cell::from(self.name.as_str());

        match self.average {
            Some(average) => vec![
                name,
                Cell::from(self.min),
                Cell::from(self.max),
                Cell::from(average),
            ],
            None => vec![name, Cell::from("-"), Cell::from("-"), Cell::from("-")],
        }
    }
}
