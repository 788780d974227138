//! The tabular rendering collaborator of a [`Timer`][crate::Timer].

use std::fmt::{self, Debug, Display};
use std::iter;

/// Horizontal alignment of the values in one table column.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[expect(
    clippy::exhaustive_enums,
    reason = "columns are either flush left or flush right"
)]
pub enum Alignment {
    /// Values start at the left edge of the column.
    #[default]
    Left,

    /// Values end at the right edge of the column.
    Right,
}

/// One value in a table row.
#[derive(Clone, Debug, PartialEq)]
#[non_exhaustive]
pub enum Cell {
    /// Text rendered as-is.
    Text(String),

    /// A number rendered with the renderer's precision.
    Float(f64),
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

/// Turns a header and rows of cells into a display string.
///
/// [`TextTable`] is the implementation used by default.
pub trait TableRenderer: Debug + Send + Sync {
    /// Renders the table.
    ///
    /// `alignments` applies to the data cells, column by column. Columns without an
    /// entry are aligned left. Rows shorter than the header are padded with empty cells.
    fn render(&self, header: &[&str], rows: &[Vec<Cell>], alignments: &[Alignment]) -> String;
}

/// Number of decimals [`TextTable`] renders for [`Cell::Float`] values unless configured otherwise.
pub const DEFAULT_PRECISION: usize = 3;

/// Renders tables as ASCII boxes, one rule between every row.
///
/// # Examples
///
/// ```
/// use split_timer::{Alignment, Cell, TableRenderer, TextTable};
///
/// let rendered = TextTable::new().render(
///     &["Name", "Avg"],
///     &[vec![Cell::from("load"), Cell::from(0.5)]],
///     &[Alignment::Left, Alignment::Right],
/// );
///
/// assert_eq!(
///     rendered,
///     "+------+-------+\n\
///      | Name |  Avg  |\n\
///      +======+=======+\n\
///      | load | 0.500 |\n\
///      +------+-------+"
/// );
/// ```
#[derive(Clone, Debug)]
pub struct TextTable {
    precision: usize,
}

impl TextTable {
    /// Creates a renderer that uses [`DEFAULT_PRECISION`] decimals for numbers.
    #[must_use]
    pub fn new() -> Self {
        Self::with_precision(DEFAULT_PRECISION)
    }

    /// Creates a renderer that uses `precision` decimals for numbers.
    #[must_use]
    pub fn with_precision(precision: usize) -> Self {
        Self { precision }
    }

    fn format_cell(&self, cell: &Cell) -> String {
        match cell {
            Cell::Text(text) => text.clone(),
            Cell::Float(value) => format!("{value:.precision$}", precision = self.precision),
        }
    }
}

impl Default for TextTable {
    fn default() -> Self {
        Self::new()
    }
}

impl TableRenderer for TextTable {
    fn render(&self, header: &[&str], rows: &[Vec<Cell>], alignments: &[Alignment]) -> String {
        let header = header.iter().map(|name| (*name).to_string()).collect::<Vec<_>>();

        let rows = rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| self.format_cell(cell))
                    .chain(iter::repeat(String::new()))
                    .take(header.len())
                    .collect::<Vec<_>>()
            })
            .collect::<Vec<_>>();

        let widths = header
            .iter()
            .enumerate()
            .map(|(column, title)| {
                rows.iter()
                    .filter_map(|row| row.get(column))
                    .map(|value| value.chars().count())
                    .chain(iter::once(title.chars().count()))
                    .max()
                    .unwrap_or_default()
            })
            .collect::<Vec<_>>();

        Boxed {
            header: &header,
            rows: &rows,
            widths: &widths,
            alignments,
        }
        .to_string()
    }
}

/// Pre-formatted table contents, ready to be drawn.
struct Boxed<'a> {
    header: &'a [String],
    rows: &'a [Vec<String>],
    widths: &'a [usize],
    alignments: &'a [Alignment],
}

impl Boxed<'_> {
    fn rule(&self, f: &mut fmt::Formatter<'_>, fill: char) -> fmt::Result {
        f.write_str("+")?;

        for width in self.widths {
            for _ in 0..width.saturating_add(2) {
                write!(f, "{fill}")?;
            }

            f.write_str("+")?;
        }

        Ok(())
    }

    fn line<'v>(
        &self,
        f: &mut fmt::Formatter<'_>,
        values: impl IntoIterator<Item = &'v String>,
        align: impl Fn(usize) -> Option<Alignment>,
    ) -> fmt::Result {
        f.write_str("|")?;

        let cells = values.into_iter().zip(self.widths.iter().copied());

        for (column, (value, width)) in cells.enumerate() {
            match align(column) {
                Some(Alignment::Left) => write!(f, " {value:<width$} |")?,
                Some(Alignment::Right) => write!(f, " {value:>width$} |")?,
                None => write!(f, " {value:^width$} |")?,
            }
        }

        Ok(())
    }
}

impl Display for Boxed<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.rule(f, '-')?;
        writeln!(f)?;

        // Titles are centered regardless of the column alignment.
        self.line(f, self.header, |_| None)?;
        writeln!(f)?;
        self.rule(f, '=')?;

        for row in self.rows {
            writeln!(f)?;
            self.line(f, row, |column| {
                Some(self.alignments.get(column).copied().unwrap_or_default())
            })?;
            writeln!(f)?;
            self.rule(f, '-')?;
        }

        Ok(())
    }
}
