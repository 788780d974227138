use std::fmt;
use std::str::FromStr;

use crate::Error;

/// The unit in which a [`Timer`][crate::Timer] reports durations.
///
/// Durations are always stored in seconds. The unit only affects values as they are read,
/// by dividing the stored seconds by [`Unit::scale()`].
///
/// Units parse from their full names (singular or plural) and from the short codes
/// `us`, `ms`, `s`, `min`, `hr` and `day`, ignoring ASCII case.
///
/// # Examples
///
/// ```
/// use split_timer::Unit;
///
/// let unit: Unit = "ms".parse().unwrap();
/// assert_eq!(unit, Unit::Millisecond);
/// assert_eq!(unit.to_string(), "millisecond");
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[expect(
    clippy::exhaustive_enums,
    reason = "the set of display units is fixed"
)]
pub enum Unit {
    /// One millionth of a second.
    Microsecond,

    /// One thousandth of a second.
    Millisecond,

    /// The canonical unit in which durations are stored.
    #[default]
    Second,

    /// Sixty seconds.
    Minute,

    /// 3600 seconds.
    Hour,

    /// 86400 seconds.
    Day,
}

impl Unit {
    /// All recognized units, from smallest to largest.
    pub const ALL: [Self; 6] = [
        Self::Microsecond,
        Self::Millisecond,
        Self::Second,
        Self::Minute,
        Self::Hour,
        Self::Day,
    ];

    /// The number of seconds in one of this unit.
    ///
    /// Dividing a duration in seconds by this value converts it into this unit.
    #[must_use]
    pub const fn scale(self) -> f64 {
        match self {
            Self::Microsecond => 1e-6,
            Self::Millisecond => 1e-3,
            Self::Second => 1.0,
            Self::Minute => 60.0,
            Self::Hour => 3600.0,
            Self::Day => 86400.0,
        }
    }

    /// The full singular name of the unit, e.g. `"millisecond"`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Microsecond => "microsecond",
            Self::Millisecond => "millisecond",
            Self::Second => "second",
            Self::Minute => "minute",
            Self::Hour => "hour",
            Self::Day => "day",
        }
    }

    /// The short code of the unit, e.g. `"ms"`.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Microsecond => "us",
            Self::Millisecond => "ms",
            Self::Second => "s",
            Self::Minute => "min",
            Self::Hour => "hr",
            Self::Day => "day",
        }
    }

    /// Converts a duration in seconds into this unit.
    #[must_use]
    pub fn from_seconds(self, seconds: f64) -> f64 {
        seconds / self.scale()
    }
}

impl FromStr for Unit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();

        Self::ALL
            .into_iter()
            .find(|unit| {
                normalized == unit.name()
                    || normalized == unit.symbol()
                    || normalized.strip_suffix('s') == Some(unit.name())
            })
            .ok_or_else(|| Error::UnknownUnit {
                unit: s.to_string(),
            })
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
