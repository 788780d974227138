use std::path::PathBuf;

use thiserror::Error;

/// Errors reported by [`Timer`][crate::Timer] operations and logger construction.
///
/// Every `Timer` error is also written to the timer's [`Log`][crate::Log] at error level
/// before being returned, so callers that only care about the log may ignore the value.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// A label with the given name already exists.
    #[error("label '{name}' already exists")]
    DuplicateLabel {
        /// The name that was requested.
        name: String,
    },

    /// No label with the given name exists.
    #[error("label '{name}' does not exist")]
    UnknownLabel {
        /// The name that was requested.
        name: String,
    },

    /// A stop was requested without a matching start.
    ///
    /// `label` is `None` for the anonymous stream.
    #[error("{}", missing_start_message(.label.as_deref()))]
    MissingStart {
        /// The label that was stopped, if any.
        label: Option<String>,
    },

    /// The requested display unit is not one of the recognized units.
    #[error("unit '{unit}' is not recognized")]
    UnknownUnit {
        /// The unit string that failed to parse.
        unit: String,
    },

    /// The log file of a [`Logger`][crate::Logger] could not be opened.
    #[error("log file '{}' cannot be opened: {source}", .path.display())]
    LogFile {
        /// The requested log file path.
        path: PathBuf,

        /// What went wrong when opening the file.
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

fn missing_start_message(label: Option<&str>) -> String {
    match label {
        Some(name) => format!("start time of label '{name}' is not set"),
        None => "start time of the anonymous stream is not set".to_string(),
    }
}

/// A specialized `Result` type for timer operations, returning the crate's
/// [`Error`] type as the error value.
pub type Result<T> = std::result::Result<T, Error>;
