//! Console and file logging built on `tracing`.
//!
//! A [`Logger`] owns a private `tracing` dispatcher instead of installing a global
//! subscriber, so any number of loggers (and any global `tracing` setup of the host
//! application) can coexist. Records look like this:
//!
//! ```text
//! [I 2024-05-01 13:45:12 timer] unit set to millisecond
//! ```
//!
//! The letter is the first letter of the level and the timestamp is rendered in the
//! UTC offset the logger was built with.

use std::collections::HashMap;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, FixedOffset, Offset, Utc};
use tracing::{Dispatch, Level, Subscriber};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{Layer, Registry};

use crate::{ERR_POISONED_LOCK, Error, Log, Result};

/// A named log channel that writes to stdout and, optionally, to a file.
///
/// Clones share the same underlying dispatcher and outputs.
///
/// # Examples
///
/// ```
/// use split_timer::{Log, Logger};
///
/// let logger = Logger::console("pipeline");
/// logger.info("stage 1 done");
/// ```
///
/// Writing to a file as well:
///
/// ```
/// use split_timer::{Log, Logger};
///
/// # let dir = tempfile::tempdir().unwrap();
/// # let path = dir.path().join("pipeline.log");
/// let logger = Logger::builder("pipeline").file(&path).build().unwrap();
/// logger.error("stage 2 failed");
///
/// let contents = std::fs::read_to_string(&path).unwrap();
/// assert!(contents.contains("pipeline] stage 2 failed"));
/// ```
#[derive(Clone, Debug)]
pub struct Logger {
    inner: Arc<LoggerInner>,
}

#[derive(Debug)]
struct LoggerInner {
    name: String,
    dispatch: Dispatch,
}

impl Logger {
    /// Starts configuring a logger with the given channel name.
    pub fn builder(name: impl Into<String>) -> LoggerBuilder {
        LoggerBuilder::new(name)
    }

    /// Creates a console-only logger with default settings.
    ///
    /// Equivalent to `Logger::builder(name).build()`, which cannot fail without a log file.
    #[must_use]
    pub fn console(name: impl Into<String>) -> Self {
        let builder = LoggerBuilder::new(name);
        Self::assemble(builder.name, builder.utc_offset, builder.debug, None)
    }

    /// The channel name included in every record.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    fn assemble(
        name: String,
        utc_offset: FixedOffset,
        debug: bool,
        file: Option<RollingFileAppender>,
    ) -> Self {
        let format = RecordFormat {
            channel: name.clone(),
            utc_offset,
        };

        let level = if debug {
            LevelFilter::DEBUG
        } else {
            LevelFilter::INFO
        };

        let mut layers: Vec<Box<dyn Layer<Registry> + Send + Sync>> = vec![
            tracing_subscriber::fmt::layer()
                .event_format(format.clone())
                .with_writer(io::stdout)
                .with_filter(level)
                .boxed(),
        ];

        if let Some(appender) = file {
            layers.push(
                tracing_subscriber::fmt::layer()
                    .event_format(format)
                    .with_writer(appender)
                    .with_filter(level)
                    .boxed(),
            );
        }

        let subscriber = tracing_subscriber::registry().with(layers);

        Self {
            inner: Arc::new(LoggerInner {
                name,
                dispatch: Dispatch::new(subscriber),
            }),
        }
    }

    #[cfg(test)]
    fn ptr_eq(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.inner, &b.inner)
    }
}

impl Log for Logger {
    fn debug(&self, message: &str) {
        tracing::dispatcher::with_default(&self.inner.dispatch, || {
            tracing::debug!("{message}");
        });
    }

    fn info(&self, message: &str) {
        tracing::dispatcher::with_default(&self.inner.dispatch, || {
            tracing::info!("{message}");
        });
    }

    fn error(&self, message: &str) {
        tracing::dispatcher::with_default(&self.inner.dispatch, || {
            tracing::error!("{message}");
        });
    }
}

/// Configures a [`Logger`].
///
/// Created via [`Logger::builder()`].
#[derive(Clone, Debug)]
#[must_use]
pub struct LoggerBuilder {
    name: String,
    file: Option<PathBuf>,
    utc_offset: FixedOffset,
    debug: bool,
}

impl LoggerBuilder {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            file: None,
            utc_offset: Utc.fix(),
            debug: false,
        }
    }

    /// Also appends every record to the file at `path`, creating it (and its parent
    /// directories) if needed.
    pub fn file(self, path: impl Into<PathBuf>) -> Self {
        Self {
            file: Some(path.into()),
            ..self
        }
    }

    /// The offset from UTC in which record timestamps are rendered. Defaults to UTC.
    pub fn utc_offset(self, offset: FixedOffset) -> Self {
        Self {
            utc_offset: offset,
            ..self
        }
    }

    /// Whether debug-level records are emitted. Defaults to `false`, emitting info and above.
    pub fn debug(self, enabled: bool) -> Self {
        Self {
            debug: enabled,
            ..self
        }
    }

    /// Builds the logger.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LogFile`] if a log file was configured and it cannot be opened.
    pub fn build(self) -> Result<Logger> {
        let file = self.file.as_deref().map(open_log_file).transpose()?;

        Ok(Logger::assemble(
            self.name,
            self.utc_offset,
            self.debug,
            file,
        ))
    }
}

fn open_log_file(path: &Path) -> Result<RollingFileAppender> {
    let log_file_error = |source: Box<dyn std::error::Error + Send + Sync>| Error::LogFile {
        path: path.to_path_buf(),
        source,
    };

    let Some(file_name) = path.file_name() else {
        return Err(log_file_error(
            io::Error::new(io::ErrorKind::InvalidInput, "path does not name a file").into(),
        ));
    };

    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name.to_string_lossy())
        .build(directory)
        .map_err(|error| log_file_error(error.into()))
}

/// Lays out records as `[<level letter> <timestamp> <channel>] <message>`.
#[derive(Clone, Debug)]
struct RecordFormat {
    channel: String,
    utc_offset: FixedOffset,
}

impl<S, N> FormatEvent<S, N> for RecordFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &tracing::Event<'_>,
    ) -> fmt::Result {
        let timestamp = Utc::now().with_timezone(&self.utc_offset);
        write_prefix(&mut writer, *event.metadata().level(), &timestamp, &self.channel)?;

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

fn write_prefix(
    out: &mut impl fmt::Write,
    level: Level,
    timestamp: &DateTime<FixedOffset>,
    channel: &str,
) -> fmt::Result {
    let letter = match level {
        Level::TRACE => 'T',
        Level::DEBUG => 'D',
        Level::INFO => 'I',
        Level::WARN => 'W',
        Level::ERROR => 'E',
    };

    write!(
        out,
        "[{letter} {} {channel}] ",
        timestamp.format("%Y-%m-%d %H:%M:%S")
    )
}

/// Hands out one [`Logger`] per channel name.
///
/// Asking for a name that is already registered returns the existing logger and ignores
/// the new configuration, so repeated requests never attach a second console output.
///
/// This is an ordinary value: create one where the application starts and pass it to
/// whoever needs loggers.
///
/// # Examples
///
/// ```
/// use split_timer::{Logger, LoggerRegistry};
///
/// let registry = LoggerRegistry::new();
///
/// let first = registry.get_or_init(Logger::builder("app")).unwrap();
/// let second = registry.get_or_init(Logger::builder("app").debug(true)).unwrap();
///
/// assert_eq!(registry.len(), 1);
/// # let _ = (first, second);
/// ```
#[derive(Debug, Default)]
pub struct LoggerRegistry {
    loggers: Mutex<HashMap<String, Logger>>,
}

impl LoggerRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the logger registered under the builder's name, building and registering
    /// it first if there is none.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LogFile`] if a new logger had to be built and its log file
    /// cannot be opened. Nothing is registered in that case.
    pub fn get_or_init(&self, builder: LoggerBuilder) -> Result<Logger> {
        let mut loggers = self.loggers.lock().expect(ERR_POISONED_LOCK);

        if let Some(existing) = loggers.get(&builder.name) {
            return Ok(existing.clone());
        }

        let logger = builder.build()?;
        loggers.insert(logger.name().to_string(), logger.clone());

        Ok(logger)
    }

    /// The logger registered under `name`, if any.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Logger> {
        self.loggers
            .lock()
            .expect(ERR_POISONED_LOCK)
            .get(name)
            .cloned()
    }

    /// Number of registered loggers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.loggers.lock().expect(ERR_POISONED_LOCK).len()
    }

    /// Whether no logger has been registered yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.loggers.lock().expect(ERR_POISONED_LOCK).is_empty()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::fs;

    use chrono::TimeZone;
    use static_assertions::assert_impl_all;

    use super::*;

    assert_impl_all!(Logger: Send, Sync);
    assert_impl_all!(LoggerRegistry: Send, Sync);

    fn taipei() -> FixedOffset {
        FixedOffset::east_opt(8 * 3600).unwrap()
    }

    #[test]
    fn prefix_has_level_letter_timestamp_and_channel() {
        let timestamp = taipei().with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();

        let mut out = String::new();
        write_prefix(&mut out, Level::INFO, &timestamp, "timer").unwrap();
        assert_eq!(out, "[I 2024-01-02 03:04:05 timer] ");

        let mut out = String::new();
        write_prefix(&mut out, Level::ERROR, &timestamp, "timer").unwrap();
        assert_eq!(out, "[E 2024-01-02 03:04:05 timer] ");
    }

    #[test]
    fn prefix_renders_local_time_of_offset() {
        let utc = Utc.with_ymd_and_hms(2024, 1, 1, 20, 0, 0).unwrap();
        let local = utc.with_timezone(&taipei());

        let mut out = String::new();
        write_prefix(&mut out, Level::DEBUG, &local, "x").unwrap();
        assert_eq!(out, "[D 2024-01-02 04:00:00 x] ");
    }

    #[test]
    fn file_receives_records_at_info_and_above() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("timer.log");

        let logger = Logger::builder("timer").file(&path).build().unwrap();
        logger.debug("hidden");
        logger.info("shown");
        logger.error("broken");

        let contents = fs::read_to_string(&path).unwrap();
        let lines = contents.lines().collect::<Vec<_>>();

        assert_eq!(lines.len(), 2, "{contents}");
        assert!(lines.first().unwrap().starts_with("[I "));
        assert!(lines.first().unwrap().ends_with(" timer] shown"));
        assert!(lines.last().unwrap().starts_with("[E "));
        assert!(lines.last().unwrap().ends_with(" timer] broken"));
    }

    #[test]
    fn debug_records_are_emitted_when_enabled() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("debug.log");

        let logger = Logger::builder("verbose")
            .file(&path)
            .debug(true)
            .build()
            .unwrap();
        logger.debug("details");

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("[D "), "{contents}");
        assert!(contents.contains(" verbose] details"), "{contents}");
    }

    #[test]
    fn file_in_missing_directory_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("out.log");

        let logger = Logger::builder("nested").file(&path).build().unwrap();
        logger.info("hello");

        assert!(path.exists());
    }

    #[test]
    fn path_without_file_name_is_rejected() {
        let error = Logger::builder("broken").file("..").build().unwrap_err();

        assert!(matches!(error, Error::LogFile { .. }));
    }

    #[test]
    fn console_logger_keeps_name() {
        let logger = Logger::console("plain");
        assert_eq!(logger.name(), "plain");

        // Must not panic without any global subscriber installed.
        logger.info("to stdout");
    }

    #[test]
    fn registry_reuses_logger_per_name() {
        let registry = LoggerRegistry::new();
        assert!(registry.is_empty());

        let first = registry.get_or_init(Logger::builder("shared")).unwrap();
        let second = registry
            .get_or_init(Logger::builder("shared").debug(true))
            .unwrap();
        let other = registry.get_or_init(Logger::builder("other")).unwrap();

        assert!(Logger::ptr_eq(&first, &second));
        assert!(!Logger::ptr_eq(&first, &other));
        assert_eq!(registry.len(), 2);
        assert!(Logger::ptr_eq(&registry.get("shared").unwrap(), &first));
        assert!(registry.get("missing").is_none());
    }

    #[test]
    fn registry_does_not_register_failed_logger() {
        let registry = LoggerRegistry::new();

        registry
            .get_or_init(Logger::builder("bad").file(".."))
            .unwrap_err();

        assert!(registry.is_empty());
    }
}
