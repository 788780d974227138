//! The leveled-logging collaborator of a [`Timer`][crate::Timer].

use std::fmt::Debug;

/// Destination of the messages a [`Timer`][crate::Timer] emits.
///
/// The timer reports errors, unit changes and summaries through this trait instead of
/// printing directly. [`Logger`][crate::Logger] is the implementation used by default;
/// any other sink (e.g. one that forwards to an existing logging setup or one that
/// records messages in tests) can be supplied via
/// [`TimerBuilder::log()`][crate::TimerBuilder::log].
///
/// # Examples
///
/// ```
/// use std::sync::{Arc, Mutex};
///
/// use split_timer::{Log, Timer};
///
/// #[derive(Debug, Default)]
/// struct Collect(Mutex<Vec<String>>);
///
/// impl Log for Collect {
///     fn debug(&self, _message: &str) {}
///
///     fn info(&self, message: &str) {
///         self.0.lock().unwrap().push(message.to_string());
///     }
///
///     fn error(&self, message: &str) {
///         self.0.lock().unwrap().push(message.to_string());
///     }
/// }
///
/// let log = Arc::new(Collect::default());
/// let timer = Timer::builder().log(log.clone()).build();
///
/// assert!(timer.stop("never_started").is_err());
/// assert_eq!(log.0.lock().unwrap().len(), 1);
/// ```
#[cfg_attr(test, mockall::automock)]
pub trait Log: Debug + Send + Sync {
    /// Emits a diagnostic message.
    fn debug(&self, message: &str);

    /// Emits an informational message.
    fn info(&self, message: &str);

    /// Emits an error message.
    fn error(&self, message: &str);
}
