//! Clock trait definition.

use std::fmt::Debug;
use std::time::Instant;

/// Source of the current instant.
pub(crate) trait Clock: Debug + Send + Sync + 'static {
    /// Reads the current instant.
    fn now(&self) -> Instant;
}
