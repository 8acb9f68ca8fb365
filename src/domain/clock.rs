//! Injectable time source.

use chrono::{DateTime, Utc};

/// Provides the current time for record creation and expiry comparisons.
///
/// The registry never reads the system clock directly; injecting it keeps
/// expiry behavior deterministic under test.
#[cfg_attr(test, mockall::automock)]
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
