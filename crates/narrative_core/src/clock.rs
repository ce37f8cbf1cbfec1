//! Wall-clock abstraction for timestamps and debounce checks.
//!
//! # Responsibility
//! - Supply "now" to the store (record timestamps) and history (debounce).
//! - Let tests drive time deterministically.
//!
//! # Invariants
//! - Record timestamps are rendered as ISO-8601 UTC with millisecond precision.

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use std::cell::Cell;
use std::rc::Rc;

/// Source of the current wall-clock time.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Clock backed by the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Manually advanced clock for tests and scripted sessions.
///
/// Share one instance between collaborators with `Rc<ManualClock>`.
#[derive(Debug, Clone)]
pub struct ManualClock {
    current: Cell<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            current: Cell::new(start),
        }
    }

    /// Starts at a fixed instant (`2024-01-01T00:00:00Z`).
    pub fn at_epoch() -> Self {
        Self::new(DateTime::<Utc>::from_timestamp(1_704_067_200, 0).unwrap_or_default())
    }

    pub fn advance_ms(&self, millis: i64) {
        self.current
            .set(self.current.get() + Duration::milliseconds(millis));
    }

    pub fn set(&self, instant: DateTime<Utc>) {
        self.current.set(instant);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        self.current.get()
    }
}

impl<C: Clock + ?Sized> Clock for Rc<C> {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}

/// Formats an instant the way record timestamps are stored.
pub fn to_record_timestamp(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}
