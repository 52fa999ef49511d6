//! Injectable wall-clock for wildcard pre-release expansion.
//!
//! Wildcard labels embed the current date and millisecond-of-day, so the
//! parser takes its clock as an explicit capability instead of reading
//! ambient time. Production callers use [`SystemClock`]; tests supply a
//! [`FixedClock`] and assert exact output.

use chrono::{DateTime, Local};

/// Source of the current local time
pub trait Clock {
    fn now(&self) -> DateTime<Local>;
}

/// The process wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Clock pinned to a single instant, for deterministic tests
#[derive(Debug, Clone)]
pub struct FixedClock(pub DateTime<Local>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        self.0
    }
}
