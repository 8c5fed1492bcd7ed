//! Testability ports for injecting time and randomness.

use chrono::{DateTime, Utc};

pub trait ClockPort: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Source of seeds for mints that were not given one.
#[cfg_attr(test, mockall::automock)]
pub trait RandomPort: Send + Sync {
    fn next_seed(&self) -> u64;
}
