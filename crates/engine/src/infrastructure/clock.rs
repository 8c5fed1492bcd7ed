//! Clock and random implementations.

use crate::infrastructure::ports::{ClockPort, RandomPort};
use chrono::{DateTime, Utc};

/// System clock - uses real time.
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ClockPort for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// System random - seeds drawn from the thread-local generator.
pub struct SystemRandom;

impl SystemRandom {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomPort for SystemRandom {
    fn next_seed(&self) -> u64 {
        use rand::Rng;
        rand::thread_rng().gen()
    }
}

/// Fixed clock for testing.
#[cfg(test)]
pub struct FixedClock(pub DateTime<Utc>);

#[cfg(test)]
impl ClockPort for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Counting random for testing: yields `start`, `start + 1`, ...
#[cfg(test)]
pub struct SequenceRandom(std::sync::atomic::AtomicU64);

#[cfg(test)]
impl SequenceRandom {
    pub fn starting_at(start: u64) -> Self {
        Self(std::sync::atomic::AtomicU64::new(start))
    }
}

#[cfg(test)]
impl RandomPort for SequenceRandom {
    fn next_seed(&self) -> u64 {
        self.0.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
    }
}
