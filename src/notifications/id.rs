// SPDX-License-Identifier: MPL-2.0
//! Toast identifiers.
//!
//! Ids come from a counter owned by the manager. The counter wraps back to
//! zero at [`ID_WRAP_BOUND`], so ids stay unique for any realistic session.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter value at which id generation wraps back to zero (2^53 - 1).
pub const ID_WRAP_BOUND: u64 = (1 << 53) - 1;

/// Unique identifier for a toast, rendered as a decimal string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ToastId(u64);

impl ToastId {
    /// Wraps a raw counter value.
    #[must_use]
    pub const fn from_raw(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw counter value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ToastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ToastId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

/// Monotonic id source.
#[derive(Debug, Default)]
pub struct IdGenerator {
    count: AtomicU64,
}

impl IdGenerator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts the counter at an arbitrary value. The next id is `start + 1`
    /// modulo the wrap bound.
    #[must_use]
    pub fn starting_at(start: u64) -> Self {
        Self {
            count: AtomicU64::new(start % ID_WRAP_BOUND),
        }
    }

    /// Advances the counter and returns the new id.
    pub fn next_id(&self) -> ToastId {
        let advance = |count: u64| Some((count + 1) % ID_WRAP_BOUND);
        // The closure never returns None, so both arms carry the previous value.
        let previous = match self
            .count
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, advance)
        {
            Ok(previous) | Err(previous) => previous,
        };
        ToastId((previous + 1) % ID_WRAP_BOUND)
    }
}
