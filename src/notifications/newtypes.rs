// SPDX-License-Identifier: MPL-2.0
//! Toast manager newtypes.
//!
//! This module provides type-safe wrappers for the manager's tunables,
//! ensuring they are always within valid ranges.

use crate::config::{
    DEFAULT_REMOVE_DELAY_MS, DEFAULT_TOAST_LIMIT, MAX_REMOVE_DELAY_MS, MAX_TOAST_LIMIT,
    MIN_REMOVE_DELAY_MS, MIN_TOAST_LIMIT,
};
use std::time::Duration;

// =============================================================================
// ToastLimit
// =============================================================================

/// Maximum number of toasts retained in the store at once.
///
/// This newtype enforces validity at the type level, ensuring the value
/// is always within the valid range (1–50 toasts).
///
/// # Example
///
/// ```
/// use toast_store::notifications::ToastLimit;
///
/// let limit = ToastLimit::new(3);
/// assert_eq!(limit.value(), 3);
///
/// // Values outside range are clamped
/// let too_low = ToastLimit::new(0);
/// assert_eq!(too_low.value(), 1); // Clamped to min
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToastLimit(usize);

impl ToastLimit {
    /// Creates a new toast limit, clamping to valid range.
    #[must_use]
    pub fn new(value: usize) -> Self {
        Self(value.clamp(MIN_TOAST_LIMIT, MAX_TOAST_LIMIT))
    }

    /// Returns the value as usize.
    #[must_use]
    pub fn value(self) -> usize {
        self.0
    }

    /// Returns true if this is the minimum value.
    #[must_use]
    pub fn is_min(self) -> bool {
        self.0 <= MIN_TOAST_LIMIT
    }

    /// Returns true if this is the maximum value.
    #[must_use]
    pub fn is_max(self) -> bool {
        self.0 >= MAX_TOAST_LIMIT
    }
}

impl Default for ToastLimit {
    fn default() -> Self {
        Self(DEFAULT_TOAST_LIMIT)
    }
}

// =============================================================================
// RemoveDelay
// =============================================================================

/// Wait between a toast being dismissed and purged from the store.
///
/// Stored in milliseconds, clamped to 0 ms – 1 hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemoveDelay(u64);

impl RemoveDelay {
    /// Creates a new remove delay, clamping to valid range.
    #[must_use]
    pub fn from_millis(millis: u64) -> Self {
        Self(millis.clamp(MIN_REMOVE_DELAY_MS, MAX_REMOVE_DELAY_MS))
    }

    /// Returns the delay in milliseconds.
    #[must_use]
    pub fn as_millis(self) -> u64 {
        self.0
    }

    /// Returns the delay as a Duration.
    #[must_use]
    pub fn as_duration(self) -> Duration {
        Duration::from_millis(self.0)
    }
}

impl Default for RemoveDelay {
    fn default() -> Self {
        Self(DEFAULT_REMOVE_DELAY_MS)
    }
}

impl From<Duration> for RemoveDelay {
    fn from(duration: Duration) -> Self {
        Self::from_millis(u64::try_from(duration.as_millis()).unwrap_or(u64::MAX))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toast_limit_clamps_to_valid_range() {
        assert_eq!(ToastLimit::new(0).value(), MIN_TOAST_LIMIT);
        assert_eq!(ToastLimit::new(10_000).value(), MAX_TOAST_LIMIT);
    }

    #[test]
    fn toast_limit_accepts_valid_values() {
        assert_eq!(ToastLimit::new(1).value(), 1);
        assert_eq!(ToastLimit::new(7).value(), 7);
        assert_eq!(ToastLimit::new(50).value(), 50);
    }

    #[test]
    fn toast_limit_default_is_single_toast() {
        assert_eq!(ToastLimit::default().value(), DEFAULT_TOAST_LIMIT);
        assert!(ToastLimit::default().is_min());
        assert!(!ToastLimit::default().is_max());
    }

    #[test]
    fn remove_delay_clamps_to_maximum() {
        assert_eq!(
            RemoveDelay::from_millis(u64::MAX).as_millis(),
            MAX_REMOVE_DELAY_MS
        );
    }

    #[test]
    fn remove_delay_converts_to_duration() {
        let delay = RemoveDelay::from_millis(250);
        assert_eq!(delay.as_duration(), Duration::from_millis(250));
    }

    #[test]
    fn remove_delay_from_duration_round_trips_millis() {
        let delay = RemoveDelay::from(Duration::from_secs(2));
        assert_eq!(delay.as_millis(), 2000);
    }

    #[test]
    fn remove_delay_default_is_five_seconds() {
        assert_eq!(RemoveDelay::default().as_duration(), Duration::from_secs(5));
    }
}
