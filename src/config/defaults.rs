// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the crate. Constants are organized by category.
//!
//! # Categories
//!
//! - **Toast Limit**: Maximum number of toasts kept in the store
//! - **Remove Delay**: Wait between dismissal and removal

// ==========================================================================
// Toast Limit Defaults
// ==========================================================================

/// Default number of toasts retained at once (only one toast visible).
pub const DEFAULT_TOAST_LIMIT: usize = 1;

/// Minimum toast limit.
pub const MIN_TOAST_LIMIT: usize = 1;

/// Maximum toast limit.
pub const MAX_TOAST_LIMIT: usize = 50;

// ==========================================================================
// Remove Delay Defaults
// ==========================================================================

/// Default delay between a toast being dismissed and purged (in milliseconds).
pub const DEFAULT_REMOVE_DELAY_MS: u64 = 5000;

/// Minimum remove delay (in milliseconds).
pub const MIN_REMOVE_DELAY_MS: u64 = 0;

/// Maximum remove delay (in milliseconds, one hour).
pub const MAX_REMOVE_DELAY_MS: u64 = 3_600_000;
