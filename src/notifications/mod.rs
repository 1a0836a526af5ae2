// SPDX-License-Identifier: MPL-2.0
//! Toast notification store for user feedback.
//!
//! This module keeps a bounded, newest-first list of transient notifications
//! and tells subscribers about every change. Dismissed toasts stay in the
//! list (closed) until their removal timer fires.
//!
//! # Components
//!
//! - [`toast`] - `Toast`, `ToastPayload` and `ToastUpdate` records
//! - [`manager`] - `Manager` for the store lifecycle and subscriptions
//! - [`timers`] - one-shot removal timers keyed by toast id
//! - [`listeners`] - subscriber registry
//! - [`id`] - wrapping id counter
//! - [`newtypes`] - clamped `ToastLimit` and `RemoveDelay`
//!
//! # Usage
//!
//! ```
//! use toast_store::notifications::{Manager, ToastPayload};
//!
//! let manager = Manager::default();
//! let subscription = manager.subscribe(|state| {
//!     println!("{} toast(s) in store", state.len());
//! });
//!
//! let handle = manager.enqueue(
//!     ToastPayload::titled("Message sent").description("I'll reply within a day."),
//! );
//! assert!(manager.state().get(handle.id()).is_some());
//!
//! subscription.unsubscribe();
//! ```
//!
//! # Design Considerations
//!
//! - Only one toast is kept by default; the limit comes from configuration
//! - Removal timers need a tokio runtime; toasts closed without one are
//!   scheduled by the next dispatch made inside a runtime
//! - Subscribers run synchronously, after the store lock is released, and
//!   receive snapshots in dispatch order

pub mod id;
pub mod listeners;
pub mod manager;
pub mod newtypes;
pub mod timers;
pub mod toast;

pub use id::{ToastId, ID_WRAP_BOUND};
pub use manager::{global, init_global, Manager, Message, Subscription, ToastHandle};
pub use newtypes::{RemoveDelay, ToastLimit};
pub use toast::{OpenChange, State, Toast, ToastAction, ToastPayload, ToastUpdate, Variant};
