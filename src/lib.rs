// SPDX-License-Identifier: MPL-2.0
//! `toast_store` is the notification layer of a single-page portfolio site.
//!
//! Page sections report the outcome of user actions (a submitted contact
//! form, a copied e-mail address) through a bounded toast store; the
//! rendering layer subscribes to it and draws the current list.

#![doc(html_root_url = "https://docs.rs/toast_store/0.1.0")]

pub mod config;
pub mod error;
pub mod notifications;
