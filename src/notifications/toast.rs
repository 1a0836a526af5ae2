// SPDX-License-Identifier: MPL-2.0
//! Core toast data structures.
//!
//! This module defines the `Toast` record, the `ToastPayload` callers hand to
//! the manager, and the `ToastUpdate` patch used to edit a live toast.
//! Display content is opaque to the manager and passed through unchanged.

use super::id::ToastId;
use std::fmt;
use std::sync::Arc;

/// Styling hint passed through to the rendering layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Variant {
    #[default]
    Default,
    /// Reports a failed or dangerous action.
    Destructive,
}

/// Control attached to a toast (e.g. an "Undo" button).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastAction {
    label: String,
    alt_text: String,
}

impl ToastAction {
    pub fn new(label: impl Into<String>, alt_text: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            alt_text: alt_text.into(),
        }
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Text announced by assistive technology in place of the control.
    #[must_use]
    pub fn alt_text(&self) -> &str {
        &self.alt_text
    }
}

/// Content of a toast before the manager assigns it an id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToastPayload {
    pub title: Option<String>,
    pub description: Option<String>,
    pub action: Option<ToastAction>,
    pub variant: Variant,
}

impl ToastPayload {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a default-variant payload with only a title.
    pub fn titled(title: impl Into<String>) -> Self {
        Self::new().title(title)
    }

    /// Creates a destructive payload with a title.
    pub fn destructive(title: impl Into<String>) -> Self {
        Self::new().title(title).variant(Variant::Destructive)
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn action(mut self, action: ToastAction) -> Self {
        self.action = Some(action);
        self
    }

    #[must_use]
    pub fn variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self
    }
}

/// Visibility callback the rendering layer invokes when a toast is closed
/// from outside the manager (swipe, close button, escape key).
#[derive(Clone)]
pub struct OpenChange(Arc<dyn Fn(bool) + Send + Sync>);

impl OpenChange {
    pub fn new(callback: impl Fn(bool) + Send + Sync + 'static) -> Self {
        Self(Arc::new(callback))
    }

    /// A callback that ignores every change.
    #[must_use]
    pub fn noop() -> Self {
        Self::new(|_| {})
    }

    /// Reports a visibility change for the owning toast.
    pub fn call(&self, open: bool) {
        (self.0)(open);
    }
}

impl fmt::Debug for OpenChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("OpenChange(..)")
    }
}

/// A notification held by the manager.
#[derive(Debug, Clone)]
pub struct Toast {
    id: ToastId,
    title: Option<String>,
    description: Option<String>,
    action: Option<ToastAction>,
    variant: Variant,
    /// True while visible; false once dismissed and awaiting removal.
    open: bool,
    on_open_change: OpenChange,
}

impl Toast {
    pub(crate) fn new(id: ToastId, payload: ToastPayload, on_open_change: OpenChange) -> Self {
        let ToastPayload {
            title,
            description,
            action,
            variant,
        } = payload;
        Self {
            id,
            title,
            description,
            action,
            variant,
            open: true,
            on_open_change,
        }
    }

    #[must_use]
    pub fn id(&self) -> ToastId {
        self.id
    }

    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    #[must_use]
    pub fn action(&self) -> Option<&ToastAction> {
        self.action.as_ref()
    }

    #[must_use]
    pub fn variant(&self) -> Variant {
        self.variant
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Callback to wire into the rendering layer's close handling.
    #[must_use]
    pub fn on_open_change(&self) -> &OpenChange {
        &self.on_open_change
    }

    /// Returns the display content as a payload.
    #[must_use]
    pub fn payload(&self) -> ToastPayload {
        ToastPayload {
            title: self.title.clone(),
            description: self.description.clone(),
            action: self.action.clone(),
            variant: self.variant,
        }
    }

    /// Marks the toast as closed. Returns true if it was open.
    pub(crate) fn close(&mut self) -> bool {
        std::mem::replace(&mut self.open, false)
    }

    /// Merges a patch into this toast, except for `open` which the manager
    /// routes through dismissal. Returns true if any field changed.
    pub(crate) fn apply(&mut self, update: &ToastUpdate) -> bool {
        let mut changed = false;
        if let Some(title) = &update.title {
            changed |= self.title.as_ref() != Some(title);
            self.title = Some(title.clone());
        }
        if let Some(description) = &update.description {
            changed |= self.description.as_ref() != Some(description);
            self.description = Some(description.clone());
        }
        if let Some(action) = &update.action {
            changed |= self.action.as_ref() != Some(action);
            self.action = Some(action.clone());
        }
        if let Some(variant) = update.variant {
            changed |= self.variant != variant;
            self.variant = variant;
        }
        if update.open == Some(true) && !self.open {
            self.open = true;
            changed = true;
        }
        changed
    }
}

/// Partial edit of a live toast. Unset fields are left unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastUpdate {
    pub id: ToastId,
    pub title: Option<String>,
    pub description: Option<String>,
    pub action: Option<ToastAction>,
    pub variant: Option<Variant>,
    pub open: Option<bool>,
}

impl ToastUpdate {
    #[must_use]
    pub fn new(id: ToastId) -> Self {
        Self {
            id,
            title: None,
            description: None,
            action: None,
            variant: None,
            open: None,
        }
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn action(mut self, action: ToastAction) -> Self {
        self.action = Some(action);
        self
    }

    #[must_use]
    pub fn variant(mut self, variant: Variant) -> Self {
        self.variant = Some(variant);
        self
    }

    #[must_use]
    pub fn open(mut self, open: bool) -> Self {
        self.open = Some(open);
        self
    }
}

/// Snapshot of the store, newest toast first.
#[derive(Debug, Clone, Default)]
pub struct State {
    pub toasts: Vec<Toast>,
}

impl State {
    /// Looks up a toast by id.
    #[must_use]
    pub fn get(&self, id: ToastId) -> Option<&Toast> {
        self.toasts.iter().find(|t| t.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn toast(payload: ToastPayload) -> Toast {
        Toast::new(ToastId::from_raw(1), payload, OpenChange::noop())
    }

    #[test]
    fn payload_builder_pattern_works() {
        let payload = ToastPayload::titled("Message sent")
            .description("I'll get back to you soon")
            .action(ToastAction::new("Undo", "Undo sending"));

        assert_eq!(payload.title.as_deref(), Some("Message sent"));
        assert_eq!(payload.description.as_deref(), Some("I'll get back to you soon"));
        assert_eq!(payload.action.as_ref().map(ToastAction::label), Some("Undo"));
        assert_eq!(payload.variant, Variant::Default);
    }

    #[test]
    fn destructive_constructor_sets_variant() {
        assert_eq!(
            ToastPayload::destructive("Failed").variant,
            Variant::Destructive
        );
    }

    #[test]
    fn new_toast_is_open_and_carries_payload() {
        let payload = ToastPayload::titled("A").description("B");
        let toast = toast(payload.clone());

        assert!(toast.is_open());
        assert_eq!(toast.payload(), payload);
    }

    #[test]
    fn close_reports_previous_state() {
        let mut toast = toast(ToastPayload::titled("A"));
        assert!(toast.close());
        assert!(!toast.close());
        assert!(!toast.is_open());
    }

    #[test]
    fn apply_merges_only_set_fields() {
        let mut toast = toast(ToastPayload::titled("A").description("keep"));
        let changed = toast.apply(&ToastUpdate::new(toast.id()).title("B"));

        assert!(changed);
        assert_eq!(toast.title(), Some("B"));
        assert_eq!(toast.description(), Some("keep"));
    }

    #[test]
    fn apply_with_identical_values_reports_no_change() {
        let mut toast = toast(ToastPayload::titled("A"));
        assert!(!toast.apply(&ToastUpdate::new(toast.id()).title("A")));
    }

    #[test]
    fn apply_does_not_close_toast() {
        let mut toast = toast(ToastPayload::titled("A"));
        toast.apply(&ToastUpdate::new(toast.id()).open(false));
        assert!(toast.is_open());
    }

    #[test]
    fn open_change_invokes_callback() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let callback = OpenChange::new(move |open| {
            if !open {
                counter.fetch_add(1, Ordering::SeqCst);
            }
        });

        callback.call(true);
        callback.call(false);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn state_lookup_finds_toast_by_id() {
        let state = State {
            toasts: vec![toast(ToastPayload::titled("A"))],
        };
        assert!(state.get(ToastId::from_raw(1)).is_some());
        assert!(state.get(ToastId::from_raw(2)).is_none());
        assert_eq!(state.len(), 1);
    }
}
