// SPDX-License-Identifier: MPL-2.0
//! Subscriber registry.
//!
//! Listeners are kept in registration order and receive every state snapshot
//! in that order. The registry itself never calls a listener; the manager
//! takes a [`ListenerRegistry::snapshot`] and invokes it with no lock held.

use super::toast::State;
use std::sync::Arc;

/// Callback receiving the full store after each mutation.
pub type Listener = Arc<dyn Fn(&State) + Send + Sync>;

/// Identifies one registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

#[derive(Default)]
pub struct ListenerRegistry {
    next_id: u64,
    entries: Vec<(ListenerId, Listener)>,
}

impl ListenerRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, listener: Listener) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, listener));
        id
    }

    /// Removes a registration. Returns false if it was already gone.
    pub fn remove(&mut self, id: ListenerId) -> bool {
        match self.entries.iter().position(|(entry, _)| *entry == id) {
            Some(pos) => {
                self.entries.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Returns the listeners to notify, in registration order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Listener> {
        self.entries
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerRegistry")
            .field("listeners", &self.entries.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn recording(log: &Arc<Mutex<Vec<&'static str>>>, name: &'static str) -> Listener {
        let log = Arc::clone(log);
        Arc::new(move |_state: &State| log.lock().unwrap().push(name))
    }

    #[test]
    fn snapshot_preserves_registration_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut registry = ListenerRegistry::new();
        registry.insert(recording(&log, "first"));
        registry.insert(recording(&log, "second"));

        let state = State::default();
        for listener in registry.snapshot() {
            listener(&state);
        }

        assert_eq!(*log.lock().unwrap(), vec!["first", "second"]);
    }

    #[test]
    fn remove_is_idempotent() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut registry = ListenerRegistry::new();
        let id = registry.insert(recording(&log, "only"));

        assert!(registry.remove(id));
        assert!(!registry.remove(id));
        assert!(registry.is_empty());
    }

    #[test]
    fn remove_only_drops_matching_listener() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut registry = ListenerRegistry::new();
        let first = registry.insert(recording(&log, "first"));
        registry.insert(recording(&log, "second"));

        registry.remove(first);
        let state = State::default();
        for listener in registry.snapshot() {
            listener(&state);
        }

        assert_eq!(registry.len(), 1);
        assert_eq!(*log.lock().unwrap(), vec!["second"]);
    }
}
