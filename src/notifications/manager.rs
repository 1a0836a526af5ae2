// SPDX-License-Identifier: MPL-2.0
//! Toast lifecycle management.
//!
//! The `Manager` owns the bounded toast store, the removal timers and the
//! subscriber registry. Every mutation goes through [`Manager::handle_message`],
//! which applies the change, arms or cancels removal timers, and then notifies
//! subscribers with a snapshot of the new store.
//!
//! Snapshots are queued under the store lock and drained in FIFO order by the
//! outermost dispatch, so a listener that mutates the store from inside its
//! callback never makes other listeners see states out of order.

use super::id::{IdGenerator, ToastId};
use super::listeners::{Listener, ListenerId, ListenerRegistry};
use super::newtypes::{RemoveDelay, ToastLimit};
use super::timers::RemovalTimers;
use super::toast::{OpenChange, State, Toast, ToastPayload, ToastUpdate, Variant};
use crate::config::{self, Config};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError, Weak};

/// Messages for store mutations.
#[derive(Debug, Clone)]
pub enum Message {
    /// Insert a toast at the head of the store.
    Add(Toast),
    /// Merge a patch into an existing toast.
    Update(ToastUpdate),
    /// Close one toast, or every toast when no id is given.
    Dismiss(Option<ToastId>),
    /// Delete one toast, or clear the store when no id is given.
    Remove(Option<ToastId>),
}

/// What a reduction did to the store.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Outcome {
    pub changed: bool,
    /// Toasts that went from open to closed.
    pub closed: Vec<ToastId>,
    /// Toasts that went from closed back to open.
    pub reopened: Vec<ToastId>,
    /// Toasts that left the store, including evictions.
    pub removed: Vec<ToastId>,
}

/// Applies a message to the store.
///
/// Side effects (timers, notifications) are left to the caller.
pub fn reduce(toasts: &mut Vec<Toast>, message: Message, limit: ToastLimit) -> Outcome {
    let mut outcome = Outcome::default();
    match message {
        Message::Add(toast) => {
            toasts.insert(0, toast);
            if toasts.len() > limit.value() {
                outcome
                    .removed
                    .extend(toasts.drain(limit.value()..).map(|t| t.id()));
            }
            outcome.changed = true;
        }
        Message::Update(update) => {
            if let Some(toast) = toasts.iter_mut().find(|t| t.id() == update.id) {
                let was_open = toast.is_open();
                outcome.changed = toast.apply(&update);
                if update.open == Some(false) && toast.close() {
                    outcome.closed.push(toast.id());
                    outcome.changed = true;
                }
                if !was_open && toast.is_open() {
                    outcome.reopened.push(toast.id());
                }
            }
        }
        Message::Dismiss(target) => {
            for toast in toasts
                .iter_mut()
                .filter(|t| target.is_none_or(|id| t.id() == id))
            {
                if toast.close() {
                    outcome.closed.push(toast.id());
                }
            }
            outcome.changed = !outcome.closed.is_empty();
        }
        Message::Remove(Some(id)) => {
            if let Some(pos) = toasts.iter().position(|t| t.id() == id) {
                toasts.remove(pos);
                outcome.removed.push(id);
                outcome.changed = true;
            }
        }
        Message::Remove(None) => {
            outcome.removed.extend(toasts.drain(..).map(|t| t.id()));
            outcome.changed = !outcome.removed.is_empty();
        }
    }
    outcome
}

#[derive(Debug, Default)]
struct Store {
    toasts: Vec<Toast>,
    timers: RemovalTimers,
}

/// Snapshots waiting to reach subscribers.
#[derive(Debug, Default)]
struct Delivery {
    queue: VecDeque<State>,
    delivering: bool,
}

/// Releases the delivery slot if a listener panics mid-drain.
struct Draining<'a>(&'a Mutex<Delivery>);

impl Drop for Draining<'_> {
    fn drop(&mut self) {
        if std::thread::panicking() {
            lock(self.0).delivering = false;
        }
    }
}

#[derive(Debug)]
struct Shared {
    store: Mutex<Store>,
    listeners: Mutex<ListenerRegistry>,
    delivery: Mutex<Delivery>,
    ids: IdGenerator,
    limit: ToastLimit,
    remove_delay: RemoveDelay,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Handle to a toast store. Clones share the same store.
#[derive(Debug, Clone)]
pub struct Manager {
    shared: Arc<Shared>,
}

impl Default for Manager {
    fn default() -> Self {
        Self::with_limits(ToastLimit::default(), RemoveDelay::default())
    }
}

impl Manager {
    /// Creates an isolated manager from a configuration.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self::with_limits(config.limit(), config.remove_delay())
    }

    #[must_use]
    pub fn with_limits(limit: ToastLimit, remove_delay: RemoveDelay) -> Self {
        Self {
            shared: Arc::new(Shared {
                store: Mutex::new(Store::default()),
                listeners: Mutex::new(ListenerRegistry::new()),
                delivery: Mutex::new(Delivery::default()),
                ids: IdGenerator::new(),
                limit,
                remove_delay,
            }),
        }
    }

    #[must_use]
    pub fn limit(&self) -> ToastLimit {
        self.shared.limit
    }

    #[must_use]
    pub fn remove_delay(&self) -> RemoveDelay {
        self.shared.remove_delay
    }

    /// Shows a new toast and returns a handle bound to its id.
    pub fn enqueue(&self, payload: ToastPayload) -> ToastHandle {
        let id = self.shared.ids.next_id();
        if payload.variant == Variant::Destructive {
            log::warn!(
                "destructive toast {}: {}",
                id,
                payload.title.as_deref().unwrap_or("<untitled>")
            );
        }

        let weak = Arc::downgrade(&self.shared);
        let on_open_change = OpenChange::new(move |open| {
            if !open {
                if let Some(manager) = Manager::upgrade(&weak) {
                    manager.dismiss(Some(id));
                }
            }
        });

        self.handle_message(Message::Add(Toast::new(id, payload, on_open_change)));
        ToastHandle {
            id,
            manager: Arc::downgrade(&self.shared),
        }
    }

    /// Closes one toast, or all of them, and schedules their removal.
    pub fn dismiss(&self, id: Option<ToastId>) {
        self.handle_message(Message::Dismiss(id));
    }

    /// Deletes one toast, or clears the store, immediately.
    pub fn remove(&self, id: Option<ToastId>) {
        self.handle_message(Message::Remove(id));
    }

    pub fn update(&self, update: ToastUpdate) {
        self.handle_message(Message::Update(update));
    }

    /// Registers a listener for every subsequent mutation.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&State) + Send + Sync + 'static,
    {
        let listener: Listener = Arc::new(listener);
        let id = lock(&self.shared.listeners).insert(listener);
        Subscription {
            id,
            manager: Arc::downgrade(&self.shared),
        }
    }

    /// Returns a snapshot of the store.
    #[must_use]
    pub fn state(&self) -> State {
        State {
            toasts: lock(&self.shared.store).toasts.clone(),
        }
    }

    /// Returns the number of removal timers currently armed.
    #[must_use]
    pub fn pending_removals(&self) -> usize {
        lock(&self.shared.store).timers.len()
    }

    #[must_use]
    pub fn is_removal_pending(&self, id: ToastId) -> bool {
        lock(&self.shared.store).timers.is_armed(id)
    }

    /// Clears the store and cancels every removal timer.
    ///
    /// Subscribers and the id counter are kept.
    pub fn reset(&self) {
        {
            let mut store = lock(&self.shared.store);
            store.timers.cancel_all();
            if store.toasts.is_empty() {
                return;
            }
            store.toasts.clear();
            self.queue_delivery(State::default());
        }
        log::debug!("toast store reset");
        self.deliver();
    }

    /// Applies a mutation, then notifies subscribers if the store changed.
    pub fn handle_message(&self, message: Message) {
        log::debug!("toast dispatch: {:?}", MessageKind::from(&message));
        let changed = {
            let mut store = lock(&self.shared.store);
            self.apply(&mut store, message)
        };
        if changed {
            self.deliver();
        }
    }

    /// Reduces `message` into the locked store, keeps the timers in step and
    /// queues the new snapshot. Returns false if nothing changed.
    fn apply(&self, store: &mut Store, message: Message) -> bool {
        let outcome = reduce(&mut store.toasts, message, self.shared.limit);
        for id in outcome.removed.iter().chain(&outcome.reopened) {
            store.timers.cancel(*id);
        }
        self.schedule_removals(store);

        if !outcome.changed {
            return false;
        }
        self.queue_delivery(State {
            toasts: store.toasts.clone(),
        });
        true
    }

    /// Arms a removal timer for every closed toast that has none, including
    /// toasts closed earlier on a thread without a runtime.
    fn schedule_removals(&self, store: &mut Store) {
        let delay = self.shared.remove_delay.as_duration();
        let Store { toasts, timers } = store;
        for toast in toasts.iter().filter(|t| !t.is_open()) {
            let id = toast.id();
            if timers.is_armed(id) {
                continue;
            }
            let weak = Arc::downgrade(&self.shared);
            timers.arm(id, delay, move |generation| {
                if let Some(manager) = Manager::upgrade(&weak) {
                    manager.fire_removal(id, generation);
                }
            });
        }
    }

    fn fire_removal(&self, id: ToastId, generation: u64) {
        let changed = {
            let mut store = lock(&self.shared.store);
            if !store.timers.disarm(id, generation) {
                log::trace!("ignoring stale removal timer for toast {}", id);
                return;
            }
            log::trace!("removal timer fired for toast {}", id);
            self.apply(&mut store, Message::Remove(Some(id)))
        };
        if changed {
            self.deliver();
        }
    }

    /// Must be called with the store lock held so the queue follows
    /// dispatch order.
    fn queue_delivery(&self, snapshot: State) {
        lock(&self.shared.delivery).queue.push_back(snapshot);
    }

    /// Drains queued snapshots to subscribers. A nested call made from inside
    /// a listener returns at once; the outer call delivers its snapshot next.
    fn deliver(&self) {
        {
            let mut delivery = lock(&self.shared.delivery);
            if delivery.delivering {
                return;
            }
            delivery.delivering = true;
        }
        let _draining = Draining(&self.shared.delivery);

        loop {
            let snapshot = {
                let mut delivery = lock(&self.shared.delivery);
                match delivery.queue.pop_front() {
                    Some(snapshot) => snapshot,
                    None => {
                        delivery.delivering = false;
                        return;
                    }
                }
            };
            let listeners = lock(&self.shared.listeners).snapshot();
            for listener in listeners {
                listener(&snapshot);
            }
        }
    }

    fn upgrade(weak: &Weak<Shared>) -> Option<Self> {
        weak.upgrade().map(|shared| Self { shared })
    }
}

/// Message tag used for logging without dumping toast content.
#[derive(Debug)]
enum MessageKind {
    Add(ToastId),
    Update(ToastId),
    Dismiss(Option<ToastId>),
    Remove(Option<ToastId>),
}

impl From<&Message> for MessageKind {
    fn from(message: &Message) -> Self {
        match message {
            Message::Add(toast) => MessageKind::Add(toast.id()),
            Message::Update(update) => MessageKind::Update(update.id),
            Message::Dismiss(id) => MessageKind::Dismiss(*id),
            Message::Remove(id) => MessageKind::Remove(*id),
        }
    }
}

/// Returned by [`Manager::enqueue`].
#[derive(Debug, Clone)]
pub struct ToastHandle {
    id: ToastId,
    manager: Weak<Shared>,
}

impl ToastHandle {
    #[must_use]
    pub fn id(&self) -> ToastId {
        self.id
    }

    /// Dismisses this toast. Does nothing once the manager is gone.
    pub fn dismiss(&self) {
        if let Some(manager) = Manager::upgrade(&self.manager) {
            manager.dismiss(Some(self.id));
        }
    }

    /// Edits this toast, e.g. `handle.update(|u| u.title("Sent"))`.
    pub fn update(&self, edit: impl FnOnce(ToastUpdate) -> ToastUpdate) {
        if let Some(manager) = Manager::upgrade(&self.manager) {
            manager.update(edit(ToastUpdate::new(self.id)));
        }
    }
}

/// Registration returned by [`Manager::subscribe`].
#[derive(Debug)]
#[must_use = "dropping a Subscription keeps the listener registered; call unsubscribe() to detach it"]
pub struct Subscription {
    id: ListenerId,
    manager: Weak<Shared>,
}

impl Subscription {
    /// Stops delivery to this listener. Safe to call more than once.
    pub fn unsubscribe(&self) {
        if let Some(shared) = self.manager.upgrade() {
            lock(&shared.listeners).remove(self.id);
        }
    }
}

static GLOBAL: OnceLock<Manager> = OnceLock::new();

/// Returns the process-wide manager, creating it from the saved
/// configuration on first use.
pub fn global() -> &'static Manager {
    GLOBAL.get_or_init(|| {
        let config = config::load().unwrap_or_else(|err| {
            log::warn!("failed to load toast config, using defaults: {}", err);
            Config::default()
        });
        Manager::new(&config)
    })
}

/// Installs the process-wide manager. Returns false if it already exists.
pub fn init_global(config: &Config) -> bool {
    GLOBAL.set(Manager::new(config)).is_ok()
}
