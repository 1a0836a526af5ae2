// SPDX-License-Identifier: MPL-2.0
//! One-shot removal timers keyed by toast id.
//!
//! At most one timer exists per id. Timers run as tokio tasks on the ambient
//! runtime and are aborted when cancelled or when the registry is dropped.

use super::id::ToastId;
use std::collections::HashMap;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::AbortHandle;

#[derive(Debug)]
struct Armed {
    generation: u64,
    handle: AbortHandle,
}

#[derive(Debug, Default)]
pub struct RemovalTimers {
    armed: HashMap<ToastId, Armed>,
    next_generation: u64,
}

impl RemovalTimers {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms a timer that runs `on_fire` after `delay`.
    ///
    /// `on_fire` receives the generation of the timer, which the caller
    /// passes back to [`RemovalTimers::disarm`]. Returns false without arming
    /// if a timer already exists for `id`, or if no tokio runtime is
    /// available on the calling thread.
    pub fn arm<F>(&mut self, id: ToastId, delay: Duration, on_fire: F) -> bool
    where
        F: FnOnce(u64) + Send + 'static,
    {
        if self.armed.contains_key(&id) {
            log::trace!("removal timer for toast {} already armed", id);
            return false;
        }

        let Ok(runtime) = Handle::try_current() else {
            log::warn!(
                "no tokio runtime available; toast {} is scheduled on the next dispatch inside one",
                id
            );
            return false;
        };

        let generation = self.next_generation;
        self.next_generation += 1;
        let task = runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            on_fire(generation);
        });
        self.armed.insert(
            id,
            Armed {
                generation,
                handle: task.abort_handle(),
            },
        );
        log::trace!(
            "armed removal timer for toast {} ({:?}, generation {})",
            id,
            delay,
            generation
        );
        true
    }

    /// Forgets the record for a timer that has fired.
    ///
    /// Returns false, leaving any record in place, when the armed timer for
    /// `id` is not the one of `generation`.
    pub fn disarm(&mut self, id: ToastId, generation: u64) -> bool {
        match self.armed.get(&id) {
            Some(armed) if armed.generation == generation => {
                self.armed.remove(&id);
                true
            }
            _ => false,
        }
    }

    /// Generation of the timer armed for `id`, if any.
    #[must_use]
    pub fn generation(&self, id: ToastId) -> Option<u64> {
        self.armed.get(&id).map(|armed| armed.generation)
    }

    /// Aborts a pending timer. Returns false if none was armed.
    pub fn cancel(&mut self, id: ToastId) -> bool {
        match self.armed.remove(&id) {
            Some(armed) => {
                armed.handle.abort();
                log::trace!("cancelled removal timer for toast {}", id);
                true
            }
            None => false,
        }
    }

    pub fn cancel_all(&mut self) {
        for (_, armed) in self.armed.drain() {
            armed.handle.abort();
        }
    }

    #[must_use]
    pub fn is_armed(&self, id: ToastId) -> bool {
        self.armed.contains_key(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.armed.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.armed.is_empty()
    }
}

impl Drop for RemovalTimers {
    fn drop(&mut self) {
        self.cancel_all();
    }
}
