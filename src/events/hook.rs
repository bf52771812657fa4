// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use parking_lot::RwLock;
use std::sync::Arc;

type Listener<A> = Arc<dyn Fn(&A) + Send + Sync>;

/// A list of listeners that all receive every fired event.
///
/// Listeners run synchronously, in registration order, on the task that
/// fires the event. Cloning a hook yields a handle to the same listener list,
/// so a hook can be handed to users and plugins without global registration.
///
/// # Example
/// ```
/// use swarmer::events::EventHook;
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::sync::Arc;
///
/// let hook: EventHook<String> = EventHook::new();
/// let seen = Arc::new(AtomicUsize::new(0));
/// let counter = seen.clone();
/// hook.add_listener(move |_msg: &String| {
///     counter.fetch_add(1, Ordering::SeqCst);
/// });
///
/// hook.fire(&"hello".to_string());
/// assert_eq!(seen.load(Ordering::SeqCst), 1);
/// ```
pub struct EventHook<A> {
    listeners: Arc<RwLock<Vec<Listener<A>>>>,
}

impl<A> EventHook<A> {
    pub fn new() -> Self {
        Self {
            listeners: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub fn add_listener<F>(&self, listener: F)
    where
        F: Fn(&A) + Send + Sync + 'static,
    {
        self.listeners.write().push(Arc::new(listener));
    }

    /// Call every listener with `args`.
    pub fn fire(&self, args: &A) {
        // Snapshot so a listener may register further listeners without deadlocking.
        let listeners: Vec<Listener<A>> = self.listeners.read().clone();
        for listener in listeners {
            listener(args);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.read().len()
    }
}

impl<A> Default for EventHook<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> Clone for EventHook<A> {
    fn clone(&self) -> Self {
        Self {
            listeners: Arc::clone(&self.listeners),
        }
    }
}

impl<A> std::fmt::Debug for EventHook<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventHook")
            .field("listener_count", &self.listener_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    #[test]
    fn test_listeners_run_in_registration_order() {
        let hook: EventHook<u32> = EventHook::new();
        let order = Arc::new(Mutex::new(Vec::new()));

        for tag in ["first", "second", "third"] {
            let order = order.clone();
            hook.add_listener(move |value: &u32| order.lock().push((tag, *value)));
        }

        hook.fire(&7);
        assert_eq!(
            *order.lock(),
            vec![("first", 7), ("second", 7), ("third", 7)]
        );
    }

    #[test]
    fn test_fire_without_listeners_is_noop() {
        let hook: EventHook<()> = EventHook::default();
        hook.fire(&());
        assert_eq!(hook.listener_count(), 0);
    }

    #[test]
    fn test_clones_share_listeners() {
        let hook: EventHook<()> = EventHook::new();
        let handle = hook.clone();
        let hits = Arc::new(Mutex::new(0));
        let counter = hits.clone();

        handle.add_listener(move |_| *counter.lock() += 1);
        hook.fire(&());

        assert_eq!(hook.listener_count(), 1);
        assert_eq!(*hits.lock(), 1);
    }

    #[test]
    fn test_listener_may_register_during_fire() {
        let hook: EventHook<()> = EventHook::new();
        let inner = hook.clone();
        hook.add_listener(move |_| inner.add_listener(|_| {}));

        hook.fire(&());
        assert_eq!(hook.listener_count(), 2);
    }
}
