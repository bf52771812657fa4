// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::events::Events;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Shared count of live virtual users.
///
/// The runner increments it when a user is spawned and decrements it when the
/// user stops; plugins take snapshots of it.
#[derive(Debug, Clone, Default)]
pub struct UserCount(Arc<AtomicUsize>);

impl UserCount {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }

    pub(crate) fn increment(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }

    pub(crate) fn decrement(&self) {
        // Never wraps below zero.
        let _ = self
            .0
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1));
    }
}

/// Host context handed to plugins at init and to every virtual user.
#[derive(Debug)]
pub struct Environment {
    /// Base URL the HTTP client resolves relative paths against
    pub host: String,
    /// Hooks fired by the host
    pub events: Events,
    /// Whether plugin routes are being served
    pub web_ui: bool,
    user_count: UserCount,
}

impl Environment {
    pub fn new(host: impl Into<String>, web_ui: bool) -> Self {
        Self {
            host: host.into(),
            events: Events::new(),
            web_ui,
            user_count: UserCount::new(),
        }
    }

    /// Number of users currently running.
    pub fn user_count(&self) -> usize {
        self.user_count.get()
    }

    /// A handle that tracks the live user count after this call returns.
    pub fn user_count_handle(&self) -> UserCount {
        self.user_count.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_count_handle_tracks_environment() {
        let env = Environment::new("http://localhost", false);
        let handle = env.user_count_handle();

        handle.increment();
        handle.increment();
        assert_eq!(env.user_count(), 2);

        handle.decrement();
        assert_eq!(env.user_count(), 1);
    }

    #[test]
    fn test_user_count_does_not_underflow() {
        let count = UserCount::new();
        count.decrement();
        assert_eq!(count.get(), 0);
    }
}
