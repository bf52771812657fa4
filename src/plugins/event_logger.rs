// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! A custom event with a listener that logs every firing.

use crate::events::EventHook;
use crate::observability::messages::user::CustomEventFired;
use crate::observability::messages::StructuredLog;
use crate::errors::PluginError;
use crate::traits::Plugin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Arguments of the custom event: what was requested and what came back.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedEvent {
    pub name: String,
    pub response: String,
}

pub struct EventLogger {
    hook: EventHook<NamedEvent>,
    fired: Arc<AtomicU64>,
}

impl EventLogger {
    pub fn new() -> Self {
        let hook = EventHook::new();
        let fired = Arc::new(AtomicU64::new(0));
        let counter = Arc::clone(&fired);
        hook.add_listener(move |event: &NamedEvent| {
            counter.fetch_add(1, Ordering::Relaxed);
            CustomEventFired {
                name: &event.name,
                response: &event.response,
            }
            .log();
        });
        Self { hook, fired }
    }

    /// Handle for firing the event; more listeners may be added to it.
    pub fn hook(&self) -> EventHook<NamedEvent> {
        self.hook.clone()
    }

    pub fn fired(&self) -> u64 {
        self.fired.load(Ordering::Relaxed)
    }
}

impl Default for EventLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for EventLogger {
    fn name(&self) -> &'static str {
        "event_logger"
    }

    fn on_quitting(&self) -> Result<(), PluginError> {
        tracing::debug!(fired = self.fired(), "Custom event listener done");
        Ok(())
    }
}
