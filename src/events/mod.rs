// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Event hooks shared by the runner, users and plugins.
//!
//! The `Events` bus lives on the `Environment` and is passed explicitly to
//! whoever needs it. Users may also create their own `EventHook`s for custom
//! events (see `plugins::event_logger`).

mod hook;

pub use hook::EventHook;

use std::time::Duration;

/// A completed request, successful or not.
///
/// `exception` is `None` for a success. Non-HTTP work (see the widget maker
/// user) reports through the same event with its own `request_type`.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestEvent {
    pub request_type: String,
    pub name: String,
    pub response_time: Duration,
    pub response_length: usize,
    pub exception: Option<String>,
}

impl RequestEvent {
    pub fn success(
        request_type: impl Into<String>,
        name: impl Into<String>,
        response_time: Duration,
        response_length: usize,
    ) -> Self {
        Self {
            request_type: request_type.into(),
            name: name.into(),
            response_time,
            response_length,
            exception: None,
        }
    }

    pub fn failure(
        request_type: impl Into<String>,
        name: impl Into<String>,
        response_time: Duration,
        response_length: usize,
        exception: impl Into<String>,
    ) -> Self {
        Self {
            request_type: request_type.into(),
            name: name.into(),
            response_time,
            response_length,
            exception: Some(exception.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.exception.is_none()
    }

    /// Response time in milliseconds.
    pub fn response_time_ms(&self) -> f64 {
        self.response_time.as_secs_f64() * 1000.0
    }
}

/// The hooks the host fires.
#[derive(Debug, Clone, Default)]
pub struct Events {
    /// Fired for every completed request or timed unit of work.
    pub request: EventHook<RequestEvent>,
    /// Fired once when the run is shutting down, after all users have stopped.
    pub quitting: EventHook<()>,
}

impl Events {
    pub fn new() -> Self {
        Self::default()
    }
}
