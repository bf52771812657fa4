// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for virtual user lifecycle and custom events.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// A virtual user finished `on_start` and entered its task loop.
///
/// # Log Level
/// `debug!` - One per user, noisy at scale
pub struct UserStarted<'a> {
    pub user_id: usize,
    pub class_id: &'a str,
}

impl Display for UserStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "User {} ({}) started", self.user_id, self.class_id)
    }
}

impl StructuredLog for UserStarted<'_> {
    fn log(&self) {
        tracing::debug!(user_id = self.user_id, class_id = self.class_id, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "user",
            span_name = name,
            user_id = self.user_id,
            class_id = self.class_id,
        )
    }
}

/// A virtual user left its task loop.
///
/// # Log Level
/// `debug!` - One per user, noisy at scale
pub struct UserStopped<'a> {
    pub user_id: usize,
    pub class_id: &'a str,
    pub tasks_run: u64,
}

impl Display for UserStopped<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "User {} ({}) stopped after {} tasks",
            self.user_id, self.class_id, self.tasks_run
        )
    }
}

impl StructuredLog for UserStopped<'_> {
    fn log(&self) {
        tracing::debug!(
            user_id = self.user_id,
            class_id = self.class_id,
            tasks_run = self.tasks_run,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "user_stopped",
            span_name = name,
            user_id = self.user_id,
            class_id = self.class_id,
        )
    }
}

/// A user task or lifecycle hook returned an error.
///
/// # Log Level
/// `warn!` - The user keeps running
///
/// # Example
/// ```
/// use swarmer::observability::messages::user::UserTaskFailed;
///
/// let error = std::io::Error::new(std::io::ErrorKind::Other, "timeout");
/// let msg = UserTaskFailed {
///     user_id: 7,
///     class_id: "checkout",
///     error: &error,
/// };
///
/// tracing::warn!("{}", msg);
/// ```
pub struct UserTaskFailed<'a> {
    pub user_id: usize,
    pub class_id: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for UserTaskFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "User {} ({}) task failed: {}",
            self.user_id, self.class_id, self.error
        )
    }
}

impl StructuredLog for UserTaskFailed<'_> {
    fn log(&self) {
        tracing::warn!(
            user_id = self.user_id,
            class_id = self.class_id,
            error = %self.error,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "user_task_failed",
            span_name = name,
            user_id = self.user_id,
            class_id = self.class_id,
        )
    }
}

/// A custom event reached the logging listener.
///
/// # Log Level
/// `info!` - The point of the listener is to be seen
///
/// # Example
/// ```
/// use swarmer::observability::messages::user::CustomEventFired;
///
/// let msg = CustomEventFired {
///     name: "/",
///     response: "<Response [200]>",
/// };
///
/// assert_eq!(msg.to_string(), "Event was fired with arguments: /, <Response [200]>");
/// ```
pub struct CustomEventFired<'a> {
    pub name: &'a str,
    pub response: &'a str,
}

impl Display for CustomEventFired<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Event was fired with arguments: {}, {}",
            self.name, self.response
        )
    }
}

impl StructuredLog for CustomEventFired<'_> {
    fn log(&self) {
        tracing::info!(event_name = self.name, response = self.response, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!("custom_event", span_name = name, event_name = self.name)
    }
}

/// A user task panicked or was aborted; its loop ended early.
///
/// # Log Level
/// `error!` - Bug in a user implementation
pub struct UserPanicked<'a> {
    pub error: &'a tokio::task::JoinError,
}

impl Display for UserPanicked<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "User task ended abnormally: {}", self.error)
    }
}

impl StructuredLog for UserPanicked<'_> {
    fn log(&self) {
        tracing::error!(
            panicked = self.error.is_panic(),
            error = %self.error,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!("user_panicked", span_name = name)
    }
}
