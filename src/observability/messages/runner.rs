// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for the run lifecycle.
//!
//! This module contains message types for logging events related to:
//! * Run start, spawning and shutdown
//! * Per-request statistics printed when a run ends
//! * Plugin hook failures

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use std::time::Duration;
use tracing::Span;

/// Run started.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use swarmer::observability::messages::runner::RunStarted;
/// use std::time::Duration;
///
/// let msg = RunStarted {
///     users: 50,
///     spawn_rate: 5.0,
///     run_time: Some(Duration::from_secs(60)),
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct RunStarted {
    pub users: usize,
    pub spawn_rate: f64,
    pub run_time: Option<Duration>,
}

impl Display for RunStarted {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self.run_time {
            Some(run_time) => write!(
                f,
                "Starting run: {} users at {} users/s for {:?}",
                self.users, self.spawn_rate, run_time
            ),
            None => write!(
                f,
                "Starting run: {} users at {} users/s until stopped",
                self.users, self.spawn_rate
            ),
        }
    }
}

impl StructuredLog for RunStarted {
    fn log(&self) {
        tracing::info!(
            users = self.users,
            spawn_rate = self.spawn_rate,
            run_time = ?self.run_time,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "run",
            span_name = name,
            users = self.users,
            spawn_rate = self.spawn_rate,
        )
    }
}

/// All users have been spawned.
///
/// # Log Level
/// `info!` - Important operational event
pub struct SpawningCompleted {
    pub user_count: usize,
    pub duration: Duration,
}

impl Display for SpawningCompleted {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "All {} users spawned in {:?}",
            self.user_count, self.duration
        )
    }
}

impl StructuredLog for SpawningCompleted {
    fn log(&self) {
        tracing::info!(
            user_count = self.user_count,
            duration_ms = self.duration.as_millis() as u64,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "spawning_completed",
            span_name = name,
            user_count = self.user_count,
        )
    }
}

/// Run is stopping.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use swarmer::observability::messages::runner::RunStopping;
///
/// let msg = RunStopping { reason: "run time elapsed" };
///
/// tracing::info!("{}", msg);
/// ```
pub struct RunStopping<'a> {
    pub reason: &'a str,
}

impl Display for RunStopping<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Stopping run: {}", self.reason)
    }
}

impl StructuredLog for RunStopping<'_> {
    fn log(&self) {
        tracing::info!(reason = self.reason, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!("run_stopping", span_name = name, reason = self.reason)
    }
}

/// Run finished and every user has stopped.
///
/// # Log Level
/// `info!` - Important operational event
pub struct RunCompleted {
    pub duration: Duration,
    pub request_count: u64,
    pub failure_count: u64,
}

impl Display for RunCompleted {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Run completed in {:?}: {} requests, {} failures",
            self.duration, self.request_count, self.failure_count
        )
    }
}

impl StructuredLog for RunCompleted {
    fn log(&self) {
        tracing::info!(
            duration_ms = self.duration.as_millis() as u64,
            request_count = self.request_count,
            failure_count = self.failure_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "run_completed",
            span_name = name,
            request_count = self.request_count,
            failure_count = self.failure_count,
        )
    }
}

/// One line of the end-of-run request statistics.
///
/// # Log Level
/// `info!` - Operational summary
pub struct RequestStatsLine<'a> {
    pub request_type: &'a str,
    pub name: &'a str,
    pub num_requests: u64,
    pub num_failures: u64,
    pub avg_ms: f64,
    pub min_ms: f64,
    pub max_ms: f64,
}

impl Display for RequestStatsLine<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} {}: {} requests, {} failures, avg={:.2}ms min={:.2}ms max={:.2}ms",
            self.request_type,
            self.name,
            self.num_requests,
            self.num_failures,
            self.avg_ms,
            self.min_ms,
            self.max_ms
        )
    }
}

impl StructuredLog for RequestStatsLine<'_> {
    fn log(&self) {
        tracing::info!(
            request_type = self.request_type,
            request_name = self.name,
            num_requests = self.num_requests,
            num_failures = self.num_failures,
            avg_ms = self.avg_ms,
            min_ms = self.min_ms,
            max_ms = self.max_ms,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "request_stats",
            span_name = name,
            request_type = self.request_type,
            request_name = self.name,
        )
    }
}

/// A plugin hook returned an error.
///
/// # Log Level
/// `error!` - Failure requiring attention
pub struct PluginHookFailed<'a> {
    pub plugin: &'a str,
    pub hook: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for PluginHookFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Plugin '{}' failed during {}: {}",
            self.plugin, self.hook, self.error
        )
    }
}

impl StructuredLog for PluginHookFailed<'_> {
    fn log(&self) {
        tracing::error!(
            plugin = self.plugin,
            hook = self.hook,
            error = %self.error,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!(
            "plugin_hook_failed",
            span_name = name,
            plugin = self.plugin,
            hook = self.hook,
        )
    }
}
