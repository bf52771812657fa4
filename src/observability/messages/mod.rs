// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized message types for structured logging.
//!
//! * `runner` - Run lifecycle and request statistics
//! * `user` - Virtual user lifecycle and custom events
//! * `transaction` - Transaction plugin file output
//! * `validation` - Configuration validation
//! * `web` - Plugin web server
//!
//! # Usage Pattern
//!
//! ```rust
//! use swarmer::observability::messages::runner::RunStarted;
//!
//! let msg = RunStarted {
//!     users: 10,
//!     spawn_rate: 2.0,
//!     run_time: None,
//! };
//!
//! tracing::info!("{}", msg);
//! ```

use tracing::Span;

pub mod runner;
pub mod transaction;
pub mod user;
pub mod validation;
pub mod web;

/// Emit a message as a structured event, or open a span carrying its fields.
pub trait StructuredLog {
    fn log(&self);

    fn span(&self, name: &str) -> Span;
}
