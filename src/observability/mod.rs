// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Observability module for structured logging and tracing.
//!
//! This module provides centralized message types for all diagnostic and
//! operational logging in swarmer. Each message is a small struct with a
//! `Display` implementation and a `StructuredLog` implementation, which
//! keeps log wording in one place and attaches the same fields to every
//! emission of an event.
//!
//! # Architecture
//!
//! Messages are organized by subsystem:
//! * `messages::runner` - Run lifecycle, spawning and request statistics
//! * `messages::user` - Virtual user lifecycle, task failures and custom events
//! * `messages::transaction` - Transaction plugin file output
//! * `messages::validation` - Configuration validation
//! * `messages::web` - Plugin web server
//!
//! # Usage
//!
//! ```rust
//! use swarmer::observability::messages::user::UserTaskFailed;
//! use swarmer::observability::messages::StructuredLog;
//!
//! let error = std::io::Error::new(std::io::ErrorKind::Other, "connection reset");
//! UserTaskFailed {
//!     user_id: 3,
//!     class_id: "hello",
//!     error: &error,
//! }
//! .log();
//! ```

pub mod messages;
