// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt;

/// Errors that can occur during run configuration validation
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// The configuration declares no user classes to spawn
    NoUserClasses,
    /// Two user classes share an ID
    DuplicateUserClassId {
        /// The duplicate user class ID
        class_id: String,
    },
    /// A user class names a kind the factory cannot build
    UnknownUserKind {
        /// The user class that references the kind
        class_id: String,
        /// The unrecognized kind
        kind: String,
    },
    /// A user class has a weight of zero
    ZeroWeight {
        /// The user class with the zero weight
        class_id: String,
    },
    /// A wait time is negative or has its bounds reversed
    InvalidWaitTime {
        /// The user class with the bad wait time
        class_id: String,
        /// What is wrong with it
        reason: String,
    },
    /// A user class's options cannot be turned into a user
    InvalidUserOptions {
        /// The user class with the bad options
        class_id: String,
        /// What the factory rejected
        reason: String,
    },
    /// The spawn rate is zero, negative or not a number
    InvalidSpawnRate {
        /// The configured rate
        spawn_rate: f64,
    },
    /// The transaction flush size is zero
    ZeroFlushSize,
    /// The host is not an http(s) URL
    InvalidHost {
        /// The configured host
        host: String,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::NoUserClasses => {
                write!(f, "No user classes configured; at least one is required")
            }
            ValidationError::DuplicateUserClassId { class_id } => {
                write!(f, "Duplicate user class ID: '{}'", class_id)
            }
            ValidationError::UnknownUserKind { class_id, kind } => {
                write!(
                    f,
                    "User class '{}' has unknown kind '{}'",
                    class_id, kind
                )
            }
            ValidationError::ZeroWeight { class_id } => {
                write!(f, "User class '{}' has weight 0 and would never spawn", class_id)
            }
            ValidationError::InvalidWaitTime { class_id, reason } => {
                write!(f, "User class '{}' has an invalid wait time: {}", class_id, reason)
            }
            ValidationError::InvalidUserOptions { class_id, reason } => {
                write!(f, "User class '{}' has invalid options: {}", class_id, reason)
            }
            ValidationError::InvalidSpawnRate { spawn_rate } => {
                write!(f, "Spawn rate must be a positive number, got {}", spawn_rate)
            }
            ValidationError::ZeroFlushSize => {
                write!(f, "Transaction flush size must be at least 1")
            }
            ValidationError::InvalidHost { host } => {
                write!(f, "Host '{}' must start with http:// or https://", host)
            }
        }
    }
}

impl std::error::Error for ValidationError {}
