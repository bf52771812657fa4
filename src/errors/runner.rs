// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors for runtime construction, user execution and plugin hooks.

use crate::errors::TransactionError;
use thiserror::Error;

/// Errors surfaced while building or running a load test.
#[derive(Error, Debug)]
pub enum RunnerError {
    /// A user class could not be turned into a user instance.
    #[error("Failed to create user for class '{class_id}': {reason}")]
    UserCreation { class_id: String, reason: String },

    /// A plugin hook failed.
    #[error("Plugin '{plugin}' failed: {source}")]
    Plugin {
        plugin: &'static str,
        #[source]
        source: PluginError,
    },

    /// The shared HTTP client could not be built.
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// The web server could not bind or serve.
    #[error("Web server error: {0}")]
    WebServer(#[from] std::io::Error),
}

/// Errors a plugin hook may return.
#[derive(Error, Debug)]
pub enum PluginError {
    #[error(transparent)]
    Transaction(#[from] TransactionError),

    #[error("{0}")]
    Other(String),
}

/// Errors a user task may return. The runner logs them and keeps the user looping.
#[derive(Error, Debug)]
pub enum UserError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Transaction(#[from] TransactionError),

    #[error("Task failed: {0}")]
    Task(String),
}
