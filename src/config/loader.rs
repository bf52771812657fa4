// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::consts::{
    DEFAULT_SPAWN_RATE, DEFAULT_TRANSACTION_FLUSH_SIZE, DEFAULT_USERS, DEFAULT_USER_WEIGHT,
    DEFAULT_WEB_BIND,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure for a load test run.
///
/// It is typically loaded from a YAML file and may be overridden from the
/// command line before the runtime is built.
///
/// # Fields
/// * `host` - Base URL every HTTP user targets
/// * `users` - Number of concurrent virtual users
/// * `spawn_rate` - Users started per second
/// * `run_time_seconds` - Stop after this many seconds (runs until Ctrl+C if absent)
/// * `web` - Plugin web server options
/// * `transactions` - Transaction plugin options
/// * `user_classes` - The user behaviours mixed into the run
///
/// # Example
/// ```yaml
/// host: "http://localhost:8080"
/// users: 10
/// spawn_rate: 2
/// run_time_seconds: 60
/// web:
///   bind: "127.0.0.1:8089"
/// transactions:
///   log_in_file: true
///   flush_size: 100
/// user_classes:
///   - id: hello
///     kind: simple_http
///     wait_time:
///       type: between
///       min_seconds: 5
///       max_seconds: 15
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub host: String,
    #[serde(default = "default_users")]
    pub users: usize,
    #[serde(default = "default_spawn_rate")]
    pub spawn_rate: f64,
    #[serde(default)]
    pub run_time_seconds: Option<u64>,
    #[serde(default)]
    pub web: WebConfig,
    #[serde(default)]
    pub transactions: TransactionConfig,
    pub user_classes: Vec<UserClassConfig>,
}

impl Config {
    pub fn run_time(&self) -> Option<Duration> {
        self.run_time_seconds.map(Duration::from_secs)
    }
}

fn default_users() -> usize {
    DEFAULT_USERS
}

fn default_spawn_rate() -> f64 {
    DEFAULT_SPAWN_RATE
}

fn default_weight() -> u32 {
    DEFAULT_USER_WEIGHT
}

fn default_true() -> bool {
    true
}

/// Options for the web server that exposes plugin routes.
///
/// Setting `enabled: false` is the equivalent of a headless run: plugins
/// still work, their download routes are simply never mounted.
#[derive(Debug, Clone, Deserialize)]
pub struct WebConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    pub bind: Option<String>,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            bind: None,
        }
    }
}

impl WebConfig {
    pub fn bind_addr(&self) -> &str {
        self.bind.as_deref().unwrap_or(DEFAULT_WEB_BIND)
    }
}

/// Options for the transaction timing plugin.
///
/// # Fields
/// * `log_in_file` - Stream completed transactions to a CSV file instead of
///   only keeping them for the web routes
/// * `output_dir` - Directory the CSV file is created in (defaults to `.`)
/// * `flush_size` - Rows buffered before each write (defaults to 100)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransactionConfig {
    #[serde(default)]
    pub log_in_file: bool,
    pub output_dir: Option<PathBuf>,
    pub flush_size: Option<usize>,
}

impl TransactionConfig {
    pub fn get_output_dir(&self) -> PathBuf {
        self.output_dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn get_flush_size(&self) -> usize {
        self.flush_size.unwrap_or(DEFAULT_TRANSACTION_FLUSH_SIZE)
    }
}

/// Configuration for a single user class in the run.
///
/// `kind` selects the implementation (see `UserFactory`); `options` carries
/// kind-specific settings such as the request path or the expected page title.
///
/// # Example
/// ```yaml
/// id: "checkout"
/// kind: transactional
/// weight: 3
/// wait_time:
///   type: constant
///   seconds: 1
/// options:
///   transaction: "checkout"
///   paths: "/cart,/checkout"
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct UserClassConfig {
    pub id: String,
    pub kind: String,
    #[serde(default = "default_weight")]
    pub weight: u32,
    pub wait_time: Option<WaitTimeConfig>,
    #[serde(default)]
    pub options: HashMap<String, serde_yaml::Value>,
}

impl UserClassConfig {
    /// Read a string option, accepting scalars of any YAML type.
    pub fn option_str(&self, key: &str) -> Option<String> {
        match self.options.get(key)? {
            serde_yaml::Value::String(s) => Some(s.clone()),
            serde_yaml::Value::Number(n) => Some(n.to_string()),
            serde_yaml::Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }
}

/// How long a user pauses between tasks.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WaitTimeConfig {
    /// Uniformly random pause in `[min_seconds, max_seconds]`
    Between { min_seconds: f64, max_seconds: f64 },
    /// Fixed pause
    Constant { seconds: f64 },
}

/// Load a config from a YAML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, Box<dyn std::error::Error>> {
    let content = fs::read_to_string(path)?;
    let cfg: Config = serde_yaml::from_str(&content)?;
    Ok(cfg)
}

/// Load and validate a config from a YAML file
pub fn load_and_validate_config<P: AsRef<Path>>(
    path: P,
) -> Result<Config, Box<dyn std::error::Error>> {
    let cfg = load_config(path)?;

    if let Err(validation_errors) = crate::config::validate_config(&cfg) {
        let error_messages: Vec<String> = validation_errors.iter().map(|e| e.to_string()).collect();
        let combined_error = format!(
            "Configuration validation failed:\n{}",
            error_messages.join("\n")
        );
        return Err(combined_error.into());
    }

    Ok(cfg)
}
