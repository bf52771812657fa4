// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod config;
mod runner;
mod transaction;

pub use config::ValidationError;
pub use runner::{PluginError, RunnerError, UserError};
pub use transaction::TransactionError;
