// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use std::sync::Arc;

use crate::engine::{Environment, HttpClient, WaitTime};
use crate::errors::UserError;

/// Everything a running user can reach: its identity, the host environment
/// and an HTTP client bound to the run's host.
#[derive(Debug, Clone)]
pub struct UserContext {
    pub user_id: usize,
    pub class_id: String,
    pub environment: Arc<Environment>,
    pub client: HttpClient,
}

/// A simulated client executing its task in a loop.
///
/// The runner calls `on_start` once, then alternates `task` with a pause
/// drawn from the class's wait time (or `default_wait_time`), and calls
/// `on_stop` when the run ends. A task error is logged and the loop goes on;
/// an `on_start` error stops the user.
#[async_trait]
pub trait User: Send {
    async fn on_start(&mut self, _ctx: &UserContext) -> Result<(), UserError> {
        Ok(())
    }

    async fn task(&mut self, ctx: &UserContext) -> Result<(), UserError>;

    async fn on_stop(&mut self, _ctx: &UserContext) {}

    fn name(&self) -> &'static str;

    fn default_wait_time(&self) -> WaitTime {
        WaitTime::constant(1.0)
    }
}
