// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::engine::runner::{LocalRunner, RunSummary};
use crate::errors::RunnerError;
use crate::observability::messages::web::WebServerFailed;
use crate::observability::messages::StructuredLog;
use crate::plugins::BuiltinPlugins;
use crate::web;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// A runner plus the plugins and web server that surround it.
///
/// Built by `RuntimeBuilder::from_config`.
pub struct Runtime {
    pub runner: LocalRunner,
    pub plugins: BuiltinPlugins,
    pub run_time: Option<Duration>,
    /// Address for the plugin routes; `None` runs headless
    pub web_bind: Option<String>,
}

impl Runtime {
    /// Serve plugin routes (unless headless) for the duration of the run.
    pub async fn run(self, shutdown: CancellationToken) -> Result<RunSummary, RunnerError> {
        let web_shutdown = CancellationToken::new();
        let server = match &self.web_bind {
            Some(addr) => {
                let listener = web::bind(addr).await?;
                let router = web::build_router(&self.plugins.all());
                let token = web_shutdown.clone();
                Some(tokio::spawn(async move {
                    if let Err(error) = web::serve(listener, router, token).await {
                        WebServerFailed { error: &error }.log();
                    }
                }))
            }
            None => None,
        };

        let result = self.runner.run(self.run_time, shutdown).await;

        web_shutdown.cancel();
        if let Some(server) = server {
            let _ = server.await;
        }
        result
    }
}
