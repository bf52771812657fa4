// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::engine::Environment;
use crate::errors::PluginError;

/// An extension the runner notifies at init and at shutdown, and whose
/// routes are mounted on the web server.
pub trait Plugin: Send + Sync {
    fn name(&self) -> &'static str;

    /// Called once before any user is spawned.
    fn on_init(&self, _env: &Environment) -> Result<(), PluginError> {
        Ok(())
    }

    /// HTTP routes to serve while the run is live.
    fn routes(&self) -> Option<axum::Router> {
        None
    }

    /// Called once after every user has stopped.
    fn on_quitting(&self) -> Result<(), PluginError> {
        Ok(())
    }
}
