// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for the plugin web server.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use std::net::SocketAddr;
use tracing::Span;

/// The web server is accepting connections.
///
/// # Log Level
/// `info!` - Important operational event
pub struct WebServerListening {
    pub addr: SocketAddr,
}

impl Display for WebServerListening {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Web server listening on http://{}", self.addr)
    }
}

impl StructuredLog for WebServerListening {
    fn log(&self) {
        tracing::info!(addr = %self.addr, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!("web_server", span_name = name, addr = %self.addr)
    }
}

/// The web server stopped with an error.
///
/// # Log Level
/// `error!` - Failure requiring attention
pub struct WebServerFailed<'a> {
    pub error: &'a dyn std::error::Error,
}

impl Display for WebServerFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Web server failed: {}", self.error)
    }
}

impl StructuredLog for WebServerFailed<'_> {
    fn log(&self) {
        tracing::error!(error = %self.error, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!("web_server_failed", span_name = name)
    }
}
