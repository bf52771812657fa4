// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for configuration validation.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// Configuration validation found problems.
///
/// # Log Level
/// `error!` - The run will not start
///
/// # Example
/// ```
/// use swarmer::observability::messages::validation::ConfigValidationFailed;
///
/// let msg = ConfigValidationFailed { error_count: 2 };
///
/// assert_eq!(msg.to_string(), "Configuration validation failed with 2 error(s)");
/// ```
pub struct ConfigValidationFailed {
    pub error_count: usize,
}

impl Display for ConfigValidationFailed {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Configuration validation failed with {} error(s)",
            self.error_count
        )
    }
}

impl StructuredLog for ConfigValidationFailed {
    fn log(&self) {
        tracing::error!(error_count = self.error_count, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!(
            "config_validation",
            span_name = name,
            error_count = self.error_count,
        )
    }
}
