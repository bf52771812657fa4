// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for the transaction plugin's CSV output.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use std::path::Path;
use tracing::Span;

/// The transaction CSV was created and its header written.
///
/// # Log Level
/// `info!` - Important operational event
pub struct TransactionLogCreated<'a> {
    pub path: &'a Path,
}

impl Display for TransactionLogCreated<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Logging transactions to {}", self.path.display())
    }
}

impl StructuredLog for TransactionLogCreated<'_> {
    fn log(&self) {
        tracing::info!(path = %self.path.display(), "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "transaction_log",
            span_name = name,
            path = %self.path.display(),
        )
    }
}

/// Buffered transaction rows were written to the CSV.
///
/// # Log Level
/// `debug!` - Routine, frequent
pub struct TransactionsFlushed<'a> {
    pub path: &'a Path,
    pub rows: usize,
}

impl Display for TransactionsFlushed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Flushed {} transactions to {}",
            self.rows,
            self.path.display()
        )
    }
}

impl StructuredLog for TransactionsFlushed<'_> {
    fn log(&self) {
        tracing::debug!(path = %self.path.display(), rows = self.rows, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "transactions_flushed",
            span_name = name,
            rows = self.rows,
        )
    }
}

/// The transaction CSV was finalized at shutdown.
///
/// # Log Level
/// `info!` - Important operational event
pub struct TransactionLogClosed<'a> {
    pub path: &'a Path,
    pub total_rows: u64,
}

impl Display for TransactionLogClosed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Wrote {} transactions to {}",
            self.total_rows,
            self.path.display()
        )
    }
}

impl StructuredLog for TransactionLogClosed<'_> {
    fn log(&self) {
        tracing::info!(
            path = %self.path.display(),
            total_rows = self.total_rows,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "transaction_log_closed",
            span_name = name,
            total_rows = self.total_rows,
        )
    }
}
