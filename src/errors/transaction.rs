// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors raised by the transaction timing plugin.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TransactionError {
    /// `end_transaction` was called with an id that was never started or
    /// has already been ended.
    #[error("Transaction {0} is not in flight")]
    UnknownTransaction(u64),

    /// Writing the transaction CSV failed.
    #[error("Failed to write transaction log '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
