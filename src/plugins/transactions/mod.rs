// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Transaction timing plugin.
//!
//! User code brackets a unit of work with `start_transaction` and
//! `end_transaction`; the manager turns each completed transaction into a CSV
//! row and keeps per-name groups for summary statistics.

mod manager;
mod record;
pub mod routes;

pub use manager::{TransactionManager, TransactionSettings, TransactionSummary, SUMMARY_HEADER};
pub use record::{csv_header, format_rounded, Transaction, CSV_HEADERS};
