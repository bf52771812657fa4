// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::TransactionConfig;
use crate::engine::{Environment, UserCount};
use crate::errors::{PluginError, TransactionError};
use crate::observability::messages::transaction::{
    TransactionLogClosed, TransactionLogCreated, TransactionsFlushed,
};
use crate::observability::messages::StructuredLog;
use crate::plugins::transactions::record::{
    csv_field, csv_header, format_rounded, Transaction, FIELD_DELIMITER, FILE_TIMESTAMP_FORMAT,
    ROW_DELIMITER,
};
use crate::plugins::transactions::routes;
use crate::traits::Plugin;
use chrono::Local;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Header of the per-name summary CSV.
pub const SUMMARY_HEADER: &str = "\"Name\",\"Request Count\",\"Median Response Time\",\"Average Response Time\",\"Min Response Time\",\"Max Response Time\"";

#[derive(Debug, Clone, PartialEq)]
pub struct TransactionSettings {
    /// Stream completed rows to a CSV file
    pub log_in_file: bool,
    pub output_dir: PathBuf,
    /// Pending rows that trigger a write
    pub flush_size: usize,
}

impl From<&TransactionConfig> for TransactionSettings {
    fn from(config: &TransactionConfig) -> Self {
        Self {
            log_in_file: config.log_in_file,
            output_dir: config.get_output_dir(),
            flush_size: config.get_flush_size(),
        }
    }
}

impl Default for TransactionSettings {
    fn default() -> Self {
        TransactionSettings::from(&TransactionConfig::default())
    }
}

/// Per-name statistics over completed transactions, in seconds.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionSummary {
    pub name: String,
    pub count: usize,
    pub median: f64,
    pub average: f64,
    pub min: f64,
    pub max: f64,
}

impl TransactionSummary {
    fn from_durations(name: &str, durations: &mut [f64]) -> Option<Self> {
        if durations.is_empty() {
            return None;
        }
        durations.sort_by(|a, b| a.total_cmp(b));
        let count = durations.len();
        let median = if count % 2 == 1 {
            durations[count / 2]
        } else {
            (durations[count / 2 - 1] + durations[count / 2]) / 2.0
        };
        Some(Self {
            name: name.to_string(),
            count,
            median,
            average: durations.iter().sum::<f64>() / count as f64,
            min: durations[0],
            max: durations[count - 1],
        })
    }

    fn csv_row(&self) -> String {
        [
            csv_field(&self.name),
            self.count.to_string(),
            format_rounded(self.median),
            format_rounded(self.average),
            format_rounded(self.min),
            format_rounded(self.max),
        ]
        .join(FIELD_DELIMITER)
    }
}

struct TransactionLog {
    path: PathBuf,
    writer: BufWriter<File>,
    rows_written: u64,
}

impl TransactionLog {
    fn create(dir: &Path) -> Result<Self, TransactionError> {
        let file_name = format!(
            "transactions_{}.csv",
            Local::now().format(FILE_TIMESTAMP_FORMAT)
        );
        let path = dir.join(file_name);
        let io_error = |source| TransactionError::Io {
            path: path.clone(),
            source,
        };

        let file = File::create(&path).map_err(io_error)?;
        let mut writer = BufWriter::new(file);
        writer
            .write_all(format!("{}{}", csv_header(), ROW_DELIMITER).as_bytes())
            .and_then(|_| writer.flush())
            .map_err(io_error)?;

        Ok(Self {
            path,
            writer,
            rows_written: 0,
        })
    }

    fn append(&mut self, rows: &[String]) -> Result<(), TransactionError> {
        if rows.is_empty() {
            return Ok(());
        }
        let chunk = format!("{}{}", rows.join(ROW_DELIMITER), ROW_DELIMITER);
        self.writer
            .write_all(chunk.as_bytes())
            .and_then(|_| self.writer.flush())
            .map_err(|source| TransactionError::Io {
                path: self.path.clone(),
                source,
            })?;
        self.rows_written += rows.len() as u64;
        Ok(())
    }
}

#[derive(Default)]
struct Ledger {
    last_id: u64,
    in_flight: HashMap<u64, (Transaction, Instant)>,
    /// Rows not yet written to the log file
    pending_rows: Vec<String>,
    /// Completed transactions grouped by name, in first-completion order
    completed: Vec<(String, Vec<Transaction>)>,
    group_index: HashMap<String, usize>,
    log: Option<TransactionLog>,
    user_count: Option<UserCount>,
}

impl Ledger {
    fn flush(&mut self) -> Result<(), TransactionError> {
        if let Some(log) = self.log.as_mut() {
            log.append(&self.pending_rows)?;
            TransactionsFlushed {
                path: &log.path,
                rows: self.pending_rows.len(),
            }
            .log();
            self.pending_rows.clear();
        }
        Ok(())
    }
}

/// Times named transactions marked by user code and reports them as CSV.
///
/// Completed rows accumulate in memory and, when file logging is on, are
/// written to `transactions_<timestamp>.csv` every `flush_size` rows and at
/// shutdown. The manager is also a `Plugin` serving two download routes:
///
/// * `/stats/transactions/all/csv` - every row not yet written to the file
/// * `/stats/transactions/csv` - count, median, average, min and max per name
///
/// Cloning yields a handle to the same ledger.
///
/// # Example
/// ```
/// use swarmer::plugins::transactions::{TransactionManager, TransactionSettings};
///
/// let manager = TransactionManager::new(TransactionSettings::default());
/// let id = manager.start_transaction("checkout");
/// manager.end_transaction(id, true, "").unwrap();
///
/// assert_eq!(manager.completed("checkout").len(), 1);
/// assert!(manager.end_transaction(id, true, "").is_err());
/// ```
#[derive(Clone)]
pub struct TransactionManager {
    settings: TransactionSettings,
    ledger: Arc<Mutex<Ledger>>,
}

impl TransactionManager {
    pub fn new(settings: TransactionSettings) -> Self {
        Self {
            settings,
            ledger: Arc::new(Mutex::new(Ledger::default())),
        }
    }

    pub fn settings(&self) -> &TransactionSettings {
        &self.settings
    }

    /// Begin timing `name`; returns the id to pass to `end_transaction`.
    pub fn start_transaction(&self, name: &str) -> u64 {
        let mut ledger = self.ledger.lock();
        ledger.last_id += 1;
        let id = ledger.last_id;
        let user_count = ledger.user_count.as_ref().map(UserCount::get).unwrap_or(0);
        ledger
            .in_flight
            .insert(id, (Transaction::start(id, name, user_count), Instant::now()));
        id
    }

    /// Complete a transaction. Pass an empty `failure_message` on success.
    pub fn end_transaction(
        &self,
        id: u64,
        success: bool,
        failure_message: &str,
    ) -> Result<(), TransactionError> {
        let elapsed = {
            let ledger = self.ledger.lock();
            let (_, started) = ledger
                .in_flight
                .get(&id)
                .ok_or(TransactionError::UnknownTransaction(id))?;
            started.elapsed()
        };
        self.complete(id, elapsed, success, failure_message)
    }

    /// Complete a transaction with an explicit duration.
    pub(crate) fn complete(
        &self,
        id: u64,
        duration: Duration,
        success: bool,
        failure_message: &str,
    ) -> Result<(), TransactionError> {
        let mut ledger = self.ledger.lock();
        let (mut transaction, _) = ledger
            .in_flight
            .remove(&id)
            .ok_or(TransactionError::UnknownTransaction(id))?;
        transaction.finish(duration, success, failure_message);

        ledger.pending_rows.push(transaction.csv_row());

        let next_index = ledger.completed.len();
        let index = *ledger
            .group_index
            .entry(transaction.name.clone())
            .or_insert(next_index);
        if index == next_index {
            ledger.completed.push((transaction.name.clone(), Vec::new()));
        }
        ledger.completed[index].1.push(transaction);

        if ledger.pending_rows.len() >= self.settings.flush_size && ledger.log.is_some() {
            ledger.flush()?;
        }
        Ok(())
    }

    /// Create the CSV file and write its header.
    pub fn open_log(&self) -> Result<PathBuf, TransactionError> {
        let log = TransactionLog::create(&self.settings.output_dir)?;
        let path = log.path.clone();
        TransactionLogCreated { path: &path }.log();
        self.ledger.lock().log = Some(log);
        Ok(path)
    }

    /// Write pending rows to the CSV file, if one is open.
    pub fn flush(&self) -> Result<(), TransactionError> {
        self.ledger.lock().flush()
    }

    /// Write remaining rows and close the CSV file, if one is open.
    pub fn close_log(&self) -> Result<Option<PathBuf>, TransactionError> {
        let mut ledger = self.ledger.lock();
        ledger.flush()?;
        Ok(ledger.log.take().map(|log| {
            TransactionLogClosed {
                path: &log.path,
                total_rows: log.rows_written,
            }
            .log();
            log.path
        }))
    }

    pub fn log_path(&self) -> Option<PathBuf> {
        self.ledger.lock().log.as_ref().map(|log| log.path.clone())
    }

    pub fn in_flight_count(&self) -> usize {
        self.ledger.lock().in_flight.len()
    }

    pub fn pending_rows(&self) -> Vec<String> {
        self.ledger.lock().pending_rows.clone()
    }

    /// Completed transactions named `name`, oldest first.
    pub fn completed(&self, name: &str) -> Vec<Transaction> {
        let ledger = self.ledger.lock();
        ledger
            .group_index
            .get(name)
            .map(|&index| ledger.completed[index].1.clone())
            .unwrap_or_default()
    }

    /// Header plus every pending row.
    pub fn all_transactions_csv(&self) -> String {
        let ledger = self.ledger.lock();
        format!(
            "{}{}{}",
            csv_header(),
            ROW_DELIMITER,
            ledger.pending_rows.join(ROW_DELIMITER)
        )
    }

    pub fn summarize(&self) -> Vec<TransactionSummary> {
        let ledger = self.ledger.lock();
        ledger
            .completed
            .iter()
            .filter_map(|(name, transactions)| {
                let mut durations: Vec<f64> =
                    transactions.iter().map(Transaction::duration_seconds).collect();
                TransactionSummary::from_durations(name, &mut durations)
            })
            .collect()
    }

    /// Summary header plus one row per transaction name.
    pub fn summary_csv(&self) -> String {
        std::iter::once(SUMMARY_HEADER.to_string())
            .chain(self.summarize().iter().map(TransactionSummary::csv_row))
            .collect::<Vec<_>>()
            .join(ROW_DELIMITER)
    }
}

impl Plugin for TransactionManager {
    fn name(&self) -> &'static str {
        "transactions"
    }

    fn on_init(&self, env: &Environment) -> Result<(), PluginError> {
        self.ledger.lock().user_count = Some(env.user_count_handle());
        if self.settings.log_in_file {
            self.open_log()?;
        }
        Ok(())
    }

    fn routes(&self) -> Option<axum::Router> {
        Some(routes::router(self.clone()))
    }

    fn on_quitting(&self) -> Result<(), PluginError> {
        self.close_log()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn in_memory() -> TransactionManager {
        TransactionManager::new(TransactionSettings::default())
    }

    fn logging_to(dir: &Path, flush_size: usize) -> TransactionManager {
        TransactionManager::new(TransactionSettings {
            log_in_file: true,
            output_dir: dir.to_path_buf(),
            flush_size,
        })
    }

    fn complete_in(manager: &TransactionManager, name: &str, millis: u64) {
        let id = manager.start_transaction(name);
        manager
            .complete(id, Duration::from_millis(millis), true, "")
            .unwrap();
    }

    #[test]
    fn test_ids_are_sequential_from_one() {
        let manager = in_memory();
        assert_eq!(manager.start_transaction("a"), 1);
        assert_eq!(manager.start_transaction("b"), 2);
        assert_eq!(manager.in_flight_count(), 2);
    }

    #[test]
    fn test_end_moves_transaction_to_completed() {
        let manager = in_memory();
        let id = manager.start_transaction("login");
        manager.end_transaction(id, false, "HTTP 500").unwrap();

        assert_eq!(manager.in_flight_count(), 0);
        let completed = manager.completed("login");
        assert_eq!(completed.len(), 1);
        assert_eq!(completed[0].success, Some(false));
        assert_eq!(completed[0].failure_message.as_deref(), Some("HTTP 500"));
        assert!(completed[0].duration.is_some());
        assert_eq!(manager.pending_rows().len(), 1);
        assert!(manager.pending_rows()[0].ends_with(",login,0,False,HTTP 500"));
    }

    #[test]
    fn test_unknown_and_repeated_end_are_errors() {
        let manager = in_memory();
        assert!(matches!(
            manager.end_transaction(42, true, ""),
            Err(TransactionError::UnknownTransaction(42))
        ));

        let id = manager.start_transaction("once");
        manager.end_transaction(id, true, "").unwrap();
        assert!(matches!(
            manager.end_transaction(id, true, ""),
            Err(TransactionError::UnknownTransaction(_))
        ));
        assert_eq!(manager.completed("once").len(), 1);
    }

    #[test]
    fn test_user_count_snapshot_after_init() {
        let manager = in_memory();
        let env = Environment::new("http://localhost", false);
        manager.on_init(&env).unwrap();

        let users = env.user_count_handle();
        users.increment();
        users.increment();
        users.increment();
        let id = manager.start_transaction("browse");
        users.decrement();
        manager.end_transaction(id, true, "").unwrap();

        assert_eq!(manager.completed("browse")[0].user_count, 3);
    }

    #[test]
    fn test_all_transactions_csv() {
        let manager = in_memory();
        assert_eq!(
            manager.all_transactions_csv(),
            "start_time,duration,transaction_name,user_count,success,failure_message\n"
        );

        complete_in(&manager, "a", 250);
        complete_in(&manager, "b", 1000);
        let csv = manager.all_transactions_csv();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].contains(",0.25,a,0,True,"));
        assert!(lines[2].contains(",1.0,b,0,True,"));
    }

    #[test]
    fn test_summary_csv_groups_by_name_in_completion_order() {
        let manager = in_memory();
        complete_in(&manager, "search", 100);
        complete_in(&manager, "checkout", 2000);
        complete_in(&manager, "search", 300);
        complete_in(&manager, "search", 200);
        complete_in(&manager, "checkout", 1000);

        assert_eq!(
            manager.summary_csv(),
            [
                SUMMARY_HEADER,
                "search,3,0.2,0.2,0.1,0.3",
                "checkout,2,1.5,1.5,1.0,2.0",
            ]
            .join("\n")
        );
    }

    #[test]
    fn test_summary_of_nothing_is_header_only() {
        assert_eq!(in_memory().summary_csv(), SUMMARY_HEADER);
    }

    #[test]
    fn test_no_file_without_log_in_file() {
        let dir = tempfile::tempdir().unwrap();
        let manager = TransactionManager::new(TransactionSettings {
            log_in_file: false,
            output_dir: dir.path().to_path_buf(),
            flush_size: 1,
        });
        manager.on_init(&Environment::new("http://localhost", false)).unwrap();
        complete_in(&manager, "a", 10);
        manager.on_quitting().unwrap();

        assert!(manager.log_path().is_none());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
        assert_eq!(manager.pending_rows().len(), 1);
    }

    #[test]
    fn test_flushes_at_flush_size_and_on_quitting() {
        let dir = tempfile::tempdir().unwrap();
        let manager = logging_to(dir.path(), 2);
        manager.on_init(&Environment::new("http://localhost", false)).unwrap();

        let path = manager.log_path().unwrap();
        let file_name = path.file_name().unwrap().to_str().unwrap().to_string();
        assert!(file_name.starts_with("transactions_"));
        assert!(file_name.ends_with(".csv"));
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            format!("{}\n", csv_header())
        );

        complete_in(&manager, "a", 10);
        assert_eq!(std::fs::read_to_string(&path).unwrap().lines().count(), 1);

        complete_in(&manager, "b", 20);
        assert_eq!(std::fs::read_to_string(&path).unwrap().lines().count(), 3);
        assert!(manager.pending_rows().is_empty());

        complete_in(&manager, "c", 30);
        assert_eq!(manager.pending_rows().len(), 1);

        manager.on_quitting().unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[3].contains(",c,"));
        assert!(contents.ends_with('\n'));
        assert!(manager.log_path().is_none());
    }

    #[test]
    fn test_open_log_in_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let manager = logging_to(&dir.path().join("missing"), 1);
        let error = manager
            .on_init(&Environment::new("http://localhost", false))
            .unwrap_err();
        assert!(matches!(
            error,
            PluginError::Transaction(TransactionError::Io { .. })
        ));
    }
}
