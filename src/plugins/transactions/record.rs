// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The transaction record and its CSV rendering.

use chrono::{DateTime, Local};
use std::time::Duration;

/// CSV columns, in row order.
pub const CSV_HEADERS: [&str; 6] = [
    "start_time",
    "duration",
    "transaction_name",
    "user_count",
    "success",
    "failure_message",
];
pub const FIELD_DELIMITER: &str = ",";
pub const ROW_DELIMITER: &str = "\n";
/// Row timestamp, local time
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
/// Timestamp embedded in generated file names
pub const FILE_TIMESTAMP_FORMAT: &str = "%Y_%m_%d_%H_%M_%S";

/// A named, timed span of work.
///
/// Created by `start_transaction`, completed exactly once by `end_transaction`.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub id: u64,
    pub name: String,
    pub started_at: DateTime<Local>,
    pub ended_at: Option<DateTime<Local>>,
    pub duration: Option<Duration>,
    pub success: Option<bool>,
    /// Live users when the transaction started
    pub user_count: usize,
    pub failure_message: Option<String>,
}

impl Transaction {
    pub fn start(id: u64, name: impl Into<String>, user_count: usize) -> Self {
        Self {
            id,
            name: name.into(),
            started_at: Local::now(),
            ended_at: None,
            duration: None,
            success: None,
            user_count,
            failure_message: None,
        }
    }

    pub(crate) fn finish(&mut self, duration: Duration, success: bool, failure_message: &str) {
        self.ended_at = Some(Local::now());
        self.duration = Some(duration);
        self.success = Some(success);
        self.failure_message = if failure_message.is_empty() {
            None
        } else {
            Some(failure_message.to_string())
        };
    }

    pub fn duration_seconds(&self) -> f64 {
        self.duration.map(|d| d.as_secs_f64()).unwrap_or(0.0)
    }

    /// One CSV line in `CSV_HEADERS` order, without the row delimiter.
    pub fn csv_row(&self) -> String {
        let success = match self.success {
            Some(true) => "True",
            _ => "False",
        };
        [
            self.started_at.format(TIMESTAMP_FORMAT).to_string(),
            format_rounded(self.duration_seconds()),
            csv_field(&self.name),
            self.user_count.to_string(),
            success.to_string(),
            csv_field(self.failure_message.as_deref().unwrap_or("")),
        ]
        .join(FIELD_DELIMITER)
    }
}

/// The CSV header line, without the row delimiter.
pub fn csv_header() -> String {
    CSV_HEADERS.join(FIELD_DELIMITER)
}

/// Round to two decimals; whole numbers keep one decimal (`1.0`, `0.25`).
pub fn format_rounded(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded.fract() == 0.0 {
        format!("{:.1}", rounded)
    } else {
        format!("{}", rounded)
    }
}

/// Quote a field if it would otherwise break the row.
pub fn csv_field(value: &str) -> String {
    if value.contains(&[',', '"', '\n', '\r'][..]) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn finished(name: &str, millis: u64, success: bool, message: &str) -> Transaction {
        let mut t = Transaction::start(1, name, 12);
        t.started_at = Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        t.finish(Duration::from_millis(millis), success, message);
        t
    }

    #[test]
    fn test_header_order() {
        assert_eq!(
            csv_header(),
            "start_time,duration,transaction_name,user_count,success,failure_message"
        );
    }

    #[test]
    fn test_successful_row_matches_header_order() {
        let row = finished("checkout", 1234, true, "").csv_row();
        assert_eq!(row, "2024-03-09 14:05:07,1.23,checkout,12,True,");
        assert_eq!(row.split(',').count(), CSV_HEADERS.len());
    }

    #[test]
    fn test_failed_row_carries_message() {
        let row = finished("login", 500, false, "HTTP 503").csv_row();
        assert_eq!(row, "2024-03-09 14:05:07,0.5,login,12,False,HTTP 503");
    }

    #[test]
    fn test_row_quotes_delimiters() {
        let row = finished("search", 2000, false, "bad, really \"bad\"").csv_row();
        assert_eq!(
            row,
            "2024-03-09 14:05:07,2.0,search,12,False,\"bad, really \"\"bad\"\"\""
        );
    }

    #[test]
    fn test_unfinished_transaction() {
        let t = Transaction::start(4, "pending", 0);
        assert!(t.ended_at.is_none());
        assert_eq!(t.duration_seconds(), 0.0);
        assert!(t.csv_row().ends_with(",0.0,pending,0,False,"));
    }

    #[test]
    fn test_format_rounded() {
        assert_eq!(format_rounded(0.0), "0.0");
        assert_eq!(format_rounded(1.0), "1.0");
        assert_eq!(format_rounded(0.254), "0.25");
        assert_eq!(format_rounded(0.256), "0.26");
        assert_eq!(format_rounded(12.3), "12.3");
    }

    #[test]
    fn test_empty_failure_message_is_none() {
        let t = finished("x", 10, true, "");
        assert_eq!(t.failure_message, None);
        assert_eq!(t.success, Some(true));
        assert!(t.ended_at.is_some());
    }
}
