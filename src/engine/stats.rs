// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::events::{Events, RequestEvent};
use crate::observability::messages::runner::RequestStatsLine;
use crate::observability::messages::StructuredLog;
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Running totals for one `(request_type, name)` pair.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatsEntry {
    pub num_requests: u64,
    pub num_failures: u64,
    pub total_response_time_ms: f64,
    pub min_response_time_ms: f64,
    pub max_response_time_ms: f64,
}

impl StatsEntry {
    fn record(&mut self, event: &RequestEvent) {
        let ms = event.response_time_ms();
        if self.num_requests == 0 || ms < self.min_response_time_ms {
            self.min_response_time_ms = ms;
        }
        if ms > self.max_response_time_ms {
            self.max_response_time_ms = ms;
        }
        self.num_requests += 1;
        self.total_response_time_ms += ms;
        if !event.is_success() {
            self.num_failures += 1;
        }
    }

    pub fn avg_response_time_ms(&self) -> f64 {
        if self.num_requests == 0 {
            0.0
        } else {
            self.total_response_time_ms / self.num_requests as f64
        }
    }
}

/// Per-request tallies fed by the `request` event hook.
#[derive(Debug, Default)]
pub struct RequestStats {
    entries: Mutex<BTreeMap<(String, String), StatsEntry>>,
}

impl RequestStats {
    /// Create stats and subscribe them to `events.request`.
    pub fn attach(events: &Events) -> Arc<Self> {
        let stats = Arc::new(Self::default());
        let listener = Arc::clone(&stats);
        events.request.add_listener(move |event: &RequestEvent| listener.record(event));
        stats
    }

    pub fn record(&self, event: &RequestEvent) {
        self.entries
            .lock()
            .entry((event.request_type.clone(), event.name.clone()))
            .or_default()
            .record(event);
    }

    pub fn get(&self, request_type: &str, name: &str) -> Option<StatsEntry> {
        self.entries
            .lock()
            .get(&(request_type.to_string(), name.to_string()))
            .cloned()
    }

    /// `(requests, failures)` across every entry.
    pub fn totals(&self) -> (u64, u64) {
        self.entries
            .lock()
            .values()
            .fold((0, 0), |(requests, failures), entry| {
                (requests + entry.num_requests, failures + entry.num_failures)
            })
    }

    pub fn log_summary(&self) {
        for ((request_type, name), entry) in self.entries.lock().iter() {
            RequestStatsLine {
                request_type,
                name,
                num_requests: entry.num_requests,
                num_failures: entry.num_failures,
                avg_ms: entry.avg_response_time_ms(),
                min_ms: entry.min_response_time_ms,
                max_ms: entry.max_response_time_ms,
            }
            .log();
        }
    }
}
