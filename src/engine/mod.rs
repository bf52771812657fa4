// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod client;
pub mod environment;
pub mod runner;
pub mod runtime;
pub mod stats;
pub mod wait_time;

pub use client::{HttpClient, HttpResponse};
pub use environment::{Environment, UserCount};
pub use runner::{LocalRunner, RunSummary, UserClass, UserSpawner};
pub use runtime::Runtime;
pub use stats::{RequestStats, StatsEntry};
pub use wait_time::WaitTime;
