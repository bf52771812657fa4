// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::WaitTimeConfig;
use rand::Rng;
use std::time::Duration;

/// Pause a virtual user takes after each task.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WaitTime {
    /// Always the same pause.
    Constant(Duration),
    /// Uniformly random pause in `[min, max]`.
    Between(Duration, Duration),
}

impl WaitTime {
    pub fn constant(seconds: f64) -> Self {
        WaitTime::Constant(Duration::from_secs_f64(seconds.max(0.0)))
    }

    /// Bounds are reordered if given backwards.
    pub fn between(min_seconds: f64, max_seconds: f64) -> Self {
        let min = Duration::from_secs_f64(min_seconds.max(0.0));
        let max = Duration::from_secs_f64(max_seconds.max(0.0));
        if min <= max {
            WaitTime::Between(min, max)
        } else {
            WaitTime::Between(max, min)
        }
    }

    /// Draw the next pause.
    pub fn next(&self) -> Duration {
        match *self {
            WaitTime::Constant(pause) => pause,
            WaitTime::Between(min, max) if min == max => min,
            WaitTime::Between(min, max) => {
                let seconds = rand::rng().random_range(min.as_secs_f64()..=max.as_secs_f64());
                Duration::from_secs_f64(seconds)
            }
        }
    }
}

impl From<&WaitTimeConfig> for WaitTime {
    fn from(config: &WaitTimeConfig) -> Self {
        match *config {
            WaitTimeConfig::Constant { seconds } => WaitTime::constant(seconds),
            WaitTimeConfig::Between {
                min_seconds,
                max_seconds,
            } => WaitTime::between(min_seconds, max_seconds),
        }
    }
}
