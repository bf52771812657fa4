// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod event_logger;
pub mod transactions;

use crate::config::Config;
use crate::traits::Plugin;
use event_logger::EventLogger;
use std::sync::Arc;
use transactions::{TransactionManager, TransactionSettings};

/// The plugins every run carries, shared with the users that need them.
#[derive(Clone)]
pub struct BuiltinPlugins {
    pub transactions: Arc<TransactionManager>,
    pub event_logger: Arc<EventLogger>,
}

impl BuiltinPlugins {
    pub fn from_config(cfg: &Config) -> Self {
        Self {
            transactions: Arc::new(TransactionManager::new(TransactionSettings::from(
                &cfg.transactions,
            ))),
            event_logger: Arc::new(EventLogger::new()),
        }
    }

    /// In the order the runner notifies them.
    pub fn all(&self) -> Vec<Arc<dyn Plugin>> {
        vec![
            self.transactions.clone() as Arc<dyn Plugin>,
            self.event_logger.clone() as Arc<dyn Plugin>,
        ]
    }
}
