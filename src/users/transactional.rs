// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use std::sync::Arc;

use crate::errors::UserError;
use crate::plugins::transactions::TransactionManager;
use crate::traits::{User, UserContext};

/// Walks a sequence of paths as one named transaction.
///
/// Every request is still reported individually by the client. The
/// transaction fails if any step returns an error status or cannot connect,
/// and its failure message lists each failed step.
pub struct TransactionalUser {
    transaction_name: String,
    paths: Vec<String>,
    transactions: Arc<TransactionManager>,
}

impl TransactionalUser {
    pub fn new(
        transaction_name: impl Into<String>,
        paths: Vec<String>,
        transactions: Arc<TransactionManager>,
    ) -> Self {
        Self {
            transaction_name: transaction_name.into(),
            paths,
            transactions,
        }
    }
}

#[async_trait]
impl User for TransactionalUser {
    async fn task(&mut self, ctx: &UserContext) -> Result<(), UserError> {
        let id = self.transactions.start_transaction(&self.transaction_name);

        let mut failures = Vec::new();
        for path in &self.paths {
            match ctx.client.get(path).await {
                Ok(response) if !response.is_success() => {
                    failures.push(format!("{} returned {}", path, response.status));
                }
                Ok(_) => {}
                Err(error) => failures.push(format!("{}: {}", path, error)),
            }
        }

        self.transactions
            .end_transaction(id, failures.is_empty(), &failures.join("; "))?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "transactional"
    }
}
