// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! CSV download routes for the transaction plugin.

use crate::plugins::transactions::manager::TransactionManager;
use crate::plugins::transactions::record::FILE_TIMESTAMP_FORMAT;
use crate::web::csv_attachment;
use axum::extract::State;
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use chrono::Local;

pub const ALL_TRANSACTIONS_PATH: &str = "/stats/transactions/all/csv";
pub const SUMMARY_PATH: &str = "/stats/transactions/csv";

pub fn router(manager: TransactionManager) -> Router {
    Router::new()
        .route(ALL_TRANSACTIONS_PATH, get(all_transactions))
        .route(SUMMARY_PATH, get(summary))
        .with_state(manager)
}

fn timestamped(prefix: &str) -> String {
    format!("{}_{}.csv", prefix, Local::now().format(FILE_TIMESTAMP_FORMAT))
}

/// Only rows not yet flushed to the log file; meant for runs without one.
async fn all_transactions(State(manager): State<TransactionManager>) -> Response {
    csv_attachment(&timestamped("all_transactions"), manager.all_transactions_csv())
}

async fn summary(State(manager): State<TransactionManager>) -> Response {
    csv_attachment(&timestamped("transactions"), manager.summary_csv())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugins::transactions::manager::{TransactionSettings, SUMMARY_HEADER};
    use crate::web;
    use tokio_util::sync::CancellationToken;

    #[tokio::test]
    async fn test_routes_serve_csv_downloads() {
        let manager = TransactionManager::new(TransactionSettings::default());
        let id = manager.start_transaction("checkout");
        manager.end_transaction(id, true, "").unwrap();

        let listener = web::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let shutdown = CancellationToken::new();
        let server = tokio::spawn(web::serve(listener, router(manager), shutdown.clone()));

        let all = reqwest::get(format!("http://{}{}", addr, ALL_TRANSACTIONS_PATH))
            .await
            .unwrap();
        assert_eq!(all.status().as_u16(), 200);
        assert_eq!(all.headers()["content-type"].to_str().unwrap(), "text/csv");
        assert!(all.headers()["content-disposition"]
            .to_str()
            .unwrap()
            .starts_with("attachment;filename=all_transactions_"));
        let body = all.text().await.unwrap();
        let lines: Vec<&str> = body.lines().collect();
        assert_eq!(
            lines[0],
            "start_time,duration,transaction_name,user_count,success,failure_message"
        );
        assert!(lines[1].contains(",checkout,0,True,"));

        let summary = reqwest::get(format!("http://{}{}", addr, SUMMARY_PATH))
            .await
            .unwrap();
        let disposition = summary.headers()["content-disposition"]
            .to_str()
            .unwrap()
            .to_string();
        assert!(disposition.starts_with("attachment;filename=transactions_"));
        assert!(disposition.ends_with(".csv"));
        let body = summary.text().await.unwrap();
        assert!(body.starts_with(SUMMARY_HEADER));
        assert!(body.lines().nth(1).unwrap().starts_with("checkout,1,"));

        shutdown.cancel();
        server.await.unwrap().unwrap();
    }
}
