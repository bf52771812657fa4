// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Local HTTP server and user context for user tests.

use crate::engine::{Environment, HttpClient};
use crate::traits::UserContext;
use crate::web;
use axum::Router;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Serve `router` on an ephemeral port; returns its base URL and a stop token.
pub async fn serve(router: Router) -> (String, CancellationToken) {
    let listener = web::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    let shutdown = CancellationToken::new();
    tokio::spawn(web::serve(listener, router, shutdown.clone()));
    (base_url, shutdown)
}

pub fn context(base_url: &str) -> UserContext {
    let environment = Arc::new(Environment::new(base_url, false));
    let client = HttpClient::new(base_url, environment.events.clone()).unwrap();
    UserContext {
        user_id: 0,
        class_id: "test".to_string(),
        environment,
        client,
    }
}
