// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;

use crate::engine::WaitTime;
use crate::errors::UserError;
use crate::traits::{User, UserContext};

/// Requests one path per task; the client reports the request.
pub struct SimpleHttpUser {
    path: String,
}

impl SimpleHttpUser {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl User for SimpleHttpUser {
    async fn task(&mut self, ctx: &UserContext) -> Result<(), UserError> {
        ctx.client.get(&self.path).await?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "simple_http"
    }

    fn default_wait_time(&self) -> WaitTime {
        WaitTime::between(5.0, 15.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::RequestStats;
    use crate::users::test_support;
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::Router;

    #[tokio::test]
    async fn test_task_reports_request() {
        let router = Router::new()
            .route("/", get(|| async { "hello" }))
            .route("/broken", get(|| async { StatusCode::INTERNAL_SERVER_ERROR }));
        let (base_url, shutdown) = test_support::serve(router).await;
        let ctx = test_support::context(&base_url);
        let stats = RequestStats::attach(&ctx.environment.events);

        let mut ok = SimpleHttpUser::new("/");
        ok.task(&ctx).await.unwrap();
        ok.task(&ctx).await.unwrap();

        let mut broken = SimpleHttpUser::new("/broken");
        broken.task(&ctx).await.unwrap();

        let root = stats.get("GET", "/").unwrap();
        assert_eq!(root.num_requests, 2);
        assert_eq!(root.num_failures, 0);
        assert_eq!(stats.get("GET", "/broken").unwrap().num_failures, 1);

        shutdown.cancel();
    }

    #[tokio::test]
    async fn test_connection_error_is_reported_and_returned() {
        // Nothing listens on the discard port.
        let ctx = test_support::context("http://127.0.0.1:9");
        let stats = RequestStats::attach(&ctx.environment.events);

        let mut user = SimpleHttpUser::new("/");
        assert!(matches!(user.task(&ctx).await, Err(UserError::Http(_))));
        assert_eq!(stats.totals(), (1, 1));
    }

    #[test]
    fn test_default_wait_time() {
        assert_eq!(
            SimpleHttpUser::new("/").default_wait_time(),
            WaitTime::between(5.0, 15.0)
        );
    }
}
