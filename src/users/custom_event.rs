// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;

use crate::engine::WaitTime;
use crate::errors::UserError;
use crate::events::EventHook;
use crate::plugins::event_logger::NamedEvent;
use crate::traits::{User, UserContext};

/// Requests a path, then fires a custom event with the name and response.
pub struct EventFiringUser {
    path: String,
    hook: EventHook<NamedEvent>,
}

impl EventFiringUser {
    pub fn new(path: impl Into<String>, hook: EventHook<NamedEvent>) -> Self {
        Self {
            path: path.into(),
            hook,
        }
    }
}

#[async_trait]
impl User for EventFiringUser {
    async fn task(&mut self, ctx: &UserContext) -> Result<(), UserError> {
        let response = ctx.client.get_named(&self.path, &self.path).await?;
        self.hook.fire(&NamedEvent {
            name: self.path.clone(),
            response: response.to_string(),
        });
        Ok(())
    }

    fn name(&self) -> &'static str {
        "event_firing"
    }

    fn default_wait_time(&self) -> WaitTime {
        WaitTime::between(5.0, 15.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugins::event_logger::EventLogger;
    use crate::users::test_support;
    use axum::routing::get;
    use axum::Router;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_fires_event_after_request() {
        let (base_url, shutdown) =
            test_support::serve(Router::new().route("/", get(|| async { "ok" }))).await;
        let ctx = test_support::context(&base_url);

        let logger = EventLogger::new();
        let hook = logger.hook();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        hook.add_listener(move |event: &NamedEvent| sink.lock().push(event.clone()));

        let mut user = EventFiringUser::new("/", hook);
        user.task(&ctx).await.unwrap();

        assert_eq!(logger.fired(), 1);
        assert_eq!(
            *seen.lock(),
            vec![NamedEvent {
                name: "/".to_string(),
                response: "<Response [200]>".to_string(),
            }]
        );

        shutdown.cancel();
    }

    #[tokio::test]
    async fn test_no_event_when_request_fails() {
        let ctx = test_support::context("http://127.0.0.1:9");
        let logger = EventLogger::new();

        let mut user = EventFiringUser::new("/", logger.hook());
        assert!(user.task(&ctx).await.is_err());
        assert_eq!(logger.fired(), 0);
    }
}
