// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Load testing something that isn't HTTP.
//!
//! The user times a call into `WidgetMaker` itself and reports the outcome on
//! the `request` hook, so it shows up in the statistics next to HTTP traffic.

use async_trait::async_trait;
use rand::Rng;
use std::time::{Duration, Instant};

use crate::errors::UserError;
use crate::events::RequestEvent;
use crate::traits::{User, UserContext};

pub const REQUEST_TYPE: &str = "WidgetMaker";
pub const REQUEST_NAME: &str = "make_widget";
pub const GOOD_WIDGET: &str = "good";
pub const BAD_WIDGET: &str = "bad";

/// The system under test: slow, and wrong a fifth of the time.
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetMaker {
    pub min_delay_seconds: u64,
    pub max_delay_seconds: u64,
    /// Probability that a widget comes out good
    pub good_ratio: f64,
}

impl Default for WidgetMaker {
    fn default() -> Self {
        Self {
            min_delay_seconds: 1,
            max_delay_seconds: 5,
            good_ratio: 0.8,
        }
    }
}

impl WidgetMaker {
    /// `good_ratio` clamped to `[0, 1]`; NaN never yields a good widget.
    fn good_probability(&self) -> f64 {
        if self.good_ratio.is_nan() {
            0.0
        } else {
            self.good_ratio.clamp(0.0, 1.0)
        }
    }

    pub async fn get_widget(&self) -> &'static str {
        let (delay, good) = {
            let mut rng = rand::rng();
            let low = self.min_delay_seconds.min(self.max_delay_seconds);
            let high = self.min_delay_seconds.max(self.max_delay_seconds);
            (
                rng.random_range(low..=high),
                rng.random_bool(self.good_probability()),
            )
        };
        tokio::time::sleep(Duration::from_secs(delay)).await;
        if good {
            GOOD_WIDGET
        } else {
            BAD_WIDGET
        }
    }
}

/// Builds its `WidgetMaker` in `on_start`, then makes one widget per task.
pub struct WidgetMakerUser {
    template: WidgetMaker,
    maker: Option<WidgetMaker>,
}

impl WidgetMakerUser {
    pub fn new(template: WidgetMaker) -> Self {
        Self {
            template,
            maker: None,
        }
    }
}

#[async_trait]
impl User for WidgetMakerUser {
    async fn on_start(&mut self, _ctx: &UserContext) -> Result<(), UserError> {
        self.maker = Some(self.template.clone());
        Ok(())
    }

    async fn task(&mut self, ctx: &UserContext) -> Result<(), UserError> {
        let maker = self
            .maker
            .as_ref()
            .ok_or_else(|| UserError::Task("widget maker not started".to_string()))?;

        let started = Instant::now();
        let widget = maker.get_widget().await;
        let elapsed = started.elapsed();

        let event = if widget == GOOD_WIDGET {
            RequestEvent::success(REQUEST_TYPE, REQUEST_NAME, elapsed, widget.len())
        } else {
            RequestEvent::failure(REQUEST_TYPE, REQUEST_NAME, elapsed, widget.len(), widget)
        };
        ctx.environment.events.request.fire(&event);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "widget_maker"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::RequestStats;
    use crate::users::test_support;

    fn instant_maker(good_ratio: f64) -> WidgetMaker {
        WidgetMaker {
            min_delay_seconds: 0,
            max_delay_seconds: 0,
            good_ratio,
        }
    }

    #[tokio::test]
    async fn test_good_widget_is_success() {
        let ctx = test_support::context("http://localhost");
        let stats = RequestStats::attach(&ctx.environment.events);
        let mut user = WidgetMakerUser::new(instant_maker(1.0));

        user.on_start(&ctx).await.unwrap();
        user.task(&ctx).await.unwrap();

        let entry = stats.get(REQUEST_TYPE, REQUEST_NAME).unwrap();
        assert_eq!(entry.num_requests, 1);
        assert_eq!(entry.num_failures, 0);
    }

    #[tokio::test]
    async fn test_bad_widget_is_failure_with_widget_as_exception() {
        let ctx = test_support::context("http://localhost");
        let events = std::sync::Arc::new(parking_lot::Mutex::new(Vec::new()));
        let sink = events.clone();
        ctx.environment
            .events
            .request
            .add_listener(move |event: &RequestEvent| sink.lock().push(event.clone()));
        let mut user = WidgetMakerUser::new(instant_maker(0.0));

        user.on_start(&ctx).await.unwrap();
        user.task(&ctx).await.unwrap();

        let events = events.lock();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].exception.as_deref(), Some(BAD_WIDGET));
        assert_eq!(events[0].response_length, 3);
    }

    #[tokio::test]
    async fn test_nan_ratio_makes_bad_widgets() {
        assert_eq!(instant_maker(f64::NAN).get_widget().await, BAD_WIDGET);
        assert_eq!(instant_maker(7.0).get_widget().await, GOOD_WIDGET);
    }

    #[tokio::test]
    async fn test_task_before_start_fails() {
        let ctx = test_support::context("http://localhost");
        let mut user = WidgetMakerUser::new(instant_maker(1.0));
        assert!(matches!(user.task(&ctx).await, Err(UserError::Task(_))));
    }

    #[test]
    fn test_default_maker_settings() {
        let maker = WidgetMaker::default();
        assert_eq!(maker.min_delay_seconds, 1);
        assert_eq!(maker.max_delay_seconds, 5);
        assert_eq!(maker.good_ratio, 0.8);
    }
}
