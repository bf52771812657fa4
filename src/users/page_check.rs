// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Checks page content rather than just status codes.
//!
//! Each task loads a page and verifies its `<title>`, then runs a search and
//! verifies the results page is not empty. Both steps are timed by the user
//! and reported with request type `PageCheck`: the page check under its full
//! URL, the search as `search <term>`.

use async_trait::async_trait;
use reqwest::Url;
use std::time::Instant;

use crate::errors::UserError;
use crate::events::RequestEvent;
use crate::traits::{User, UserContext};

pub const REQUEST_TYPE: &str = "PageCheck";
pub const NO_RESULTS_MARKER: &str = "No results found.";
const EXCERPT_CHARS: usize = 200;

#[derive(Debug, Clone, PartialEq)]
pub struct PageCheckSettings {
    pub page_path: String,
    pub expected_title: String,
    pub search_path: String,
    pub search_term: String,
}

impl Default for PageCheckSettings {
    fn default() -> Self {
        Self {
            page_path: "/".to_string(),
            expected_title: "Python".to_string(),
            search_path: "/search/".to_string(),
            search_term: "pycon".to_string(),
        }
    }
}

pub struct PageCheckUser {
    settings: PageCheckSettings,
}

impl PageCheckUser {
    pub fn new(settings: PageCheckSettings) -> Self {
        Self { settings }
    }

    async fn check_title(&self, ctx: &UserContext) -> Result<(), UserError> {
        let name = ctx.client.url_for(&self.settings.page_path);
        let started = Instant::now();
        let response = match ctx.client.fetch(&self.settings.page_path).await {
            Ok(response) => response,
            Err(error) => {
                report_failure(ctx, &name, started, 0, error.to_string());
                return Err(error.into());
            }
        };

        let title = extract_title(&response.body).unwrap_or_default();
        if response.is_success() && title.contains(&self.settings.expected_title) {
            ctx.environment.events.request.fire(&RequestEvent::success(
                REQUEST_TYPE,
                name,
                started.elapsed(),
                response.body.len(),
            ));
        } else {
            report_failure(
                ctx,
                &name,
                started,
                response.body.len(),
                format!(
                    "expected title containing {:?}, got {:?} ({})",
                    self.settings.expected_title, title, response
                ),
            );
        }
        Ok(())
    }

    async fn check_search(&self, ctx: &UserContext) -> Result<(), UserError> {
        let name = format!("search {}", self.settings.search_term);
        let url = Url::parse_with_params(
            &ctx.client.url_for(&self.settings.search_path),
            &[("q", self.settings.search_term.as_str())],
        )
        .map_err(|e| UserError::Task(format!("invalid search url: {}", e)))?;

        let started = Instant::now();
        let response = match ctx.client.fetch(url.as_str()).await {
            Ok(response) => response,
            Err(error) => {
                report_failure(ctx, &name, started, 0, error.to_string());
                return Err(error.into());
            }
        };

        if response.is_success() && !response.body.contains(NO_RESULTS_MARKER) {
            ctx.environment.events.request.fire(&RequestEvent::success(
                REQUEST_TYPE,
                name,
                started.elapsed(),
                response.body.len(),
            ));
        } else {
            report_failure(
                ctx,
                &name,
                started,
                response.body.len(),
                excerpt(&response.body),
            );
        }
        Ok(())
    }
}

fn report_failure(
    ctx: &UserContext,
    name: &str,
    started: Instant,
    response_length: usize,
    exception: String,
) {
    ctx.environment.events.request.fire(&RequestEvent::failure(
        REQUEST_TYPE,
        name,
        started.elapsed(),
        response_length,
        exception,
    ));
}

/// Text of the first `<title>` element, matched case-insensitively.
pub fn extract_title(html: &str) -> Option<String> {
    let lower = html.to_ascii_lowercase();
    let open = lower.find("<title")?;
    let content_start = open + lower[open..].find('>')? + 1;
    let content_end = content_start + lower[content_start..].find("</title")?;
    Some(html[content_start..content_end].trim().to_string())
}

fn excerpt(body: &str) -> String {
    body.chars().take(EXCERPT_CHARS).collect()
}

#[async_trait]
impl User for PageCheckUser {
    async fn task(&mut self, ctx: &UserContext) -> Result<(), UserError> {
        self.check_title(ctx).await?;
        self.check_search(ctx).await
    }

    fn name(&self) -> &'static str {
        "page_check"
    }
}
