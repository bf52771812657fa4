// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! HTTP client handed to virtual users.
//!
//! A thin layer over `reqwest::Client` that resolves paths against the run's
//! host and reports every request on the `request` event hook. Statuses of
//! 400 and above are reported as failures but still returned to the caller,
//! so a user can inspect the body of an error page.

use crate::errors::UserError;
use crate::events::{Events, RequestEvent};
use reqwest::{Client, Method};
use std::fmt;
use std::time::{Duration, Instant};

/// A fully read HTTP response.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub url: String,
    pub body: String,
    pub elapsed: Duration,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        self.status < 400
    }
}

impl fmt::Display for HttpResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Response [{}]>", self.status)
    }
}

#[derive(Debug, Clone)]
pub struct HttpClient {
    base_url: String,
    inner: Client,
    events: Events,
}

impl HttpClient {
    pub fn new(base_url: impl Into<String>, events: Events) -> Result<Self, reqwest::Error> {
        let inner = Client::builder().build()?;
        Ok(Self {
            base_url: base_url.into(),
            inner,
            events,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolve `path` against the host. Absolute URLs pass through.
    pub fn url_for(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        let base = self.base_url.trim_end_matches('/');
        if path.starts_with('/') {
            format!("{}{}", base, path)
        } else {
            format!("{}/{}", base, path)
        }
    }

    /// `GET path`, reported under the path itself.
    pub async fn get(&self, path: &str) -> Result<HttpResponse, UserError> {
        self.request(Method::GET, path, path).await
    }

    /// `GET path`, reported under `name`. Use this to group URLs with ids in them.
    pub async fn get_named(&self, path: &str, name: &str) -> Result<HttpResponse, UserError> {
        self.request(Method::GET, path, name).await
    }

    /// Send a request and report it on the `request` hook.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        name: &str,
    ) -> Result<HttpResponse, UserError> {
        let request_type = method.as_str().to_string();
        let started = Instant::now();

        match self.send(method, &self.url_for(path)).await {
            Ok(response) => {
                let event = if response.is_success() {
                    RequestEvent::success(request_type, name, response.elapsed, response.body.len())
                } else {
                    RequestEvent::failure(
                        request_type,
                        name,
                        response.elapsed,
                        response.body.len(),
                        format!("HTTP {}", response.status),
                    )
                };
                self.events.request.fire(&event);
                Ok(response)
            }
            Err(error) => {
                self.events.request.fire(&RequestEvent::failure(
                    request_type,
                    name,
                    started.elapsed(),
                    0,
                    error.to_string(),
                ));
                Err(UserError::Http(error))
            }
        }
    }

    /// Fetch a URL without reporting it. For users that time and report
    /// their own work.
    pub async fn fetch(&self, url: &str) -> Result<HttpResponse, reqwest::Error> {
        self.send(Method::GET, &self.url_for(url)).await
    }

    async fn send(&self, method: Method, url: &str) -> Result<HttpResponse, reqwest::Error> {
        let started = Instant::now();
        let response = self.inner.request(method, url).send().await?;
        let status = response.status().as_u16();
        let url = response.url().to_string();
        let body = response.text().await?;
        Ok(HttpResponse {
            status,
            url,
            body,
            elapsed: started.elapsed(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> HttpClient {
        HttpClient::new(base, Events::new()).unwrap()
    }

    #[test]
    fn test_url_for_joins_paths() {
        let c = client("http://localhost:8080/");
        assert_eq!(c.url_for("/"), "http://localhost:8080/");
        assert_eq!(c.url_for("/api/items"), "http://localhost:8080/api/items");
        assert_eq!(c.url_for("api/items"), "http://localhost:8080/api/items");
    }

    #[test]
    fn test_url_for_passes_absolute_urls() {
        let c = client("http://localhost:8080");
        assert_eq!(c.url_for("https://example.com/x"), "https://example.com/x");
    }

    #[test]
    fn test_response_display() {
        let response = HttpResponse {
            status: 200,
            url: "http://localhost/".to_string(),
            body: String::new(),
            elapsed: Duration::ZERO,
        };
        assert_eq!(response.to_string(), "<Response [200]>");
        assert!(response.is_success());
    }
}
