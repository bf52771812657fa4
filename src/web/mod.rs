// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! HTTP server for plugin routes.
//!
//! There is no dashboard: the server only mounts whatever routes the
//! configured plugins hand it.

use crate::observability::messages::web::WebServerListening;
use crate::observability::messages::StructuredLog;
use crate::traits::Plugin;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

/// Merge every plugin's routes into one router.
pub fn build_router(plugins: &[Arc<dyn Plugin>]) -> Router {
    plugins
        .iter()
        .filter_map(|plugin| plugin.routes())
        .fold(Router::new(), |router, routes| router.merge(routes))
}

pub async fn bind(addr: &str) -> std::io::Result<TcpListener> {
    TcpListener::bind(addr).await
}

/// Serve `router` until `shutdown` is cancelled.
pub async fn serve(
    listener: TcpListener,
    router: Router,
    shutdown: CancellationToken,
) -> std::io::Result<()> {
    WebServerListening {
        addr: listener.local_addr()?,
    }
    .log();
    axum::serve(listener, router)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
}

/// A `200 text/csv` response the browser saves as `file_name`.
pub fn csv_attachment(file_name: &str, body: String) -> Response {
    (
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment;filename={}", file_name),
            ),
        ],
        body,
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::routing::get;

    struct HelloPlugin;

    impl Plugin for HelloPlugin {
        fn name(&self) -> &'static str {
            "hello"
        }

        fn routes(&self) -> Option<Router> {
            Some(Router::new().route(
                "/hello.csv",
                get(|| async { csv_attachment("hello.csv", "a,b\n1,2".to_string()) }),
            ))
        }
    }

    struct SilentPlugin;

    impl Plugin for SilentPlugin {
        fn name(&self) -> &'static str {
            "silent"
        }
    }

    #[tokio::test]
    async fn test_serves_plugin_routes_until_shutdown() {
        let plugins: Vec<Arc<dyn Plugin>> = vec![Arc::new(SilentPlugin), Arc::new(HelloPlugin)];
        let listener = bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let shutdown = CancellationToken::new();
        let server = tokio::spawn(serve(listener, build_router(&plugins), shutdown.clone()));

        let response = reqwest::get(format!("http://{}/hello.csv", addr)).await.unwrap();
        assert_eq!(response.status().as_u16(), 200);
        assert_eq!(
            response.headers()[reqwest::header::CONTENT_TYPE].to_str().unwrap(),
            "text/csv"
        );
        assert_eq!(
            response.headers()[reqwest::header::CONTENT_DISPOSITION].to_str().unwrap(),
            "attachment;filename=hello.csv"
        );
        assert_eq!(response.text().await.unwrap(), "a,b\n1,2");

        let missing = reqwest::get(format!("http://{}/nope", addr)).await.unwrap();
        assert_eq!(missing.status().as_u16(), 404);

        shutdown.cancel();
        server.await.unwrap().unwrap();
    }
}
