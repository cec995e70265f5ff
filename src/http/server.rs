//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the JSON endpoints and the shell fallback
//! - Wire up middleware (request ID, tracing, timeout, body limit)
//! - Render the host document for every other GET location
//! - Serve until the shutdown signal fires

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    limit::RequestBodyLimitLayer, set_header::SetResponseHeaderLayer, timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::app::{AppRoot, PageStatus, RenderedPage, RenderError};
use crate::config::schema::ServerConfig;
use crate::http::api;
use crate::http::request::{propagate_request_id_layer, request_id, set_request_id_layer};
use crate::lifecycle::Shutdown;
use crate::observability::metrics;
use crate::routing::Mode;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub root: Arc<AppRoot>,
}

/// HTTP server for the application shell.
pub struct ShellServer {
    router: Router,
    config: ServerConfig,
}

impl ShellServer {
    /// Create a server around a mounted application root.
    pub fn new(root: AppRoot, config: ServerConfig) -> Self {
        let state = AppState {
            root: Arc::new(root),
        };
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ServerConfig, state: AppState) -> Router {
        let prefix = &config.api_prefix;
        Router::new()
            .route(&format!("{}/ping", prefix), get(api::ping))
            .route(&format!("{}/routes", prefix), get(api::get_routes))
            .route(&format!("{}/status", prefix), get(api::get_status))
            .fallback(shell_handler)
            .with_state(state)
            .layer(SetResponseHeaderLayer::if_not_present(
                header::CACHE_CONTROL,
                HeaderValue::from_static("no-cache"),
            ))
            .layer(RequestBodyLimitLayer::new(config.max_body_bytes))
            .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout_secs)))
            .layer(TraceLayer::new_for_http())
            .layer(propagate_request_id_layer())
            .layer(set_request_id_layer())
    }

    /// The configured Axum router, for embedding or in-process tests.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "Shell server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(Shutdown::wait(shutdown))
            .await?;

        tracing::info!("Shell server stopped");
        Ok(())
    }
}

/// Render the host document for the requested location.
async fn shell_handler(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    let start = Instant::now();
    let request_id = request_id(&headers);

    if method != Method::GET && method != Method::HEAD {
        metrics::record_request(StatusCode::METHOD_NOT_ALLOWED.as_u16(), start);
        return (StatusCode::METHOD_NOT_ALLOWED, "Only GET is served here").into_response();
    }

    let location = uri.path_and_query().map(|pq| pq.as_str()).unwrap_or("/");
    let root = &state.root;

    let page = match root.router().mode() {
        Mode::History => root.render(location),
        // The fragment never reaches the server: only the document itself is served.
        Mode::Hash => match root.router().document_path(uri.path()) {
            Some("") | Some("/") => root.render(location),
            _ => root.render_not_found(location),
        },
    };

    let response = page_response(page);
    tracing::debug!(
        request_id = %request_id,
        location = %location,
        status = %response.status(),
        "Shell rendered"
    );
    metrics::record_request(response.status().as_u16(), start);
    response
}

fn page_response(page: Result<RenderedPage, RenderError>) -> Response {
    match page {
        Ok(page) => {
            let status = match page.status {
                PageStatus::Found => StatusCode::OK,
                PageStatus::NotFound => StatusCode::NOT_FOUND,
            };
            (
                status,
                [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
                page.html,
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Shell could not be rendered");
            (StatusCode::INTERNAL_SERVER_ERROR, "Shell could not be rendered").into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use tower::ServiceExt;

    use crate::app::Document;
    use crate::config::schema::ShellConfig;
    use crate::lifecycle::Bootstrapper;

    fn server(config: ShellConfig) -> ShellServer {
        let root = Bootstrapper::new(config.clone()).run(Document::builtin()).unwrap();
        ShellServer::new(root, config.server)
    }

    async fn get(router: Router, uri: &str) -> (StatusCode, HeaderMap, String) {
        let res = router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = res.status();
        let headers = res.headers().clone();
        let body = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        (status, headers, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_shell_found_and_not_found() {
        let app = server(ShellConfig::default()).router();

        let (status, headers, body) = get(app.clone(), "/flaredown").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("data-route=\"Flaredown\""));
        assert!(headers.contains_key("x-request-id"));
        assert_eq!(headers[header::CACHE_CONTROL], "no-cache");

        let (status, _, body) = get(app, "/nonexistent").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.contains("data-view=\"NotFound\""));
    }

    #[tokio::test]
    async fn test_network_path_is_not_home() {
        let app = server(ShellConfig::default()).router();

        let (status, _, body) = get(app.clone(), "//nonexistent").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(!body.contains("data-route=\"Home\""));

        let (status, _, _) = get(app, "/x/../ping").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_ping_endpoint() {
        let app = server(ShellConfig::default()).router();
        let (status, _, body) = get(app, "/api/ping").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "\"pong!\"");
    }

    #[tokio::test]
    async fn test_hash_mode_serves_document_only() {
        let mut config = ShellConfig::default();
        config.router.mode = Mode::Hash;
        config.router.base = "/viz".into();
        let app = server(config).router();

        let (status, _, body) = get(app.clone(), "/viz/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("data-route=\"Home\""));

        let (status, _, _) = get(app, "/viz/airport").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_post_is_rejected() {
        let app = server(ShellConfig::default()).router();
        let res = app
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/airport")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
