//! Router assembly: GraphQL proxy, dashboard page + JSON API, static files, CORS, and HTTP tracing.

use std::sync::Arc;

use axum::{
    routing::{any, get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::state::AppState;

pub mod http;
pub mod proxy;

/// Build the application router with:
/// - GraphQL proxy at `/api/leetcode` (method check done in the handler)
/// - dashboard page at `/` with form actions `/toggle` and `/refresh`
/// - JSON API under `/api/v1/...`
/// - static files (including `problems.json`) from the configured static dir
/// - CORS (allow any origin/method/headers)
/// - HTTP trace layer (per-request spans w/ method, path, status, latency)
pub fn build_router(state: Arc<AppState>) -> Router {
    let static_service = ServeDir::new(&state.config.static_dir);

    Router::new()
        // Same-origin GraphQL forward
        .route("/api/leetcode", any(proxy::graphql_proxy))
        // Dashboard page
        .route("/", get(http::page_index))
        .route("/toggle", post(http::page_toggle))
        .route("/refresh", post(http::page_refresh))
        // JSON API
        .route("/api/v1/health", get(http::http_health))
        .route("/api/v1/dashboard", get(http::http_get_dashboard))
        .route("/api/v1/toggle", post(http::http_post_toggle))
        .route("/api/v1/refresh", post(http::http_post_refresh))
        // State + CORS + HTTP tracing
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Static assets
        .fallback_service(static_service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    #[tokio::test]
    async fn serves_bundled_catalog() {
        let config = AppConfig {
            static_dir: concat!(env!("CARGO_MANIFEST_DIR"), "/static").into(),
            ..AppConfig::default()
        };
        let app = build_router(Arc::new(AppState::new(config)));
        let req = Request::builder().uri("/problems.json").body(Body::empty()).unwrap();

        let res = app.oneshot(req).await.unwrap();

        assert_eq!(res.status(), StatusCode::OK);
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let text = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(crate::domain::Catalog::from_json_str(&text).is_ok());
    }

    #[tokio::test]
    async fn health_is_ok() {
        let app = build_router(Arc::new(AppState::new(AppConfig::default())));
        let req = Request::builder().uri("/api/v1/health").body(Body::empty()).unwrap();
        let res = app.oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
    }
}
