use axum::{Json, Router, routing::get};
use serde::Serialize;
use std::path::Path;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

#[derive(Debug, Serialize)]
struct HealthResponse {
    service: &'static str,
    status: &'static str,
}

/// `/health` plus the web directory served as static files at `/`.
pub fn app(web_dir: &Path) -> Router {
    let site = ServeDir::new(web_dir).append_index_html_on_directories(true);

    Router::new()
        .route("/health", get(health))
        .fallback_service(site)
        .layer(TraceLayer::new_for_http())
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        service: "handy-web",
        status: "ok",
    })
}
