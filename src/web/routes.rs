//! HTTP routes for the dashboards
//!
//! Provides JSON API endpoints and static file serving.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use rust_embed::RustEmbed;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dashboard::{DashboardKind, DashboardLayout, update_dashboard};

use super::server::AppState;

/// Embedded static assets
#[derive(RustEmbed)]
#[folder = "web-assets/"]
struct Assets;

/// Query parameters for the dashboard callback
#[derive(Deserialize)]
struct DashboardQuery {
    value: Option<String>,
}

/// Row counts of the loaded tables
#[derive(Serialize)]
struct DatasetsInfo {
    occurrences: usize,
    recommendations: usize,
    factors: usize,
    unmapped_occurrences: usize,
}

/// Create API routes
pub fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/layout", get(get_layout))
        .route("/api/dashboard", get(get_dashboard))
        .route("/api/datasets", get(get_datasets))
        .route("/api/health", get(health_check))
}

/// Create static file routes
pub fn static_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(index_html))
        .route("/{*path}", get(static_handler))
}

/// GET /api/layout - Page heading and dropdown options
async fn get_layout() -> Json<DashboardLayout> {
    Json(DashboardLayout::default())
}

/// GET /api/dashboard?value=... - The two charts for a selection
async fn get_dashboard(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DashboardQuery>,
) -> Response {
    let kind = match query.value.as_deref() {
        None | Some("") => DashboardKind::default(),
        Some(value) => match value.parse::<DashboardKind>() {
            Ok(kind) => kind,
            Err(e) => {
                return (
                    StatusCode::NOT_FOUND,
                    Json(serde_json::json!({"error": e.to_string()})),
                )
                    .into_response();
            }
        },
    };

    debug!(dashboard = %kind, "building dashboard");
    Json(update_dashboard(kind, &state.datasets, &state.map)).into_response()
}

/// GET /api/datasets - Loaded row counts
async fn get_datasets(State(state): State<Arc<AppState>>) -> Json<DatasetsInfo> {
    let datasets = &state.datasets;
    Json(DatasetsInfo {
        occurrences: datasets.occurrences.len(),
        recommendations: datasets.recommendations.len(),
        factors: datasets.factors.len(),
        unmapped_occurrences: datasets.unmapped_occurrences(),
    })
}

/// GET /api/health - Health check endpoint
async fn health_check() -> &'static str {
    "ok"
}

/// GET / - Serve index.html
async fn index_html() -> Response {
    match Assets::get("index.html") {
        Some(content) => Html(content.data.into_owned()).into_response(),
        None => (StatusCode::NOT_FOUND, "index.html not found").into_response(),
    }
}

/// Static file handler for embedded assets
async fn static_handler(axum::extract::Path(path): axum::extract::Path<String>) -> Response {
    let path = path.trim_start_matches('/');

    match Assets::get(path) {
        Some(content) => {
            let mime = mime_guess::from_path(path).first_or_octet_stream();
            (
                [(header::CONTENT_TYPE, mime.as_ref().to_string())],
                content.data.into_owned(),
            )
                .into_response()
        }
        None => (StatusCode::NOT_FOUND, format!("File not found: {}", path)).into_response(),
    }
}
