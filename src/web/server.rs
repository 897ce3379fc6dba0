//! Web server for the dashboards
//!
//! Provides an HTTP server using Axum to serve the frontend
//! and JSON API endpoints.

use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::config::MapSettings;
use crate::dataset::Datasets;

use super::routes;

/// Shared application state (read-only after startup)
pub struct AppState {
    pub datasets: Datasets,
    pub map: MapSettings,
}

/// Configuration for the web server
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub open_browser: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8050,
            open_browser: true,
        }
    }
}

/// Build the application router
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(routes::api_routes())
        .merge(routes::static_routes())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the web server and serve the dashboards until Ctrl+C
pub async fn start_server(
    datasets: Datasets,
    map: MapSettings,
    config: ServerConfig,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let state = Arc::new(AppState { datasets, map });

    let listener = TcpListener::bind((config.host.as_str(), config.port)).await?;

    let url = format!("http://{}", listener.local_addr()?);
    info!("Serving dashboards at {}", url);

    if config.open_browser {
        if let Err(e) = open::that(&url) {
            warn!("Could not open browser: {}", e);
            warn!("Please open {} manually", url);
        }
    }

    info!("Press Ctrl+C to stop the server");

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Could not listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
}
