//! HTTP surface for due-diligence reports
//!
//! Routes:
//! - `GET|POST /due_diligence/:ticker` - full pipeline, merged report as `{"DD": {...}}`
//! - `GET /health` - liveness check

mod dto;
mod error;
mod handlers;
mod state;

pub use dto::{DueDiligenceResponse, HealthResponse};
pub use error::ApiError;
pub use state::AppState;

use axum::{Router, routing::get};
use dd_utils::{env_or, env_parse};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Build the application router
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/due_diligence/:ticker",
            get(handlers::due_diligence).post(handlers::due_diligence),
        )
        .route("/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 8000,
        }
    }
}

impl ServerConfig {
    /// Create config from `DD_SERVER_HOST` and `DD_SERVER_PORT`
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: env_or("DD_SERVER_HOST", &defaults.host),
            port: env_parse("DD_SERVER_PORT", defaults.port),
        }
    }

    /// Get bind address
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Bind and serve until the process is stopped
pub async fn serve(config: &ServerConfig, state: Arc<AppState>) -> std::io::Result<()> {
    let listener = TcpListener::bind(config.bind_addr()).await?;
    tracing::info!("Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router(state)).await
}
