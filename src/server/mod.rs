//! JSON API over both catalogs.

mod error;
mod handlers;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tokio::net::TcpListener;
use tower_http::catch_panic::CatchPanicLayer;

use crate::core::catalog::{ClientError, NanoGptClient, OpenRouterClient};
use crate::core::config::Config;

/// Clients shared by every request. The primary client's lookup cache lives
/// as long as this state.
pub struct AppState {
    pub nanogpt: NanoGptClient,
    pub openrouter: OpenRouterClient,
}

impl AppState {
    pub fn from_config(config: &Config) -> Result<Self, ClientError> {
        Ok(Self {
            nanogpt: NanoGptClient::from_config(config)?,
            openrouter: OpenRouterClient::from_config(config)?,
        })
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/models", get(handlers::list_models))
        .route("/api/models/{*id}", get(handlers::model_details))
        .route("/api/openrouter/models", get(handlers::list_openrouter_models))
        .route(
            "/api/openrouter/models/{*id}",
            get(handlers::openrouter_model_details),
        )
        .route("/test-endpoints", get(handlers::test_endpoints))
        .fallback(error::not_found)
        .layer(CatchPanicLayer::custom(error::panic_response))
        .with_state(state)
}

/// Bind and serve until Ctrl-C.
pub async fn serve(config: &Config, bind: SocketAddr) -> Result<(), Box<dyn std::error::Error>> {
    let state = Arc::new(AppState::from_config(config)?);
    let listener = TcpListener::bind(bind).await?;
    log::info!("Serving model API on http://{}", listener.local_addr()?);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    log::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::warn!("Failed to listen for shutdown signal: {}", e);
    }
}
