// SPDX-FileCopyrightText: 2026 Giftbay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Lookup API server built on axum.

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;

use giftbay_core::{GiftbayError, RecordStore};

use crate::handlers;

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct ApiState {
    /// The record store; the API is its only reader besides the bot's own
    /// persistence path.
    pub store: Arc<dyn RecordStore>,
}

/// Server configuration (mirrors `ApiConfig` from `giftbay-config` to avoid
/// a dependency on the config crate).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host address to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
}

/// Builds the lookup router.
///
/// CORS is fully permissive: the web front-end is served from another
/// origin and the API is public read-only data.
pub fn router(state: ApiState) -> Router {
    Router::new()
        .route("/gifts/{slug}", get(handlers::get_gift))
        .route("/health", get(handlers::get_health))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Binds and serves the lookup API until the task is aborted.
pub async fn start_server(config: &ServerConfig, state: ApiState) -> Result<(), GiftbayError> {
    let app = router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| GiftbayError::Internal(format!("failed to bind lookup api to {addr}: {e}")))?;

    tracing::info!("lookup API listening on {addr}");

    axum::serve(listener, app)
        .await
        .map_err(|e| GiftbayError::Internal(format!("lookup api server error: {e}")))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_config_debug_shows_address() {
        let config = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8080,
        };
        let debug = format!("{config:?}");
        assert!(debug.contains("127.0.0.1"));
        assert!(debug.contains("8080"));
    }
}
