// SPDX-FileCopyrightText: 2026 Giftbay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the lookup API.
//!
//! Handles `GET /gifts/{slug}` and `GET /health`.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::error;

use crate::server::ApiState;

/// Response body for `GET /health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Health status string.
    pub status: String,
    /// Binary version.
    pub version: String,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error description.
    pub error: String,
}

/// GET /gifts/{slug}
///
/// Resolves a slug to its stored payload. 404 when the slug is unknown;
/// 500 only when the store itself fails.
pub async fn get_gift(State(state): State<ApiState>, Path(slug): Path<String>) -> Response {
    match state.store.get(&slug).await {
        Ok(Some(record)) => (StatusCode::OK, Json(record.payload)).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "gift not found".to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, slug = %slug, "gift lookup failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "storage unavailable".to_string(),
                }),
            )
                .into_response()
        }
    }
}

/// GET /health
///
/// Unconditional liveness marker.
pub async fn get_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
