//! Health check endpoint.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    /// Whether the store answered a trivial query.
    pub database: bool,
}

/// GET /health: Process liveness plus database reachability.
pub async fn check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        database: state.db.health_check().await,
    })
}
