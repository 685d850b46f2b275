//! Checkout endpoint.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use kasir_core::{CheckoutRequest, Transaction};

use crate::error::ApiError;
use crate::extract::JsonBody;
use crate::AppState;

/// POST /api/checkout: Sells every item or nothing.
#[tracing::instrument(skip(state, req), fields(items = req.items.len()))]
pub async fn create(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<CheckoutRequest>,
) -> Result<(StatusCode, Json<Transaction>), ApiError> {
    let transaction = state.db.transactions().checkout(&req.items).await?;
    Ok((StatusCode::CREATED, Json(transaction)))
}
