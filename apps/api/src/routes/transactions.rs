//! Ledger read endpoint.

use axum::extract::State;
use axum::Json;
use kasir_core::{CoreError, Transaction};

use crate::error::ApiError;
use crate::extract::IdPath;
use crate::AppState;

/// GET /api/transactions/{id}: A recorded sale with its line items.
pub async fn get(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<Json<Transaction>, ApiError> {
    let transaction = state
        .db
        .transactions()
        .get_by_id(id)
        .await?
        .ok_or(CoreError::TransactionNotFound(id))?;
    Ok(Json(transaction))
}
