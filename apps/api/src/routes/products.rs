//! Product endpoints.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use kasir_core::{CoreError, NewProduct, Product, ProductPatch};

use super::NameFilter;
use crate::error::ApiError;
use crate::extract::{IdPath, JsonBody};
use crate::AppState;

/// GET /api/products: All products with their category, optionally filtered by name.
pub async fn list(
    State(state): State<AppState>,
    Query(filter): Query<NameFilter>,
) -> Result<Json<Vec<Product>>, ApiError> {
    let products = state.db.products().list(filter.name.as_deref()).await?;
    Ok(Json(products))
}

/// GET /api/products/{id}
pub async fn get(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<Json<Product>, ApiError> {
    let product = state
        .db
        .products()
        .get_by_id(id)
        .await?
        .ok_or(CoreError::ProductNotFound(id))?;
    Ok(Json(product))
}

/// POST /api/products
#[tracing::instrument(skip(state, input), fields(name = %input.name))]
pub async fn create(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<NewProduct>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    let product = state.db.products().create(&input).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// PUT /api/products/{id}: Applies only the fields present in the body.
#[tracing::instrument(skip(state, patch))]
pub async fn update(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    JsonBody(patch): JsonBody<ProductPatch>,
) -> Result<Json<Product>, ApiError> {
    let product = state.db.products().update(id, &patch).await?;
    Ok(Json(product))
}

/// DELETE /api/products/{id}
#[tracing::instrument(skip(state))]
pub async fn delete(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<StatusCode, ApiError> {
    state.db.products().delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
