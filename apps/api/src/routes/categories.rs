//! Category endpoints.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use kasir_core::{Category, CategoryPatch, CoreError, NewCategory};

use super::NameFilter;
use crate::error::ApiError;
use crate::extract::{IdPath, JsonBody};
use crate::AppState;

/// GET /api/categories
pub async fn list(
    State(state): State<AppState>,
    Query(filter): Query<NameFilter>,
) -> Result<Json<Vec<Category>>, ApiError> {
    let categories = state.db.categories().list(filter.name.as_deref()).await?;
    Ok(Json(categories))
}

/// GET /api/categories/{id}
pub async fn get(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<Json<Category>, ApiError> {
    let category = state
        .db
        .categories()
        .get_by_id(id)
        .await?
        .ok_or(CoreError::CategoryNotFound(id))?;
    Ok(Json(category))
}

/// POST /api/categories
#[tracing::instrument(skip(state, input), fields(name = %input.name))]
pub async fn create(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<NewCategory>,
) -> Result<(StatusCode, Json<Category>), ApiError> {
    let category = state.db.categories().create(&input).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

/// PUT /api/categories/{id}
#[tracing::instrument(skip(state, patch))]
pub async fn update(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    JsonBody(patch): JsonBody<CategoryPatch>,
) -> Result<Json<Category>, ApiError> {
    let category = state.db.categories().update(id, &patch).await?;
    Ok(Json(category))
}

/// DELETE /api/categories/{id}
#[tracing::instrument(skip(state))]
pub async fn delete(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<StatusCode, ApiError> {
    state.db.categories().delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
