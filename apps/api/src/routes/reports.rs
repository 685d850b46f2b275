//! Report endpoints.

use axum::extract::{Query, State};
use axum::Json;
use chrono::Local;
use kasir_core::{ReportWindow, SalesSummary};
use serde::Deserialize;

use crate::error::ApiError;
use crate::AppState;

/// `?start=YYYY-MM-DD&end=YYYY-MM-DD`; both bounds are needed to leave "today".
#[derive(Debug, Default, Deserialize)]
pub struct SummaryQuery {
    pub start: Option<String>,
    pub end: Option<String>,
}

/// GET /api/report/sales-summary
///
/// Dates are calendar days in the server's local timezone.
#[tracing::instrument(skip(state))]
pub async fn sales_summary(
    State(state): State<AppState>,
    Query(query): Query<SummaryQuery>,
) -> Result<Json<SalesSummary>, ApiError> {
    let window = ReportWindow::resolve(
        query.start.as_deref(),
        query.end.as_deref(),
        Local::now().date_naive(),
    )?;

    let summary = state
        .db
        .transactions()
        .sales_summary(&window.in_timezone(&Local))
        .await?;
    Ok(Json(summary))
}
