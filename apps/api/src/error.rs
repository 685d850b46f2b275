//! # API Error Type
//!
//! Unified error type for HTTP handlers.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Kasir POS                              │
//! │                                                                         │
//! │  Handler: Result<T, ApiError>                                          │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Bad JSON / path?  ─── JsonRejection ─────────────┐  400 VALIDATION    │
//! │         │                                          │                    │
//! │         ▼                                          │                    │
//! │  Business rule?    ─── StoreError::Domain ────────┤  404 / 409 / 400   │
//! │         │                                          │  422 INSUFFICIENT  │
//! │         ▼                                          ▼                    │
//! │  Store unwell?     ─── StoreError::Db ───────── ApiError ──► JSON body │
//! │                         Busy            → 503                          │
//! │                         anything else   → 500 (logged, generic text)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Response Body
//! ```json
//! {
//!   "code": "INSUFFICIENT_STOCK",
//!   "message": "Insufficient stock for Kopi Susu: available 3, requested 5"
//! }
//! ```

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use kasir_core::{CoreError, ErrorKind};
use kasir_db::{DbError, StoreError};
use serde::Serialize;

/// API error returned from handlers.
#[derive(Debug, Clone, Serialize)]
pub struct ApiError {
    /// HTTP status, not part of the body
    #[serde(skip)]
    pub status: StatusCode,

    /// Machine-readable error code for programmatic handling
    pub code: ErrorKind,

    /// Human-readable error message for display
    pub message: String,
}

impl ApiError {
    /// Creates an error whose status follows from its kind.
    pub fn new(code: ErrorKind, message: impl Into<String>) -> Self {
        ApiError {
            status: status_for(code),
            code,
            message: message.into(),
        }
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorKind::Validation, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorKind::Infrastructure, message)
    }

    /// Creates a "try again later" error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        ApiError {
            status: StatusCode::SERVICE_UNAVAILABLE,
            code: ErrorKind::Infrastructure,
            message: message.into(),
        }
    }
}

fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Conflict => StatusCode::CONFLICT,
        ErrorKind::Validation => StatusCode::BAD_REQUEST,
        ErrorKind::InsufficientStock => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorKind::Infrastructure => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

/// Converts core errors to API errors.
///
/// Domain messages are safe to show as-is.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        ApiError::new(err.kind(), err.to_string())
    }
}

/// Converts database errors to API errors.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => {
                ApiError::new(ErrorKind::NotFound, format!("{} not found: {}", entity, id))
            }
            DbError::UniqueViolation { field, .. } => {
                ApiError::new(ErrorKind::Conflict, format!("{} already exists", field))
            }
            DbError::ForeignKeyViolation { message } => {
                tracing::warn!("Foreign key violation: {}", message);
                ApiError::new(ErrorKind::Conflict, "Record is referenced by other records")
            }
            DbError::Busy(e) => {
                tracing::warn!("Database busy: {}", e);
                ApiError::unavailable("Database is busy, please retry")
            }
            DbError::PoolExhausted => {
                tracing::warn!("Database pool exhausted");
                ApiError::unavailable("Database is busy, please retry")
            }
            DbError::ConnectionFailed(e) => {
                tracing::error!("Database connection failed: {}", e);
                ApiError::internal("Database connection failed")
            }
            DbError::MigrationFailed(e) => {
                tracing::error!("Database migration failed: {}", e);
                ApiError::internal("Database migration failed")
            }
            DbError::QueryFailed(e) => {
                // Log the actual error but return a generic message
                tracing::error!("Database query failed: {}", e);
                ApiError::internal("Database operation failed")
            }
            DbError::Internal(e) => {
                tracing::error!("Internal database error: {}", e);
                ApiError::internal("Database operation failed")
            }
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Domain(err) => err.into(),
            StoreError::Db(err) => err.into(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::validation(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::validation(rejection.body_text())
    }
}
