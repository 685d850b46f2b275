//! # Kasir API
//!
//! JSON/HTTP surface over the inventory, checkout and report operations.
//!
//! ## Routes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  GET    /health                          liveness + database reachable │
//! │                                                                         │
//! │  GET    /api/products?name=              list (category joined)        │
//! │  POST   /api/products                    create            → 201       │
//! │  GET    /api/products/{id}                                              │
//! │  PUT    /api/products/{id}               partial update                │
//! │  DELETE /api/products/{id}                                 → 204       │
//! │                                                                         │
//! │  GET    /api/categories?name=            same shape as products        │
//! │  POST   /api/categories                                    → 201       │
//! │  GET    /api/categories/{id}                                            │
//! │  PUT    /api/categories/{id}                                            │
//! │  DELETE /api/categories/{id}                               → 204       │
//! │                                                                         │
//! │  POST   /api/checkout                    atomic sale       → 201       │
//! │  GET    /api/transactions/{id}           ledger read                   │
//! │  GET    /api/report/sales-summary?start=&end=                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod extract;
pub mod routes;

use axum::routing::{get, post};
use axum::Router;
use kasir_db::Database;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Shared application state accessible from all handlers.
///
/// Cloning is cheap: `Database` wraps a pooled handle.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
}

impl AppState {
    pub fn new(db: Database) -> Self {
        AppState { db }
    }
}

/// Creates the Axum application router with all routes and shared state.
pub fn create_app(state: AppState) -> Router {
    let api = Router::new()
        .route(
            "/products",
            get(routes::products::list).post(routes::products::create),
        )
        .route(
            "/products/{id}",
            get(routes::products::get)
                .put(routes::products::update)
                .delete(routes::products::delete),
        )
        .route(
            "/categories",
            get(routes::categories::list).post(routes::categories::create),
        )
        .route(
            "/categories/{id}",
            get(routes::categories::get)
                .put(routes::categories::update)
                .delete(routes::categories::delete),
        )
        .route("/checkout", post(routes::checkout::create))
        .route("/transactions/{id}", get(routes::transactions::get))
        .route(
            "/report/sales-summary",
            get(routes::reports::sales_summary),
        );

    Router::new()
        .route("/health", get(routes::health::check))
        .nest("/api", api)
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}
