//! # kasir-core: Pure Business Logic for Kasir POS
//!
//! This crate is the **heart** of Kasir POS. It contains the business rules
//! of the checkout and reporting paths as pure functions with zero I/O
//! dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Kasir POS Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    HTTP API (axum)                              │   │
//! │  │    /api/products, /api/checkout, /api/report/sales-summary     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ kasir-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │ checkout  │  │  report   │  │   │
//! │  │   │  Product  │  │   Money   │  │ SaleLine  │  │  Window   │  │   │
//! │  │   │Transaction│  │           │  │ StockLevel│  │  Summary  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • NO CLOCK READS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    kasir-db (Database Layer)                    │   │
//! │  │      SQLite queries, migrations, checkout unit of work          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Category, Transaction, etc.)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`checkout`] - Checkout input validation and line math
//! - [`report`] - Sales report window resolution and summary types
//! - [`error`] - Domain error types and stable error kinds
//! - [`validation`] - Field-level validation rules
//!
//! ## Example Usage
//!
//! ```rust
//! use kasir_core::checkout::SaleLine;
//! use kasir_core::money::Money;
//!
//! let line = SaleLine::price(7, "Kopi Susu", Money::from_minor(3500), 2).unwrap();
//! assert_eq!(line.subtotal.minor(), 7000);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod checkout;
pub mod error;
pub mod money;
pub mod report;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use checkout::{CheckoutItem, CheckoutRequest, SaleLine, StockLevel};
pub use error::{CoreError, CoreResult, ErrorKind, ValidationError};
pub use money::Money;
pub use report::{BestSeller, ReportWindow, SalesSummary, UtcWindow};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length of product and category names.
pub const MAX_NAME_LEN: usize = 200;

/// Maximum length of a category description.
pub const MAX_DESCRIPTION_LEN: usize = 1000;

