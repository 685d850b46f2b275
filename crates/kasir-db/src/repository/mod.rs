//! # Repository Module
//!
//! Database repository implementations for Kasir POS.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  HTTP handler                                                          │
//! │       │                                                                 │
//! │       │  db.transactions().checkout(&items)                            │
//! │       ▼                                                                 │
//! │  TransactionRepository                                                 │
//! │  ├── checkout(&self, items)      one SQLite transaction                │
//! │  ├── get_by_id(&self, id)                                              │
//! │  └── sales_summary(&self, window)                                      │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`ProductRepository`](product::ProductRepository) - Product CRUD
//! - [`CategoryRepository`](category::CategoryRepository) - Category CRUD
//! - [`TransactionRepository`](transaction::TransactionRepository) - Checkout,
//!   ledger reads and the sales summary
//!
//! Repositories that enforce business rules return
//! [`StoreResult`](crate::error::StoreResult); plain reads return
//! [`DbResult`](crate::error::DbResult) with `Option` for "no such row".

pub mod category;
pub mod product;
pub mod transaction;

/// Builds a `LIKE` pattern matching `filter` anywhere in the column.
///
/// `%`, `_` and `\` in the filter match literally; queries must declare
/// `ESCAPE '\'`. SQLite's `LIKE` is case-insensitive for ASCII.
pub(crate) fn contains_pattern(filter: &str) -> String {
    let mut pattern = String::with_capacity(filter.len() + 2);
    pattern.push('%');
    for c in filter.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
