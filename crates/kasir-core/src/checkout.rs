//! # Checkout Module
//!
//! Pure rules of a checkout: what a valid request looks like and how a
//! line item is priced. The store-side unit of work lives in `kasir-db`
//! and calls into this module for every decision that needs no I/O.
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Checkout Flow                                   │
//! │                                                                         │
//! │  [CheckoutItem]  ──► validate_items()          (here, before any I/O)  │
//! │        │                                                                │
//! │        ▼  BEGIN                                                         │
//! │  for each item:                                                         │
//! │     CheckoutItem::validate()                   (here)                  │
//! │     read StockLevel ──► StockLevel::reserve()  (here)                  │
//! │        │                    │                                           │
//! │        │                    └─► SaleLine { subtotal = price × qty }     │
//! │        ▼                                                                │
//! │     guarded stock decrement                    (kasir-db)               │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  sale_total(lines) ──► insert transaction + details ──► COMMIT         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::validation::validate_quantity;

// =============================================================================
// Request Types
// =============================================================================

/// One line of a checkout request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CheckoutItem {
    pub product_id: i64,
    pub quantity: i64,
}

impl CheckoutItem {
    pub fn new(product_id: i64, quantity: i64) -> Self {
        CheckoutItem {
            product_id,
            quantity,
        }
    }

    /// Quantity must be greater than zero.
    pub fn validate(&self) -> CoreResult<()> {
        validate_quantity(self.quantity)?;
        Ok(())
    }
}

/// Body of `POST /api/checkout`.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CheckoutRequest {
    pub items: Vec<CheckoutItem>,
}

/// Rejects a checkout with nothing to sell before the store is touched.
///
/// Per-item rules are checked in input order by [`CheckoutItem::validate`],
/// next to the stock reads, so the first failing item decides the error.
/// Repeated product ids are allowed; the store validates their combined
/// quantity against real stock.
pub fn validate_items(items: &[CheckoutItem]) -> CoreResult<()> {
    if items.is_empty() {
        return Err(ValidationError::Required {
            field: "items".to_string(),
        }
        .into());
    }

    Ok(())
}

// =============================================================================
// Stock Level
// =============================================================================

/// The part of a product row a checkout reads inside its unit of work.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct StockLevel {
    #[cfg_attr(feature = "sqlx", sqlx(rename = "id"))]
    pub product_id: i64,
    pub name: String,
    pub price: Money,
    pub stock: i64,
}

impl StockLevel {
    #[inline]
    pub fn can_sell(&self, quantity: i64) -> bool {
        self.stock >= quantity
    }

    /// Checks availability and prices `quantity` units.
    ///
    /// ## Errors
    /// - `InsufficientStock` if `stock < quantity`
    /// - `Validation` if the subtotal overflows
    pub fn reserve(&self, quantity: i64) -> CoreResult<SaleLine> {
        if !self.can_sell(quantity) {
            return Err(CoreError::InsufficientStock {
                product: self.name.clone(),
                available: self.stock,
                requested: quantity,
            });
        }

        SaleLine::price(self.product_id, self.name.as_str(), self.price, quantity)
    }
}

// =============================================================================
// Sale Line
// =============================================================================

/// A priced line item, ready to be written to the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaleLine {
    pub product_id: i64,
    /// Snapshot of the product name at sale time.
    pub product_name: String,
    pub unit_price: Money,
    pub quantity: i64,
    pub subtotal: Money,
}

impl SaleLine {
    /// Prices a line: `subtotal = unit_price × quantity`.
    pub fn price(
        product_id: i64,
        product_name: impl Into<String>,
        unit_price: Money,
        quantity: i64,
    ) -> CoreResult<SaleLine> {
        validate_quantity(quantity)?;

        let subtotal = unit_price
            .checked_mul_quantity(quantity)
            .ok_or_else(|| ValidationError::InvalidFormat {
                field: "quantity".to_string(),
                reason: "subtotal exceeds the supported amount".to_string(),
            })?;

        Ok(SaleLine {
            product_id,
            product_name: product_name.into(),
            unit_price,
            quantity,
            subtotal,
        })
    }
}

/// Sums line subtotals into the transaction total.
pub fn sale_total(lines: &[SaleLine]) -> CoreResult<Money> {
    lines.iter().try_fold(Money::zero(), |total, line| {
        total.checked_add(line.subtotal).ok_or_else(|| {
            ValidationError::InvalidFormat {
                field: "items".to_string(),
                reason: "total exceeds the supported amount".to_string(),
            }
            .into()
        })
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
