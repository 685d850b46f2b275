//! # Domain Types
//!
//! Core domain types used throughout Kasir POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────────┐   │
//! │  │    Category     │◄──│    Product      │   │    Transaction      │   │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────────  │   │
//! │  │  id             │   │  id             │   │  id                 │   │
//! │  │  name           │   │  name           │   │  total_amount       │   │
//! │  │  description    │   │  price          │   │  created_at         │   │
//! │  └─────────────────┘   │  stock          │   │  details ──┐        │   │
//! │                        │  category_id    │   └────────────┼────────┘   │
//! │                        └─────────────────┘                ▼            │
//! │                                              ┌─────────────────────┐   │
//! │                                              │ TransactionDetail   │   │
//! │                                              │  product_name (snap)│   │
//! │                                              │  quantity, subtotal │   │
//! │                                              └─────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! Every entity is identified by a store-assigned integer id. Nothing in this
//! crate invents ids; rows that have not been persisted yet are represented
//! by the `New*` input types.
//!
//! ## Partial Updates
//! `ProductPatch` and `CategoryPatch` carry `Option` fields: only the fields
//! present in a request are applied. An explicit `0` is a value, not an
//! absence, and goes through the same validation as on create.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::validation::{
    validate_category_id, validate_category_name, validate_description, validate_price,
    validate_product_name, validate_stock,
};

// =============================================================================
// Category
// =============================================================================

/// A product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub description: String,
}

/// Input for creating a category.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewCategory {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl NewCategory {
    /// Validates the input and returns it with names trimmed.
    pub fn validated(&self) -> CoreResult<NewCategory> {
        Ok(NewCategory {
            name: validate_category_name(&self.name)?,
            description: validate_description(&self.description)?,
        })
    }
}

/// Partial update of a category.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CategoryPatch {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl CategoryPatch {
    /// Merges the present fields over `current`.
    ///
    /// ## Errors
    /// - `Validation` if a present field is invalid
    /// - `NoChanges` if the merged category equals `current`
    pub fn apply(&self, current: &Category) -> CoreResult<NewCategory> {
        let name = match &self.name {
            Some(name) => validate_category_name(name)?,
            None => current.name.clone(),
        };
        let description = match &self.description {
            Some(description) => validate_description(description)?,
            None => current.description.clone(),
        };

        if name == current.name && description == current.description {
            return Err(CoreError::no_changes("category"));
        }

        Ok(NewCategory { name, description })
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product available for sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    /// Store-assigned identifier.
    pub id: i64,

    /// Display name, copied into the ledger at sale time.
    pub name: String,

    /// Unit price in the smallest currency unit. Always positive.
    pub price: Money,

    /// Units on hand. Never negative.
    pub stock: i64,

    pub category_id: i64,

    /// The referenced category, joined on reads.
    pub category: Option<Category>,
}

impl Product {
    /// Checks if `quantity` units can be sold from current stock.
    #[inline]
    pub fn can_sell(&self, quantity: i64) -> bool {
        self.stock >= quantity
    }
}

/// Input for creating a product, and the fully-merged form of an update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewProduct {
    pub name: String,
    pub price: Money,
    pub stock: i64,
    pub category_id: i64,
}

impl NewProduct {
    /// Validates the input and returns it with the name trimmed.
    ///
    /// ## Rules
    /// - name: required, at most 200 characters
    /// - price: greater than zero
    /// - stock: not negative
    /// - category_id: positive (existence is checked by the store)
    pub fn validated(&self) -> CoreResult<NewProduct> {
        validate_price(self.price)?;
        validate_stock(self.stock)?;
        validate_category_id(self.category_id)?;
        Ok(NewProduct {
            name: validate_product_name(&self.name)?,
            price: self.price,
            stock: self.stock,
            category_id: self.category_id,
        })
    }
}

/// Partial update of a product.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub price: Option<Money>,
    pub stock: Option<i64>,
    pub category_id: Option<i64>,
}

impl ProductPatch {
    /// Merges the present fields over `current`.
    ///
    /// ## Errors
    /// - `Validation` if a present field is invalid
    /// - `NoChanges` if the merged product equals `current`
    pub fn apply(&self, current: &Product) -> CoreResult<NewProduct> {
        let name = match &self.name {
            Some(name) => validate_product_name(name)?,
            None => current.name.clone(),
        };
        let price = match self.price {
            Some(price) => {
                validate_price(price)?;
                price
            }
            None => current.price,
        };
        let stock = match self.stock {
            Some(stock) => {
                validate_stock(stock)?;
                stock
            }
            None => current.stock,
        };
        let category_id = match self.category_id {
            Some(category_id) => {
                validate_category_id(category_id)?;
                category_id
            }
            None => current.category_id,
        };

        let merged = NewProduct {
            name,
            price,
            stock,
            category_id,
        };

        if merged.name == current.name
            && merged.price == current.price
            && merged.stock == current.stock
            && merged.category_id == current.category_id
        {
            return Err(CoreError::no_changes("product"));
        }

        Ok(merged)
    }
}

// =============================================================================
// Transaction (ledger)
// =============================================================================

/// A completed sale as recorded in the ledger.
///
/// Created exactly once per successful checkout and never modified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Transaction {
    pub id: i64,
    /// Sum of the detail subtotals.
    pub total_amount: Money,
    /// Assigned by the store when the row is inserted.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    /// Line items in checkout input order.
    pub details: Vec<TransactionDetail>,
}

/// A line item of a transaction.
/// Uses snapshot pattern to freeze the product name at time of sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct TransactionDetail {
    pub id: i64,
    pub transaction_id: i64,
    pub product_id: i64,
    /// Product name at time of sale (frozen).
    pub product_name: String,
    pub quantity: i64,
    /// `price × quantity` at time of sale.
    pub subtotal: Money,
}

// =============================================================================
// Unit Tests
// =============================================================================
