//! # Transaction Repository
//!
//! The sales ledger: checkout, ledger reads and the sales summary.
//!
//! ## Checkout Unit of Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    checkout(items)                                      │
//! │                                                                         │
//! │  validate_items()          empty list → rejected, store untouched      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  BEGIN                                                                  │
//! │  ├── for each item, in input order:                                    │
//! │  │     CheckoutItem::validate()       qty <= 0 → Validation            │
//! │  │     SELECT name, price, stock      missing  → ProductNotFound       │
//! │  │     StockLevel::reserve()          short    → InsufficientStock     │
//! │  │     UPDATE stock = stock - qty                                      │
//! │  │        WHERE stock >= qty          0 rows   → InsufficientStock     │
//! │  ├── INSERT transactions  RETURNING id, created_at                     │
//! │  ├── INSERT transaction_details (name snapshot) × N                    │
//! │  └── COMMIT                                                            │
//! │                                                                         │
//! │  Any `?` before COMMIT drops the sqlx::Transaction → ROLLBACK.          │
//! │  The store never shows a half-applied sale.                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Timestamps
//! `created_at` comes from the column default (`CURRENT_TIMESTAMP`, UTC
//! text). Report bounds are bound in the same text format so the range
//! filter compares like with like.

use chrono::NaiveDateTime;
use sqlx::{FromRow, SqlitePool};
use tracing::{debug, error, info, warn};

use crate::error::{DbResult, StoreError, StoreResult};
use kasir_core::checkout::{sale_total, validate_items, SaleLine};
use kasir_core::{
    BestSeller, CheckoutItem, CoreError, Money, SalesSummary, StockLevel, Transaction,
    TransactionDetail, UtcWindow,
};

/// Text layout of `transactions.created_at`.
pub const LEDGER_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, FromRow)]
struct TransactionRow {
    id: i64,
    total_amount: Money,
    created_at: NaiveDateTime,
}

#[derive(Debug, FromRow)]
struct BestSellerRow {
    name: String,
    sold: i64,
}

/// Repository for the sales ledger.
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    pool: SqlitePool,
}

impl TransactionRepository {
    /// Creates a new TransactionRepository.
    pub fn new(pool: SqlitePool) -> Self {
        TransactionRepository { pool }
    }

    /// Sells `items` atomically.
    ///
    /// Either every item's stock is decremented and one transaction with
    /// one detail per item is recorded, or nothing changes.
    ///
    /// Items are checked in input order and the first failing item decides
    /// the error. Repeated product ids are read after the earlier decrement,
    /// so their combined quantity is checked against real stock.
    ///
    /// ## Errors
    /// - `Validation` for an empty list or a non-positive quantity
    /// - `ProductNotFound` for an unknown product id
    /// - `InsufficientStock` naming the first item that can't be covered
    /// - `DbError::Busy` if another writer holds the lock past the busy timeout
    pub async fn checkout(&self, items: &[CheckoutItem]) -> StoreResult<Transaction> {
        validate_items(items)?;

        debug!(items = items.len(), "Starting checkout");

        let result = self.checkout_in_transaction(items).await;

        match &result {
            Ok(transaction) => info!(
                transaction_id = transaction.id,
                total = %transaction.total_amount,
                lines = transaction.details.len(),
                "Checkout committed"
            ),
            Err(StoreError::Domain(err)) => warn!(error = %err, "Checkout rejected"),
            Err(StoreError::Db(err)) => error!(error = %err, "Checkout failed"),
        }

        result
    }

    async fn checkout_in_transaction(&self, items: &[CheckoutItem]) -> StoreResult<Transaction> {
        let mut tx = self.pool.begin().await?;

        let mut lines: Vec<SaleLine> = Vec::with_capacity(items.len());

        for item in items {
            item.validate()?;

            let level: StockLevel = sqlx::query_as(
                "SELECT id, name, price, stock FROM products WHERE id = ?1",
            )
            .bind(item.product_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(CoreError::ProductNotFound(item.product_id))?;

            let line = level.reserve(item.quantity)?;

            let decremented = sqlx::query(
                "UPDATE products SET stock = stock - ?1 WHERE id = ?2 AND stock >= ?3",
            )
            .bind(item.quantity)
            .bind(item.product_id)
            .bind(item.quantity)
            .execute(&mut *tx)
            .await?;

            if decremented.rows_affected() == 0 {
                return Err(CoreError::InsufficientStock {
                    product: level.name,
                    available: level.stock,
                    requested: item.quantity,
                }
                .into());
            }

            lines.push(line);
        }

        let total_amount = sale_total(&lines)?;

        let header: TransactionRow = sqlx::query_as(
            r#"
            INSERT INTO transactions (total_amount)
            VALUES (?1)
            RETURNING id, total_amount, created_at
            "#,
        )
        .bind(total_amount)
        .fetch_one(&mut *tx)
        .await?;

        let mut details = Vec::with_capacity(lines.len());
        for line in lines {
            let detail_id: i64 = sqlx::query_scalar(
                r#"
                INSERT INTO transaction_details
                    (transaction_id, product_id, product_name, quantity, subtotal)
                VALUES (?1, ?2, ?3, ?4, ?5)
                RETURNING id
                "#,
            )
            .bind(header.id)
            .bind(line.product_id)
            .bind(&line.product_name)
            .bind(line.quantity)
            .bind(line.subtotal)
            .fetch_one(&mut *tx)
            .await?;

            details.push(TransactionDetail {
                id: detail_id,
                transaction_id: header.id,
                product_id: line.product_id,
                product_name: line.product_name,
                quantity: line.quantity,
                subtotal: line.subtotal,
            });
        }

        tx.commit().await?;

        Ok(Transaction {
            id: header.id,
            total_amount: header.total_amount,
            created_at: header.created_at.and_utc(),
            details,
        })
    }

    /// Gets a transaction with its details in insertion order.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Transaction>> {
        debug!(id, "Fetching transaction");

        let header: Option<TransactionRow> = sqlx::query_as(
            "SELECT id, total_amount, created_at FROM transactions WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(header) = header else {
            return Ok(None);
        };

        let details: Vec<TransactionDetail> = sqlx::query_as(
            r#"
            SELECT id, transaction_id, product_id, product_name, quantity, subtotal
            FROM transaction_details
            WHERE transaction_id = ?1
            ORDER BY id
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(Transaction {
            id: header.id,
            total_amount: header.total_amount,
            created_at: header.created_at.and_utc(),
            details,
        }))
    }

    /// Summarizes sales whose `created_at` lies in `window` (inclusive).
    ///
    /// Both aggregates are read from one snapshot. The best seller is the
    /// product with the largest summed quantity; ties go to the lowest
    /// product id. Its name is the product's current name; sold products
    /// can't be deleted, so the row is always there.
    pub async fn sales_summary(&self, window: &UtcWindow) -> DbResult<SalesSummary> {
        let start = window.start.format(LEDGER_TIMESTAMP_FORMAT).to_string();
        let end = window.end.format(LEDGER_TIMESTAMP_FORMAT).to_string();

        debug!(start = %start, end = %end, "Computing sales summary");

        let mut tx = self.pool.begin().await?;

        let (total_revenue, total_transaction): (Money, i64) = sqlx::query_as(
            r#"
            SELECT COALESCE(SUM(total_amount), 0), COUNT(*)
            FROM transactions
            WHERE created_at >= ?1 AND created_at <= ?2
            "#,
        )
        .bind(&start)
        .bind(&end)
        .fetch_one(&mut *tx)
        .await?;

        let best: Option<BestSellerRow> = sqlx::query_as(
            r#"
            SELECT p.name AS name, SUM(td.quantity) AS sold
            FROM transaction_details td
            JOIN transactions t ON t.id = td.transaction_id
            JOIN products p ON p.id = td.product_id
            WHERE t.created_at >= ?1 AND t.created_at <= ?2
            GROUP BY td.product_id
            ORDER BY sold DESC, td.product_id ASC
            LIMIT 1
            "#,
        )
        .bind(&start)
        .bind(&end)
        .fetch_optional(&mut *tx)
        .await?;

        tx.commit().await?;

        let best_seller = best
            .map(|row| BestSeller {
                name: row.name,
                sold: row.sold,
            })
            .unwrap_or_else(BestSeller::none);

        Ok(SalesSummary {
            total_revenue,
            total_transaction,
            best_seller,
        })
    }
}
