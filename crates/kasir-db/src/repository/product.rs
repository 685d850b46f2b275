//! # Product Repository
//!
//! Database operations for products.
//!
//! ## Key Operations
//! - List / get with the category joined in
//! - Create with duplicate detection (name + price + category)
//! - Partial update
//! - Delete, refused while the ledger still references the product
//!
//! Stock is only ever *decremented* by checkout
//! ([`TransactionRepository`](super::transaction::TransactionRepository));
//! this repository sets it outright on create and update.

use sqlx::{FromRow, SqliteExecutor, SqlitePool};
use tracing::{debug, warn};

use super::category::find_category;
use super::contains_pattern;
use crate::error::{DbError, DbResult, StoreResult};
use kasir_core::validation::validate_name_filter;
use kasir_core::{Category, CoreError, Money, NewProduct, Product, ProductPatch};

/// Columns shared by every product read.
const PRODUCT_SELECT: &str = r#"
    SELECT
        p.id,
        p.name,
        p.price,
        p.stock,
        p.category_id,
        c.name AS category_name,
        c.description AS category_description
    FROM products p
    LEFT JOIN categories c ON c.id = p.category_id
"#;

/// A product row joined with its category.
#[derive(Debug, FromRow)]
struct ProductRow {
    id: i64,
    name: String,
    price: Money,
    stock: i64,
    category_id: i64,
    category_name: Option<String>,
    category_description: Option<String>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        let category = row.category_name.map(|name| Category {
            id: row.category_id,
            name,
            description: row.category_description.unwrap_or_default(),
        });

        Product {
            id: row.id,
            name: row.name,
            price: row.price,
            stock: row.stock,
            category_id: row.category_id,
            category,
        }
    }
}

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(pool);
///
/// let kopi = repo.get_by_id(7).await?;
/// let drinks = repo.list(Some("kopi")).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Lists products ordered by id, optionally filtered by a
    /// case-insensitive substring of the name.
    pub async fn list(&self, name: Option<&str>) -> StoreResult<Vec<Product>> {
        let filter = validate_name_filter(name)?;

        debug!(filter = ?filter, "Listing products");

        let rows = match filter {
            Some(filter) => {
                let sql = format!("{PRODUCT_SELECT} WHERE p.name LIKE ?1 ESCAPE '\\' ORDER BY p.id");
                sqlx::query_as::<_, ProductRow>(&sql)
                    .bind(contains_pattern(&filter))
                    .fetch_all(&self.pool)
                    .await?
            }
            None => {
                let sql = format!("{PRODUCT_SELECT} ORDER BY p.id");
                sqlx::query_as::<_, ProductRow>(&sql)
                    .fetch_all(&self.pool)
                    .await?
            }
        };

        debug!(count = rows.len(), "Listed products");
        Ok(rows.into_iter().map(Product::from).collect())
    }

    /// Gets a product by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Product>> {
        find_product(&self.pool, id).await
    }

    /// Counts all products.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Creates a product.
    ///
    /// ## What This Does
    /// 1. Validates the input (name, price > 0, stock >= 0)
    /// 2. Inside one transaction: checks the category exists, checks for a
    ///    duplicate, inserts
    ///
    /// ## Errors
    /// - `Validation` for invalid fields
    /// - `CategoryNotFound` if `category_id` doesn't exist
    /// - `Duplicate` if a product with the same name, price and category exists
    pub async fn create(&self, input: &NewProduct) -> StoreResult<Product> {
        let input = input.validated()?;

        debug!(name = %input.name, price = %input.price, "Creating product");

        let mut tx = self.pool.begin().await?;

        let category = find_category(&mut *tx, input.category_id)
            .await?
            .ok_or(CoreError::CategoryNotFound(input.category_id))?;

        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM products
                WHERE name = ?1 AND price = ?2 AND category_id = ?3
            )
            "#,
        )
        .bind(&input.name)
        .bind(input.price)
        .bind(input.category_id)
        .fetch_one(&mut *tx)
        .await?;

        if exists {
            warn!(name = %input.name, "Duplicate product rejected");
            return Err(CoreError::duplicate("product", "name, price, and category").into());
        }

        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO products (name, price, stock, category_id)
            VALUES (?1, ?2, ?3, ?4)
            RETURNING id
            "#,
        )
        .bind(&input.name)
        .bind(input.price)
        .bind(input.stock)
        .bind(input.category_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Product {
            id,
            name: input.name,
            price: input.price,
            stock: input.stock,
            category_id: input.category_id,
            category: Some(category),
        })
    }

    /// Applies a partial update.
    ///
    /// Only fields present in `patch` change. An explicit `stock: 0` is
    /// applied; an explicit `price: 0` is rejected.
    ///
    /// ## Errors
    /// - `ProductNotFound` if `id` doesn't exist
    /// - `Validation` for invalid present fields
    /// - `CategoryNotFound` if the new `category_id` doesn't exist
    /// - `NoChanges` if nothing would change
    pub async fn update(&self, id: i64, patch: &ProductPatch) -> StoreResult<Product> {
        debug!(id, "Updating product");

        let mut tx = self.pool.begin().await?;

        let current = find_product(&mut *tx, id)
            .await?
            .ok_or(CoreError::ProductNotFound(id))?;

        let merged = patch.apply(&current)?;

        let category = find_category(&mut *tx, merged.category_id)
            .await?
            .ok_or(CoreError::CategoryNotFound(merged.category_id))?;

        sqlx::query(
            r#"
            UPDATE products SET
                name = ?1,
                price = ?2,
                stock = ?3,
                category_id = ?4
            WHERE id = ?5
            "#,
        )
        .bind(&merged.name)
        .bind(merged.price)
        .bind(merged.stock)
        .bind(merged.category_id)
        .bind(id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Product {
            id,
            name: merged.name,
            price: merged.price,
            stock: merged.stock,
            category_id: merged.category_id,
            category: Some(category),
        })
    }

    /// Deletes a product.
    ///
    /// ## Errors
    /// - `ProductNotFound` if `id` doesn't exist
    /// - `InUse` if the ledger references it
    pub async fn delete(&self, id: i64) -> StoreResult<()> {
        debug!(id, "Deleting product");

        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(DbError::from);

        match result {
            Ok(done) if done.rows_affected() == 0 => Err(CoreError::ProductNotFound(id).into()),
            Ok(_) => Ok(()),
            Err(DbError::ForeignKeyViolation { .. }) => {
                warn!(id, "Product has sales history, delete refused");
                Err(CoreError::InUse {
                    entity: "product".to_string(),
                    id,
                    referenced_by: "transactions".to_string(),
                }
                .into())
            }
            Err(err) => Err(err.into()),
        }
    }
}

/// Looks up a product (with category) on any executor.
async fn find_product<'e, E>(executor: E, id: i64) -> DbResult<Option<Product>>
where
    E: SqliteExecutor<'e>,
{
    let sql = format!("{PRODUCT_SELECT} WHERE p.id = ?1");
    let row = sqlx::query_as::<_, ProductRow>(&sql)
        .bind(id)
        .fetch_optional(executor)
        .await?;

    Ok(row.map(Product::from))
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::error::StoreError;
    use crate::{Database, DbConfig};
    use kasir_core::{
        CoreError, ErrorKind, Money, NewCategory, NewProduct, ProductPatch, ValidationError,
    };

    async fn setup() -> (Database, i64) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let category = db
            .categories()
            .create(&NewCategory {
                name: "Minuman".to_string(),
                description: String::new(),
            })
            .await
            .unwrap();
        (db, category.id)
    }

    fn kopi(category_id: i64) -> NewProduct {
        NewProduct {
            name: "Kopi Susu".to_string(),
            price: Money::from_minor(3500),
            stock: 10,
            category_id,
        }
    }

    #[tokio::test]
    async fn test_create_joins_category() {
        let (db, category_id) = setup().await;
        let product = db.products().create(&kopi(category_id)).await.unwrap();

        assert!(product.id > 0);
        assert_eq!(product.category.as_ref().unwrap().name, "Minuman");

        let fetched = db.products().get_by_id(product.id).await.unwrap().unwrap();
        assert_eq!(fetched, product);
        assert_eq!(db.products().count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_input() {
        let (db, category_id) = setup().await;

        let free = NewProduct {
            price: Money::zero(),
            ..kopi(category_id)
        };
        let err = db.products().create(&free).await.unwrap_err();
        assert!(matches!(
            err,
            StoreError::Domain(CoreError::Validation(ValidationError::MustBePositive { .. }))
        ));

        let negative = NewProduct {
            stock: -1,
            ..kopi(category_id)
        };
        assert_eq!(
            db.products().create(&negative).await.unwrap_err().kind(),
            ErrorKind::Validation
        );

        let orphan = kopi(category_id + 100);
        let err = db.products().create(&orphan).await.unwrap_err();
        assert!(matches!(err, StoreError::Domain(CoreError::CategoryNotFound(_))));

        assert_eq!(db.products().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_duplicate_is_conflict() {
        let (db, category_id) = setup().await;
        db.products().create(&kopi(category_id)).await.unwrap();

        let err = db.products().create(&kopi(category_id)).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);

        let pricier = NewProduct {
            price: Money::from_minor(4000),
            ..kopi(category_id)
        };
        assert!(db.products().create(&pricier).await.is_ok());
    }

    #[tokio::test]
    async fn test_list_with_filter() {
        let (db, category_id) = setup().await;
        db.products().create(&kopi(category_id)).await.unwrap();
        db.products()
            .create(&NewProduct {
                name: "Teh Manis".to_string(),
                ..kopi(category_id)
            })
            .await
            .unwrap();

        assert_eq!(db.products().list(None).await.unwrap().len(), 2);
        let hits = db.products().list(Some("teh")).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Teh Manis");
    }

    #[tokio::test]
    async fn test_update_applies_explicit_zero_stock() {
        let (db, category_id) = setup().await;
        let product = db.products().create(&kopi(category_id)).await.unwrap();

        let patch = ProductPatch {
            stock: Some(0),
            ..Default::default()
        };
        let updated = db.products().update(product.id, &patch).await.unwrap();
        assert_eq!(updated.stock, 0);
        assert_eq!(updated.price, Money::from_minor(3500));
        assert_eq!(updated.name, "Kopi Susu");

        let err = db.products().update(product.id, &patch).await.unwrap_err();
        assert!(matches!(err, StoreError::Domain(CoreError::NoChanges { .. })));
    }

    #[tokio::test]
    async fn test_update_errors() {
        let (db, category_id) = setup().await;
        let product = db.products().create(&kopi(category_id)).await.unwrap();

        let patch = ProductPatch {
            price: Some(Money::from_minor(4000)),
            ..Default::default()
        };
        let err = db.products().update(9999, &patch).await.unwrap_err();
        assert!(matches!(err, StoreError::Domain(CoreError::ProductNotFound(9999))));

        let move_to_missing = ProductPatch {
            category_id: Some(category_id + 50),
            ..Default::default()
        };
        let err = db.products().update(product.id, &move_to_missing).await.unwrap_err();
        assert!(matches!(err, StoreError::Domain(CoreError::CategoryNotFound(_))));
    }

    #[tokio::test]
    async fn test_delete() {
        let (db, category_id) = setup().await;
        let product = db.products().create(&kopi(category_id)).await.unwrap();

        db.products().delete(product.id).await.unwrap();
        assert!(db.products().get_by_id(product.id).await.unwrap().is_none());

        let err = db.products().delete(product.id).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }
}
