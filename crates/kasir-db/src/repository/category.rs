//! # Category Repository
//!
//! Database operations for categories.
//!
//! ## Rules Enforced Here
//! - Duplicate = same name *and* description (case-sensitive)
//! - Update with nothing new is a conflict, not a silent success
//! - A category still used by products cannot be deleted (foreign key)

use sqlx::{SqliteExecutor, SqlitePool};
use tracing::{debug, warn};

use super::contains_pattern;
use crate::error::{DbError, DbResult, StoreResult};
use kasir_core::validation::validate_name_filter;
use kasir_core::{Category, CategoryPatch, CoreError, NewCategory};

/// Repository for category database operations.
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    pool: SqlitePool,
}

impl CategoryRepository {
    /// Creates a new CategoryRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CategoryRepository { pool }
    }

    /// Lists categories ordered by id, optionally filtered by a
    /// case-insensitive substring of the name.
    pub async fn list(&self, name: Option<&str>) -> StoreResult<Vec<Category>> {
        let filter = validate_name_filter(name)?;

        debug!(filter = ?filter, "Listing categories");

        let categories = match filter {
            Some(filter) => {
                sqlx::query_as::<_, Category>(
                    r#"
                    SELECT id, name, description
                    FROM categories
                    WHERE name LIKE ?1 ESCAPE '\'
                    ORDER BY id
                    "#,
                )
                .bind(contains_pattern(&filter))
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Category>(
                    "SELECT id, name, description FROM categories ORDER BY id",
                )
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(categories)
    }

    /// Gets a category by its ID.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Category>> {
        find_category(&self.pool, id).await
    }

    /// Creates a category.
    ///
    /// ## Errors
    /// - `Validation` for an empty or oversized name
    /// - `Duplicate` if a category with the same name and description exists
    pub async fn create(&self, input: &NewCategory) -> StoreResult<Category> {
        let input = input.validated()?;

        debug!(name = %input.name, "Creating category");

        let mut tx = self.pool.begin().await?;

        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM categories WHERE name = ?1 AND description = ?2)",
        )
        .bind(&input.name)
        .bind(&input.description)
        .fetch_one(&mut *tx)
        .await?;

        if exists {
            warn!(name = %input.name, "Duplicate category rejected");
            return Err(CoreError::duplicate("category", "name and description").into());
        }

        let id: i64 = sqlx::query_scalar(
            "INSERT INTO categories (name, description) VALUES (?1, ?2) RETURNING id",
        )
        .bind(&input.name)
        .bind(&input.description)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Category {
            id,
            name: input.name,
            description: input.description,
        })
    }

    /// Applies a partial update.
    ///
    /// ## Errors
    /// - `CategoryNotFound` if `id` doesn't exist
    /// - `NoChanges` if the merged category equals the stored one
    pub async fn update(&self, id: i64, patch: &CategoryPatch) -> StoreResult<Category> {
        debug!(id, "Updating category");

        let mut tx = self.pool.begin().await?;

        let current = find_category(&mut *tx, id)
            .await?
            .ok_or(CoreError::CategoryNotFound(id))?;

        let merged = patch.apply(&current)?;

        sqlx::query("UPDATE categories SET name = ?1, description = ?2 WHERE id = ?3")
            .bind(&merged.name)
            .bind(&merged.description)
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(Category {
            id,
            name: merged.name,
            description: merged.description,
        })
    }

    /// Deletes a category.
    ///
    /// ## Errors
    /// - `CategoryNotFound` if `id` doesn't exist
    /// - `InUse` if products still reference it
    pub async fn delete(&self, id: i64) -> StoreResult<()> {
        debug!(id, "Deleting category");

        let result = sqlx::query("DELETE FROM categories WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(DbError::from);

        match result {
            Ok(done) if done.rows_affected() == 0 => Err(CoreError::CategoryNotFound(id).into()),
            Ok(_) => Ok(()),
            Err(DbError::ForeignKeyViolation { .. }) => {
                warn!(id, "Category still referenced by products");
                Err(CoreError::InUse {
                    entity: "category".to_string(),
                    id,
                    referenced_by: "products".to_string(),
                }
                .into())
            }
            Err(err) => Err(err.into()),
        }
    }
}

/// Looks up a category on any executor (pool or open transaction).
pub(crate) async fn find_category<'e, E>(executor: E, id: i64) -> DbResult<Option<Category>>
where
    E: SqliteExecutor<'e>,
{
    let category = sqlx::query_as::<_, Category>(
        "SELECT id, name, description FROM categories WHERE id = ?1",
    )
    .bind(id)
    .fetch_optional(executor)
    .await?;

    Ok(category)
}

// =============================================================================
// Tests
// =============================================================================
