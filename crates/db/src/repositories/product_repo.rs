//! Repository for the `products` table.

use sqlx::PgPool;

use launchos_core::types::DbId;

use crate::models::product::{CreateProduct, Product, UpdateProduct};

/// Column list for `products` queries.
const COLUMNS: &str = "\
    id, workspace_id, sku, name, recipe, attributes, variants, \
    inventory, dimensions, created_at, updated_at";

/// Provides CRUD operations for products.
pub struct ProductRepo;

impl ProductRepo {
    /// Insert a new product. The variant/inventory pairing must have
    /// been validated by the caller.
    pub async fn create(
        pool: &PgPool,
        workspace_id: DbId,
        input: &CreateProduct,
    ) -> Result<Product, sqlx::Error> {
        let query = format!(
            "INSERT INTO products \
                 (workspace_id, sku, name, recipe, attributes, variants, inventory, dimensions) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(workspace_id)
            .bind(&input.sku)
            .bind(&input.name)
            .bind(&input.recipe)
            .bind(&input.attributes)
            .bind(&input.variants)
            .bind(&input.inventory)
            .bind(&input.dimensions)
            .fetch_one(pool)
            .await
    }

    /// Get a product by id. Returns `None` if it does not exist.
    pub async fn get(pool: &PgPool, id: DbId) -> Result<Option<Product>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM products WHERE id = $1");
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all products in a workspace, newest first.
    pub async fn list_by_workspace(
        pool: &PgPool,
        workspace_id: DbId,
    ) -> Result<Vec<Product>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM products WHERE workspace_id = $1 ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(workspace_id)
            .fetch_all(pool)
            .await
    }

    /// Partial update of a product by id.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProduct,
    ) -> Result<Product, sqlx::Error> {
        let mut set_clauses: Vec<String> = vec!["updated_at = NOW()".to_string()];
        let mut param_idx: usize = 2; // $1 is id

        if input.name.is_some() {
            set_clauses.push(format!("name = ${param_idx}"));
            param_idx += 1;
        }
        if input.recipe.is_some() {
            set_clauses.push(format!("recipe = ${param_idx}"));
            param_idx += 1;
        }
        if input.attributes.is_some() {
            set_clauses.push(format!("attributes = ${param_idx}"));
            param_idx += 1;
        }
        if input.variants.is_some() {
            set_clauses.push(format!("variants = ${param_idx}"));
            param_idx += 1;
        }
        if input.inventory.is_some() {
            set_clauses.push(format!("inventory = ${param_idx}"));
            param_idx += 1;
        }
        if input.dimensions.is_some() {
            set_clauses.push(format!("dimensions = ${param_idx}"));
            let _ = param_idx;
        }

        let query = format!(
            "UPDATE products SET {} WHERE id = $1 RETURNING {COLUMNS}",
            set_clauses.join(", ")
        );

        let mut q = sqlx::query_as::<_, Product>(&query).bind(id);
        if let Some(ref name) = input.name {
            q = q.bind(name);
        }
        if let Some(ref recipe) = input.recipe {
            q = q.bind(recipe);
        }
        if let Some(ref attributes) = input.attributes {
            q = q.bind(attributes);
        }
        if let Some(ref variants) = input.variants {
            q = q.bind(variants);
        }
        if let Some(ref inventory) = input.inventory {
            q = q.bind(inventory);
        }
        if let Some(ref dimensions) = input.dimensions {
            q = q.bind(dimensions);
        }
        q.fetch_one(pool).await
    }

    /// Delete a product and its media set, listing drafts and feed row
    /// (cascading).
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
