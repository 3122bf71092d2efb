//! Items repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::item::{Item, NewItem, UpdateItem},
};

const ITEM_COLUMNS: &str = "id, name, description, available, owner_id, request_id";

#[derive(Clone)]
pub struct ItemsRepository {
    pool: Pool<Postgres>,
}

impl ItemsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get item by ID
    pub async fn get_by_id(&self, id: i64) -> AppResult<Item> {
        sqlx::query_as::<_, Item>(&format!("SELECT {} FROM items WHERE id = $1", ITEM_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Item with id {} not found", id)))
    }

    /// Items owned by a user
    pub async fn list_by_owner(&self, owner_id: i64) -> AppResult<Vec<Item>> {
        let items = sqlx::query_as::<_, Item>(&format!(
            "SELECT {} FROM items WHERE owner_id = $1 ORDER BY id",
            ITEM_COLUMNS
        ))
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    /// Items listed against an item request
    pub async fn list_by_request(&self, request_id: i64) -> AppResult<Vec<Item>> {
        let items = sqlx::query_as::<_, Item>(&format!(
            "SELECT {} FROM items WHERE request_id = $1 ORDER BY id",
            ITEM_COLUMNS
        ))
        .bind(request_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    /// Available items whose name or description contains `text`, ignoring case
    pub async fn search_available(&self, text: &str) -> AppResult<Vec<Item>> {
        let items = sqlx::query_as::<_, Item>(&search_query())
            .bind(search_pattern(text))
            .fetch_all(&self.pool)
            .await?;
        Ok(items)
    }

    /// Create an item for its owner
    pub async fn create(&self, owner_id: i64, item: &NewItem) -> AppResult<Item> {
        let created = sqlx::query_as::<_, Item>(&format!(
            r#"
            INSERT INTO items (name, description, available, owner_id, request_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            ITEM_COLUMNS
        ))
        .bind(&item.name)
        .bind(&item.description)
        .bind(item.available)
        .bind(owner_id)
        .bind(item.request_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    /// Update the fields present in `update`; only matches when `owner_id` owns the item
    pub async fn update(&self, id: i64, owner_id: i64, update: &UpdateItem) -> AppResult<Option<Item>> {
        let updated = sqlx::query_as::<_, Item>(&format!(
            r#"
            UPDATE items
            SET name = COALESCE($1, name),
                description = COALESCE($2, description),
                available = COALESCE($3, available)
            WHERE id = $4 AND owner_id = $5
            RETURNING {}
            "#,
            ITEM_COLUMNS
        ))
        .bind(&update.name)
        .bind(&update.description)
        .bind(update.available)
        .bind(id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(updated)
    }
}

/// Case folding happens in the database on both sides of the LIKE, so the
/// pattern keeps the caller's casing.
fn search_query() -> String {
    format!(
        "SELECT {} FROM items \
         WHERE (LOWER(name) LIKE LOWER($1) OR LOWER(description) LIKE LOWER($1)) \
           AND available = TRUE \
         ORDER BY id",
        ITEM_COLUMNS
    )
}

fn search_pattern(text: &str) -> String {
    format!("%{}%", escape_like(text))
}

/// Escape LIKE wildcards so user text matches literally (default `\` escape)
fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("drill"), "drill");
        assert_eq!(escape_like("100%"), "100\\%");
        assert_eq!(escape_like("a_b\\c"), "a\\_b\\\\c");
    }

    #[test]
    fn test_search_folds_case_in_sql() {
        assert_eq!(search_pattern("ДРЕЛЬ Pro"), "%ДРЕЛЬ Pro%");
        assert_eq!(search_pattern("50%"), "%50\\%%");

        let sql = search_query();
        assert!(sql.contains("LOWER(name) LIKE LOWER($1)"));
        assert!(sql.contains("LOWER(description) LIKE LOWER($1)"));
        assert!(sql.contains("available = TRUE"));
    }
}
