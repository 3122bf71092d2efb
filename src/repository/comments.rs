//! Comments repository for database operations

use chrono::NaiveDateTime;
use sqlx::{Pool, Postgres};

use crate::{error::AppResult, models::comment::Comment};

#[derive(Clone)]
pub struct CommentsRepository {
    pool: Pool<Postgres>,
}

impl CommentsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Comments left on an item, oldest first
    pub async fn list_by_item(&self, item_id: i64) -> AppResult<Vec<Comment>> {
        let comments = sqlx::query_as::<_, Comment>(
            r#"
            SELECT id, text, item_id, author_id, author_name, created
            FROM comments
            WHERE item_id = $1
            ORDER BY created, id
            "#,
        )
        .bind(item_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(comments)
    }

    /// Store a comment with its author's name
    pub async fn create(
        &self,
        item_id: i64,
        author_id: i64,
        author_name: &str,
        text: &str,
        created: NaiveDateTime,
    ) -> AppResult<Comment> {
        let comment = sqlx::query_as::<_, Comment>(
            r#"
            INSERT INTO comments (text, item_id, author_id, author_name, created)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, text, item_id, author_id, author_name, created
            "#,
        )
        .bind(text)
        .bind(item_id)
        .bind(author_id)
        .bind(author_name)
        .bind(created)
        .fetch_one(&self.pool)
        .await?;
        Ok(comment)
    }
}
