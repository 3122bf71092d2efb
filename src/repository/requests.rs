//! Item requests repository for database operations

use chrono::NaiveDateTime;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{pagination::Page, request::ItemRequest},
};

#[derive(Clone)]
pub struct RequestsRepository {
    pool: Pool<Postgres>,
}

impl RequestsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get item request by ID
    pub async fn get_by_id(&self, id: i64) -> AppResult<ItemRequest> {
        sqlx::query_as::<_, ItemRequest>(
            "SELECT id, description, requester_id, created FROM requests WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Item request with id {} not found", id)))
    }

    /// Create an item request
    pub async fn create(&self, requester_id: i64, description: &str, created: NaiveDateTime) -> AppResult<ItemRequest> {
        let request = sqlx::query_as::<_, ItemRequest>(
            r#"
            INSERT INTO requests (description, requester_id, created)
            VALUES ($1, $2, $3)
            RETURNING id, description, requester_id, created
            "#,
        )
        .bind(description)
        .bind(requester_id)
        .bind(created)
        .fetch_one(&self.pool)
        .await?;
        Ok(request)
    }

    /// Requests created by a user, newest first
    pub async fn list_by_requester(&self, requester_id: i64) -> AppResult<Vec<ItemRequest>> {
        let requests = sqlx::query_as::<_, ItemRequest>(
            r#"
            SELECT id, description, requester_id, created FROM requests
            WHERE requester_id = $1
            ORDER BY created DESC, id DESC
            "#,
        )
        .bind(requester_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(requests)
    }

    /// Requests of everyone but `exclude_requester` (everyone when `None`),
    /// newest first, optionally paged
    pub async fn list_others(&self, exclude_requester: Option<i64>, page: Option<Page>) -> AppResult<Vec<ItemRequest>> {
        let mut sql = String::from("SELECT id, description, requester_id, created FROM requests");
        if exclude_requester.is_some() {
            sql.push_str(" WHERE requester_id != $1");
        }
        sql.push_str(" ORDER BY created DESC, id DESC");
        if let Some(page) = page {
            sql.push_str(&format!(" LIMIT {} OFFSET {}", page.limit(), page.offset()));
        }

        let mut query = sqlx::query_as::<_, ItemRequest>(&sql);
        if let Some(requester_id) = exclude_requester {
            query = query.bind(requester_id);
        }

        let requests = query.fetch_all(&self.pool).await?;
        Ok(requests)
    }
}
