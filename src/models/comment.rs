//! Comment model

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};

/// Comment left on an item by one of its past bookers
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: i64,
    pub text: String,
    pub item_id: i64,
    #[serde(skip_serializing)]
    pub author_id: i64,
    pub author_name: String,
    pub created: NaiveDateTime,
}

/// Create comment request
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CreateComment {
    pub text: Option<String>,
}

impl CreateComment {
    /// The comment text, rejected when missing or blank
    pub fn into_text(self) -> AppResult<String> {
        match self.text {
            Some(text) if !text.trim().is_empty() => Ok(text),
            _ => Err(AppError::BadRequest("Comment text can't be empty".to_string())),
        }
    }
}
