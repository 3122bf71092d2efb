//! Item request model: a user's post asking for an item nobody lists yet

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use super::item::Item;
use super::user::User;
use crate::error::{AppError, AppResult};

/// Item request model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemRequest {
    pub id: i64,
    pub description: String,
    pub requester_id: i64,
    pub created: NaiveDateTime,
}

/// Item request with its requester and the items listed against it
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ItemRequestDetails {
    pub id: i64,
    pub description: String,
    pub requester: User,
    pub created: NaiveDateTime,
    pub items: Vec<Item>,
}

impl ItemRequestDetails {
    pub fn new(request: ItemRequest, requester: User, items: Vec<Item>) -> Self {
        Self {
            id: request.id,
            description: request.description,
            requester,
            created: request.created,
            items,
        }
    }
}

/// Create item request body
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CreateItemRequest {
    pub description: Option<String>,
}

impl CreateItemRequest {
    pub fn into_description(self) -> AppResult<String> {
        match self.description {
            Some(description) if !description.trim().is_empty() => Ok(description),
            _ => Err(AppError::BadRequest("Request description is missing".to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_description_is_required() {
        assert!(CreateItemRequest::default().into_description().is_err());
        assert!(CreateItemRequest { description: Some(String::new()) }
            .into_description()
            .is_err());
        assert_eq!(
            CreateItemRequest { description: Some("Need a ladder".to_string()) }
                .into_description()
                .unwrap(),
            "Need a ladder"
        );
    }
}
