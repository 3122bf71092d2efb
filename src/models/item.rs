//! Item (catalog) model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};

use super::booking::BookingShort;
use super::comment::Comment;
use crate::error::{AppError, AppResult};

/// Item model from database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub available: bool,
    pub owner_id: i64,
    pub request_id: Option<i64>,
}

/// Item with its read-side projections: the owner's last and next booking
/// and the comments left on it.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemDetails {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub available: bool,
    pub request_id: Option<i64>,
    pub last_booking: Option<BookingShort>,
    pub next_booking: Option<BookingShort>,
    pub comments: Vec<Comment>,
}

impl ItemDetails {
    pub fn new(item: Item, comments: Vec<Comment>) -> Self {
        Self {
            id: item.id,
            name: item.name,
            description: item.description,
            available: item.available,
            request_id: item.request_id,
            last_booking: None,
            next_booking: None,
            comments,
        }
    }

    pub fn with_bookings(mut self, last: Option<BookingShort>, next: Option<BookingShort>) -> Self {
        self.last_booking = last;
        self.next_booking = next;
        self
    }
}

/// Create item request
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateItem {
    pub name: Option<String>,
    pub description: Option<String>,
    pub available: Option<bool>,
    /// Item request this item answers
    pub request_id: Option<i64>,
}

/// An item that passed validation, ready to be stored for its owner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItem {
    pub name: String,
    pub description: String,
    pub available: bool,
    pub request_id: Option<i64>,
}

impl TryFrom<CreateItem> for NewItem {
    type Error = AppError;

    fn try_from(item: CreateItem) -> AppResult<Self> {
        let Some(available) = item.available else {
            tracing::warn!("Item rejected: availability missing");
            return Err(AppError::BadRequest("Not found item available".to_string()));
        };

        let name = match item.name {
            Some(name) if !name.trim().is_empty() => name,
            _ => {
                tracing::warn!("Item rejected: name missing");
                return Err(AppError::BadRequest("Not found item name".to_string()));
            }
        };

        let Some(description) = item.description else {
            tracing::warn!("Item rejected: description missing");
            return Err(AppError::BadRequest("Not found item description".to_string()));
        };

        Ok(NewItem {
            name,
            description,
            available,
            request_id: item.request_id,
        })
    }
}

/// Update item request; absent fields keep their stored value
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateItem {
    pub name: Option<String>,
    pub description: Option<String>,
    pub available: Option<bool>,
}

/// Search query parameters
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ItemSearchQuery {
    /// Case-insensitive text matched against name and description
    pub text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create(name: Option<&str>, description: Option<&str>, available: Option<bool>) -> CreateItem {
        CreateItem {
            name: name.map(str::to_string),
            description: description.map(str::to_string),
            available,
            request_id: None,
        }
    }

    #[test]
    fn test_new_item_requires_every_field() {
        let err = NewItem::try_from(create(Some("Drill"), Some("Cordless"), None)).unwrap_err();
        assert_eq!(err.to_string(), "Not found item available");

        let err = NewItem::try_from(create(Some(" "), Some("Cordless"), Some(true))).unwrap_err();
        assert_eq!(err.to_string(), "Not found item name");

        let err = NewItem::try_from(create(None, Some("Cordless"), Some(true))).unwrap_err();
        assert_eq!(err.to_string(), "Not found item name");

        let err = NewItem::try_from(create(Some("Drill"), None, Some(true))).unwrap_err();
        assert_eq!(err.to_string(), "Not found item description");
    }

    #[test]
    fn test_new_item_keeps_request_link() {
        let mut request = create(Some("Drill"), Some(""), Some(false));
        request.request_id = Some(3);

        let item = NewItem::try_from(request).unwrap();
        assert_eq!(item.request_id, Some(3));
        assert!(!item.available);
        assert_eq!(item.description, "");
    }

    #[test]
    fn test_details_serialize_camel_case() {
        let item = Item {
            id: 1,
            name: "Drill".to_string(),
            description: "Cordless".to_string(),
            available: true,
            owner_id: 4,
            request_id: None,
        };

        let json = serde_json::to_value(ItemDetails::new(item, Vec::new())).unwrap();
        assert_eq!(json["lastBooking"], serde_json::Value::Null);
        assert_eq!(json["nextBooking"], serde_json::Value::Null);
        assert!(json["comments"].as_array().unwrap().is_empty());
        assert!(json.get("requestId").is_some());
    }
}
