//! Item catalog and comment service

use crate::{
    error::{AppError, AppResult},
    models::{
        comment::{Comment, CreateComment},
        item::{CreateItem, Item, ItemDetails, NewItem, UpdateItem},
    },
    repository::Repository,
};

use super::now;

#[derive(Clone)]
pub struct ItemsService {
    repository: Repository,
}

impl ItemsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List a new item for its owner
    pub async fn add_item(&self, owner_id: i64, request: CreateItem) -> AppResult<Item> {
        let item = NewItem::try_from(request)?;
        self.repository.users.get_by_id(owner_id).await?;
        if let Some(request_id) = item.request_id {
            self.repository.requests.get_by_id(request_id).await?;
        }

        let created = self.repository.items.create(owner_id, &item).await?;
        tracing::info!("User {} listed item {}", owner_id, created.id);
        Ok(created)
    }

    /// Update the present fields of an item; only its owner may do so
    pub async fn update_item(&self, owner_id: i64, item_id: i64, update: UpdateItem) -> AppResult<Item> {
        match self.repository.items.update(item_id, owner_id, &update).await? {
            Some(item) => {
                tracing::info!("User {} updated item {}", owner_id, item_id);
                Ok(item)
            }
            None => {
                tracing::warn!("User {} has no access to update item {}", owner_id, item_id);
                Err(AppError::NotFound("User has not access to update item".to_string()))
            }
        }
    }

    /// Item with comments, and with its last/next booking when viewed by the owner
    pub async fn get_item(&self, viewer_id: i64, item_id: i64) -> AppResult<ItemDetails> {
        let item = self.repository.items.get_by_id(item_id).await?;
        self.details(item, viewer_id).await
    }

    /// All items of an owner, each with bookings and comments
    pub async fn list_owner_items(&self, owner_id: i64) -> AppResult<Vec<ItemDetails>> {
        self.repository.users.get_by_id(owner_id).await?;

        let items = self.repository.items.list_by_owner(owner_id).await?;
        let mut result = Vec::with_capacity(items.len());
        for item in items {
            result.push(self.details(item, owner_id).await?);
        }
        Ok(result)
    }

    /// Available items matching `text` in name or description
    pub async fn search(&self, text: &str) -> AppResult<Vec<ItemDetails>> {
        if text.is_empty() {
            tracing::debug!("Empty search text");
            return Ok(Vec::new());
        }

        let items = self.repository.items.search_available(text).await?;
        let mut result = Vec::with_capacity(items.len());
        for item in items {
            let comments = self.repository.comments.list_by_item(item.id).await?;
            result.push(ItemDetails::new(item, comments));
        }
        tracing::debug!("Search for {:?} found {} items", text, result.len());
        Ok(result)
    }

    /// Comment on an item; the author must have a booking of it that already started
    pub async fn add_comment(&self, user_id: i64, item_id: i64, request: CreateComment) -> AppResult<Comment> {
        let author = self.repository.users.get_by_id(user_id).await?;
        self.repository.items.get_by_id(item_id).await?;
        let text = request.into_text()?;

        let now = now();
        if self.repository.bookings.count_started(user_id, item_id, now).await? == 0 {
            tracing::warn!("User {} has no past booking of item {}", user_id, item_id);
            return Err(AppError::BadRequest("User cannot comment".to_string()));
        }

        let comment = self
            .repository
            .comments
            .create(item_id, author.id, &author.name, &text, now)
            .await?;
        tracing::info!("User {} commented item {}", user_id, item_id);
        Ok(comment)
    }

    async fn details(&self, item: Item, viewer_id: i64) -> AppResult<ItemDetails> {
        let now = now();
        let last = self.repository.bookings.last_for_item(item.id, viewer_id, now).await?;
        let next = self.repository.bookings.next_for_item(item.id, viewer_id, now).await?;
        let comments = self.repository.comments.list_by_item(item.id).await?;

        Ok(ItemDetails::new(item, comments).with_bookings(last.map(Into::into), next.map(Into::into)))
    }
}
