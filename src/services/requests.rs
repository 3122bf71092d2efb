//! Item request board service

use crate::{
    error::{AppError, AppResult},
    models::{
        pagination::Page,
        request::{CreateItemRequest, ItemRequest, ItemRequestDetails},
    },
    repository::Repository,
};

use super::now;

#[derive(Clone)]
pub struct RequestsService {
    repository: Repository,
}

impl RequestsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Post a request for an item
    pub async fn add_request(&self, requester_id: i64, request: CreateItemRequest) -> AppResult<ItemRequestDetails> {
        let description = request.into_description()?;
        let requester = self.repository.users.get_by_id(requester_id).await?;

        let created = self
            .repository
            .requests
            .create(requester_id, &description, now())
            .await?;
        tracing::info!("User {} posted item request {}", requester_id, created.id);

        Ok(ItemRequestDetails::new(created, requester, Vec::new()))
    }

    /// Requests posted by `requester_id`
    pub async fn list_mine(&self, requester_id: i64) -> AppResult<Vec<ItemRequestDetails>> {
        self.repository.users.get_by_id(requester_id).await?;
        let requests = self.repository.requests.list_by_requester(requester_id).await?;
        self.details(requests).await
    }

    /// A single request. Any existing user may read any request.
    pub async fn get_request(&self, requester_id: i64, request_id: i64) -> AppResult<ItemRequestDetails> {
        let request = self.repository.requests.get_by_id(request_id).await?;
        self.repository.users.get_by_id(requester_id).await?;

        self.details(vec![request])
            .await?
            .pop()
            .ok_or_else(|| AppError::Internal(format!("Item request {} lost while resolving", request_id)))
    }

    /// Requests of other users, or of everyone when no user is given
    pub async fn list_others(&self, requester_id: Option<i64>, page: Option<Page>) -> AppResult<Vec<ItemRequestDetails>> {
        if let Some(id) = requester_id {
            self.repository.users.get_by_id(id).await?;
        }

        // Without paging the whole board is returned, own requests included.
        let exclude = page.and(requester_id);
        let requests = self.repository.requests.list_others(exclude, page).await?;
        self.details(requests).await
    }

    async fn details(&self, requests: Vec<ItemRequest>) -> AppResult<Vec<ItemRequestDetails>> {
        let mut result = Vec::with_capacity(requests.len());
        for request in requests {
            let requester = self.repository.users.get_by_id(request.requester_id).await?;
            let items = self.repository.items.list_by_request(request.id).await?;
            result.push(ItemRequestDetails::new(request, requester, items));
        }
        Ok(result)
    }
}
