//! Item catalog and comment endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::WithRejection;

use crate::{
    error::{AppError, AppResult, ErrorResponse},
    models::{
        comment::{Comment, CreateComment},
        item::{CreateItem, Item, ItemDetails, ItemSearchQuery, UpdateItem},
    },
};

use super::SharerUserId;

/// List the caller's own items with their bookings and comments
#[utoipa::path(
    get,
    path = "/items",
    tag = "items",
    params(
        ("X-Sharer-User-Id" = i64, Header, description = "Acting user")
    ),
    responses(
        (status = 200, description = "Owner's items", body = Vec<ItemDetails>),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
pub async fn list_items(
    State(state): State<crate::AppState>,
    SharerUserId(owner_id): SharerUserId,
) -> AppResult<Json<Vec<ItemDetails>>> {
    let items = state.services.items.list_owner_items(owner_id).await?;
    Ok(Json(items))
}

/// Get an item; its owner also sees the last and next booking
#[utoipa::path(
    get,
    path = "/items/{id}",
    tag = "items",
    params(
        ("id" = i64, Path, description = "Item ID"),
        ("X-Sharer-User-Id" = i64, Header, description = "Acting user")
    ),
    responses(
        (status = 200, description = "Item details", body = ItemDetails),
        (status = 404, description = "Item not found", body = ErrorResponse)
    )
)]
pub async fn get_item(
    State(state): State<crate::AppState>,
    SharerUserId(viewer_id): SharerUserId,
    WithRejection(Path(id), _): WithRejection<Path<i64>, AppError>,
) -> AppResult<Json<ItemDetails>> {
    let item = state.services.items.get_item(viewer_id, id).await?;
    Ok(Json(item))
}

/// List a new item
#[utoipa::path(
    post,
    path = "/items",
    tag = "items",
    params(
        ("X-Sharer-User-Id" = i64, Header, description = "Owner of the new item")
    ),
    request_body = CreateItem,
    responses(
        (status = 201, description = "Item created", body = Item),
        (status = 400, description = "Missing field", body = ErrorResponse),
        (status = 404, description = "Owner or request not found", body = ErrorResponse)
    )
)]
pub async fn create_item(
    State(state): State<crate::AppState>,
    SharerUserId(owner_id): SharerUserId,
    WithRejection(Json(item), _): WithRejection<Json<CreateItem>, AppError>,
) -> AppResult<(StatusCode, Json<Item>)> {
    let created = state.services.items.add_item(owner_id, item).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update the present fields of an item
#[utoipa::path(
    patch,
    path = "/items/{id}",
    tag = "items",
    params(
        ("id" = i64, Path, description = "Item ID"),
        ("X-Sharer-User-Id" = i64, Header, description = "Owner of the item")
    ),
    request_body = UpdateItem,
    responses(
        (status = 200, description = "Item updated", body = Item),
        (status = 404, description = "Item not found or not owned by the caller", body = ErrorResponse)
    )
)]
pub async fn update_item(
    State(state): State<crate::AppState>,
    SharerUserId(owner_id): SharerUserId,
    WithRejection(Path(id), _): WithRejection<Path<i64>, AppError>,
    WithRejection(Json(update), _): WithRejection<Json<UpdateItem>, AppError>,
) -> AppResult<Json<Item>> {
    let updated = state.services.items.update_item(owner_id, id, update).await?;
    Ok(Json(updated))
}

/// Search available items by name or description
#[utoipa::path(
    get,
    path = "/items/search",
    tag = "items",
    params(ItemSearchQuery),
    responses(
        (status = 200, description = "Matching available items", body = Vec<ItemDetails>)
    )
)]
pub async fn search_items(
    State(state): State<crate::AppState>,
    WithRejection(Query(query), _): WithRejection<Query<ItemSearchQuery>, AppError>,
) -> AppResult<Json<Vec<ItemDetails>>> {
    let text = query.text.unwrap_or_default();
    let items = state.services.items.search(&text).await?;
    Ok(Json(items))
}

/// Comment on an item the caller has booked before
#[utoipa::path(
    post,
    path = "/items/{id}/comment",
    tag = "items",
    params(
        ("id" = i64, Path, description = "Item ID"),
        ("X-Sharer-User-Id" = i64, Header, description = "Comment author")
    ),
    request_body = CreateComment,
    responses(
        (status = 201, description = "Comment created", body = Comment),
        (status = 400, description = "Empty text or no past booking", body = ErrorResponse),
        (status = 404, description = "User or item not found", body = ErrorResponse)
    )
)]
pub async fn add_comment(
    State(state): State<crate::AppState>,
    SharerUserId(author_id): SharerUserId,
    WithRejection(Path(id), _): WithRejection<Path<i64>, AppError>,
    WithRejection(Json(comment), _): WithRejection<Json<CreateComment>, AppError>,
) -> AppResult<(StatusCode, Json<Comment>)> {
    let created = state.services.items.add_comment(author_id, id, comment).await?;
    Ok((StatusCode::CREATED, Json(created)))
}
