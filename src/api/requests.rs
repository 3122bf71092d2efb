//! Item request board endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::WithRejection;

use crate::{
    error::{AppError, AppResult, ErrorResponse},
    models::{
        pagination::PageParams,
        request::{CreateItemRequest, ItemRequestDetails},
    },
};

use super::{OptionalSharerUserId, SharerUserId};

/// Post a request for an item nobody lists yet
#[utoipa::path(
    post,
    path = "/requests",
    tag = "requests",
    params(
        ("X-Sharer-User-Id" = i64, Header, description = "Requester")
    ),
    request_body = CreateItemRequest,
    responses(
        (status = 201, description = "Request created", body = ItemRequestDetails),
        (status = 400, description = "Missing description", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
pub async fn create_request(
    State(state): State<crate::AppState>,
    SharerUserId(requester_id): SharerUserId,
    WithRejection(Json(request), _): WithRejection<Json<CreateItemRequest>, AppError>,
) -> AppResult<(StatusCode, Json<ItemRequestDetails>)> {
    let created = state.services.requests.add_request(requester_id, request).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// List the caller's own requests with the items offered for them
#[utoipa::path(
    get,
    path = "/requests",
    tag = "requests",
    params(
        ("X-Sharer-User-Id" = i64, Header, description = "Requester")
    ),
    responses(
        (status = 200, description = "Own requests, newest first", body = Vec<ItemRequestDetails>),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
pub async fn list_my_requests(
    State(state): State<crate::AppState>,
    SharerUserId(requester_id): SharerUserId,
) -> AppResult<Json<Vec<ItemRequestDetails>>> {
    let requests = state.services.requests.list_mine(requester_id).await?;
    Ok(Json(requests))
}

/// Get a request by ID
#[utoipa::path(
    get,
    path = "/requests/{id}",
    tag = "requests",
    params(
        ("id" = i64, Path, description = "Request ID"),
        ("X-Sharer-User-Id" = i64, Header, description = "Acting user")
    ),
    responses(
        (status = 200, description = "Request details", body = ItemRequestDetails),
        (status = 404, description = "Request or user not found", body = ErrorResponse)
    )
)]
pub async fn get_request(
    State(state): State<crate::AppState>,
    SharerUserId(requester_id): SharerUserId,
    WithRejection(Path(id), _): WithRejection<Path<i64>, AppError>,
) -> AppResult<Json<ItemRequestDetails>> {
    let request = state.services.requests.get_request(requester_id, id).await?;
    Ok(Json(request))
}

/// Browse the request board
#[utoipa::path(
    get,
    path = "/requests/all",
    tag = "requests",
    params(
        ("X-Sharer-User-Id" = Option<i64>, Header, description = "Acting user, whose own requests are skipped when paging"),
        PageParams
    ),
    responses(
        (status = 200, description = "Requests, newest first", body = Vec<ItemRequestDetails>),
        (status = 400, description = "Bad page", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
pub async fn list_all_requests(
    State(state): State<crate::AppState>,
    OptionalSharerUserId(requester_id): OptionalSharerUserId,
    WithRejection(Query(params), _): WithRejection<Query<PageParams>, AppError>,
) -> AppResult<Json<Vec<ItemRequestDetails>>> {
    let page = params.page()?;
    let requests = state.services.requests.list_others(requester_id, page).await?;
    Ok(Json(requests))
}
