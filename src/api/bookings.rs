//! Booking endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::WithRejection;

use crate::{
    error::{AppError, AppResult, ErrorResponse},
    models::booking::{ApproveQuery, BookingDetails, BookingListQuery, BookingState, CreateBooking},
};

use super::SharerUserId;

/// Request a booking of an item
#[utoipa::path(
    post,
    path = "/bookings",
    tag = "bookings",
    params(
        ("X-Sharer-User-Id" = i64, Header, description = "Booker")
    ),
    request_body = CreateBooking,
    responses(
        (status = 201, description = "Booking created in WAITING status", body = BookingDetails),
        (status = 400, description = "Bad dates or item unavailable", body = ErrorResponse),
        (status = 404, description = "User or item not found, or own item", body = ErrorResponse)
    )
)]
pub async fn create_booking(
    State(state): State<crate::AppState>,
    SharerUserId(booker_id): SharerUserId,
    WithRejection(Json(booking), _): WithRejection<Json<CreateBooking>, AppError>,
) -> AppResult<(StatusCode, Json<BookingDetails>)> {
    let created = state.services.bookings.create_booking(booker_id, booking).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Approve or reject a waiting booking
#[utoipa::path(
    patch,
    path = "/bookings/{id}",
    tag = "bookings",
    params(
        ("id" = i64, Path, description = "Booking ID"),
        ("X-Sharer-User-Id" = i64, Header, description = "Owner of the booked item"),
        ApproveQuery
    ),
    responses(
        (status = 200, description = "Booking decided", body = BookingDetails),
        (status = 400, description = "Already decided", body = ErrorResponse),
        (status = 404, description = "Booking not found or caller is not the owner", body = ErrorResponse)
    )
)]
pub async fn decide_booking(
    State(state): State<crate::AppState>,
    SharerUserId(owner_id): SharerUserId,
    WithRejection(Path(id), _): WithRejection<Path<i64>, AppError>,
    WithRejection(Query(query), _): WithRejection<Query<ApproveQuery>, AppError>,
) -> AppResult<Json<BookingDetails>> {
    let booking = state.services.bookings.decide(owner_id, id, query.approved).await?;
    Ok(Json(booking))
}

/// Get a booking; visible to its booker and the item owner
#[utoipa::path(
    get,
    path = "/bookings/{id}",
    tag = "bookings",
    params(
        ("id" = i64, Path, description = "Booking ID"),
        ("X-Sharer-User-Id" = i64, Header, description = "Booker or item owner")
    ),
    responses(
        (status = 200, description = "Booking details", body = BookingDetails),
        (status = 404, description = "Booking not found", body = ErrorResponse)
    )
)]
pub async fn get_booking(
    State(state): State<crate::AppState>,
    SharerUserId(viewer_id): SharerUserId,
    WithRejection(Path(id), _): WithRejection<Path<i64>, AppError>,
) -> AppResult<Json<BookingDetails>> {
    let booking = state.services.bookings.get_booking(viewer_id, id).await?;
    Ok(Json(booking))
}

/// List the caller's bookings, newest first
#[utoipa::path(
    get,
    path = "/bookings",
    tag = "bookings",
    params(
        ("X-Sharer-User-Id" = i64, Header, description = "Booker"),
        BookingListQuery
    ),
    responses(
        (status = 200, description = "Bookings", body = Vec<BookingDetails>),
        (status = 400, description = "Unknown state or bad page", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
pub async fn list_bookings(
    State(state): State<crate::AppState>,
    SharerUserId(booker_id): SharerUserId,
    WithRejection(Query(query), _): WithRejection<Query<BookingListQuery>, AppError>,
) -> AppResult<Json<Vec<BookingDetails>>> {
    let booking_state = BookingState::parse(query.state.as_deref())?;
    let page = query.page_params().page()?;

    let bookings = state
        .services
        .bookings
        .list_for_booker(booker_id, booking_state, page)
        .await?;
    Ok(Json(bookings))
}

/// List bookings of the caller's items, newest first
#[utoipa::path(
    get,
    path = "/bookings/owner",
    tag = "bookings",
    params(
        ("X-Sharer-User-Id" = i64, Header, description = "Item owner"),
        BookingListQuery
    ),
    responses(
        (status = 200, description = "Bookings", body = Vec<BookingDetails>),
        (status = 400, description = "Unknown state or bad page", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
pub async fn list_owner_bookings(
    State(state): State<crate::AppState>,
    SharerUserId(owner_id): SharerUserId,
    WithRejection(Query(query), _): WithRejection<Query<BookingListQuery>, AppError>,
) -> AppResult<Json<Vec<BookingDetails>>> {
    let booking_state = BookingState::parse(query.state.as_deref())?;
    let page = query.page_params().page()?;

    let bookings = state
        .services
        .bookings
        .list_for_owner(owner_id, booking_state, page)
        .await?;
    Ok(Json(bookings))
}
