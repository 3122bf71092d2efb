//! API handlers for ShareIt REST endpoints

pub mod bookings;
pub mod health;
pub mod items;
pub mod openapi;
pub mod requests;
pub mod users;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::request::Parts,
    routing::{get, post},
    Router,
};

use crate::{error::AppError, AppState};

/// Header carrying the id of the acting user
pub const SHARER_USER_ID: &str = "X-Sharer-User-Id";

/// Extractor for the acting user's id; the header is required
pub struct SharerUserId(pub i64);

/// Extractor for the acting user's id where the header may be absent
pub struct OptionalSharerUserId(pub Option<i64>);

fn parse_user_id(parts: &Parts) -> Result<Option<i64>, AppError> {
    let Some(value) = parts.headers.get(SHARER_USER_ID) else {
        return Ok(None);
    };

    value
        .to_str()
        .ok()
        .and_then(|raw| raw.trim().parse::<i64>().ok())
        .map(Some)
        .ok_or_else(|| AppError::BadRequest(format!("Invalid {} header", SHARER_USER_ID)))
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for SharerUserId {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parse_user_id(parts)?
            .map(SharerUserId)
            .ok_or_else(|| AppError::BadRequest(format!("Missing {} header", SHARER_USER_ID)))
    }
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for OptionalSharerUserId {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(OptionalSharerUserId(parse_user_id(parts)?))
    }
}

/// Build the API router with all routes and the OpenAPI docs
pub fn router(state: AppState) -> Router {
    let routes = Router::new()
        // Health
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Users
        .route("/users", get(users::list_users).post(users::create_user))
        .route(
            "/users/:id",
            get(users::get_user)
                .patch(users::update_user)
                .delete(users::delete_user),
        )
        // Items
        .route("/items", get(items::list_items).post(items::create_item))
        .route("/items/search", get(items::search_items))
        .route("/items/:id", get(items::get_item).patch(items::update_item))
        .route("/items/:id/comment", post(items::add_comment))
        // Bookings
        .route("/bookings", get(bookings::list_bookings).post(bookings::create_booking))
        .route("/bookings/owner", get(bookings::list_owner_bookings))
        .route("/bookings/:id", get(bookings::get_booking).patch(bookings::decide_booking))
        // Item requests
        .route("/requests", get(requests::list_my_requests).post(requests::create_request))
        .route("/requests/all", get(requests::list_all_requests))
        .route("/requests/:id", get(requests::get_request))
        .with_state(state);

    Router::new()
        .merge(routes)
        .merge(openapi::create_openapi_router())
}

