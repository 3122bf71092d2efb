//! Booking service: creation rules, the owner's decision and listings

use crate::{
    error::{AppError, AppResult},
    models::{
        booking::{BookingDetails, BookingState, CreateBooking},
        pagination::Page,
    },
    repository::{bookings::BookingRole, Repository},
};

use super::now;

#[derive(Clone)]
pub struct BookingsService {
    repository: Repository,
}

impl BookingsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Request a booking; it starts out WAITING for the owner's decision
    pub async fn create_booking(&self, booker_id: i64, request: CreateBooking) -> AppResult<BookingDetails> {
        self.repository.users.get_by_id(booker_id).await?;
        let item = self.repository.items.get_by_id(request.item_id).await?;

        let booking = request.admit(booker_id, &item, now())?;
        let id = self.repository.bookings.create(&booking).await?;
        tracing::info!("User {} booked item {} (booking {})", booker_id, item.id, id);

        self.repository.bookings.get_details(id).await
    }

    /// Approve or reject a WAITING booking; only the item owner decides
    pub async fn decide(&self, actor_id: i64, booking_id: i64, approved: bool) -> AppResult<BookingDetails> {
        let booking = self.repository.bookings.get_by_id(booking_id).await?;
        let status = booking.check_decision(actor_id, approved)?;

        if !self.repository.bookings.decide(booking_id, status).await? {
            tracing::warn!("Booking {} was decided concurrently", booking_id);
            return Err(AppError::BadRequest(format!("Booking {} is already decided", booking_id)));
        }
        tracing::info!("Booking {} is now {}", booking_id, status);

        self.repository.bookings.get_details(booking_id).await
    }

    /// A booking, visible only to its booker and the item owner
    pub async fn get_booking(&self, viewer_id: i64, booking_id: i64) -> AppResult<BookingDetails> {
        let booking = self.repository.bookings.get_details(booking_id).await?;
        self.repository.users.get_by_id(viewer_id).await?;

        if !booking.is_party(viewer_id) {
            tracing::warn!("User {} is not a party to booking {}", viewer_id, booking_id);
            return Err(AppError::NotFound(format!("Booking with id {} not found", booking_id)));
        }
        Ok(booking)
    }

    /// Bookings made by `booker_id`
    pub async fn list_for_booker(
        &self,
        booker_id: i64,
        state: BookingState,
        page: Option<Page>,
    ) -> AppResult<Vec<BookingDetails>> {
        self.list(BookingRole::Booker, booker_id, state, page).await
    }

    /// Bookings of items owned by `owner_id`
    pub async fn list_for_owner(
        &self,
        owner_id: i64,
        state: BookingState,
        page: Option<Page>,
    ) -> AppResult<Vec<BookingDetails>> {
        self.list(BookingRole::Owner, owner_id, state, page).await
    }

    async fn list(
        &self,
        role: BookingRole,
        actor_id: i64,
        state: BookingState,
        page: Option<Page>,
    ) -> AppResult<Vec<BookingDetails>> {
        self.repository.users.get_by_id(actor_id).await?;
        self.repository
            .bookings
            .list(role, actor_id, state, page, now())
            .await
    }
}
