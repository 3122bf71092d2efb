//! Bookings repository for database operations

use chrono::NaiveDateTime;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{
        booking::{Booking, BookingDetails, BookingDetailsRow, BookingState, BookingStatus, NewBooking},
        pagination::Page,
    },
};

const BOOKING_COLUMNS: &str =
    "id, start_date, end_date, status, booker_id, item_id, item_name, item_owner_id";

const DETAILS_SELECT: &str = r#"
    SELECT b.id, b.start_date, b.end_date, b.status,
           u.id AS booker_id, u.name AS booker_name, u.email AS booker_email,
           i.id AS item_id, i.name AS item_name, i.description AS item_description,
           i.available AS item_available, i.owner_id AS item_owner_id,
           i.request_id AS item_request_id
    FROM bookings b
    JOIN users u ON b.booker_id = u.id
    JOIN items i ON b.item_id = i.id
"#;

/// Which side of a booking a listing is for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingRole {
    Booker,
    Owner,
}

impl BookingRole {
    fn column(&self) -> &'static str {
        match self {
            BookingRole::Booker => "b.booker_id",
            BookingRole::Owner => "b.item_owner_id",
        }
    }
}

/// Build the listing query: `$1` is the actor, `$2` the current time when
/// the state is temporal. Newest start first.
fn list_query(role: BookingRole, state: BookingState, page: Option<Page>) -> String {
    let mut sql = format!("{} WHERE {} = $1", DETAILS_SELECT, role.column());
    if let Some(predicate) = state.predicate() {
        sql.push_str(" AND ");
        sql.push_str(predicate);
    }
    sql.push_str(" ORDER BY b.start_date DESC, b.id DESC");
    if let Some(page) = page {
        sql.push_str(&format!(" LIMIT {} OFFSET {}", page.limit(), page.offset()));
    }
    sql
}

#[derive(Clone)]
pub struct BookingsRepository {
    pool: Pool<Postgres>,
}

impl BookingsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get booking by ID
    pub async fn get_by_id(&self, id: i64) -> AppResult<Booking> {
        sqlx::query_as::<_, Booking>(&format!("SELECT {} FROM bookings WHERE id = $1", BOOKING_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Booking with id {} not found", id)))
    }

    /// Get booking by ID with booker and item resolved
    pub async fn get_details(&self, id: i64) -> AppResult<BookingDetails> {
        let row = sqlx::query_as::<_, BookingDetailsRow>(&format!("{} WHERE b.id = $1", DETAILS_SELECT))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Booking with id {} not found", id)))?;
        Ok(row.into())
    }

    /// Create a new booking in WAITING status
    pub async fn create(&self, booking: &NewBooking) -> AppResult<i64> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO bookings (start_date, end_date, status, booker_id, item_id, item_name, item_owner_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
            "#,
        )
        .bind(booking.start)
        .bind(booking.end)
        .bind(BookingStatus::Waiting)
        .bind(booking.booker_id)
        .bind(booking.item_id)
        .bind(&booking.item_name)
        .bind(booking.item_owner_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(id)
    }

    /// Move a WAITING booking to `status`. Returns false when the booking was
    /// no longer WAITING.
    pub async fn decide(&self, id: i64, status: BookingStatus) -> AppResult<bool> {
        let result = sqlx::query("UPDATE bookings SET status = $1 WHERE id = $2 AND status = $3")
            .bind(status)
            .bind(id)
            .bind(BookingStatus::Waiting)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() == 1)
    }

    /// Bookings of a booker or of an owner's items, filtered by state
    pub async fn list(
        &self,
        role: BookingRole,
        actor_id: i64,
        state: BookingState,
        page: Option<Page>,
        now: NaiveDateTime,
    ) -> AppResult<Vec<BookingDetails>> {
        let sql = list_query(role, state, page);
        let mut query = sqlx::query_as::<_, BookingDetailsRow>(&sql).bind(actor_id);
        if state.is_temporal() {
            query = query.bind(now);
        }

        let rows = query.fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(BookingDetails::from).collect())
    }

    /// Latest non-rejected booking of the item that started before `now`
    pub async fn last_for_item(&self, item_id: i64, owner_id: i64, now: NaiveDateTime) -> AppResult<Option<Booking>> {
        let booking = sqlx::query_as::<_, Booking>(&format!(
            r#"
            SELECT {} FROM bookings
            WHERE item_id = $1 AND item_owner_id = $2
              AND start_date < $3 AND status != 'REJECTED'
            ORDER BY start_date DESC
            LIMIT 1
            "#,
            BOOKING_COLUMNS
        ))
        .bind(item_id)
        .bind(owner_id)
        .bind(now)
        .fetch_optional(&self.pool)
        .await?;
        Ok(booking)
    }

    /// Earliest non-rejected booking of the item that starts after `now`
    pub async fn next_for_item(&self, item_id: i64, owner_id: i64, now: NaiveDateTime) -> AppResult<Option<Booking>> {
        let booking = sqlx::query_as::<_, Booking>(&format!(
            r#"
            SELECT {} FROM bookings
            WHERE item_id = $1 AND item_owner_id = $2
              AND start_date > $3 AND status != 'REJECTED'
            ORDER BY start_date ASC
            LIMIT 1
            "#,
            BOOKING_COLUMNS
        ))
        .bind(item_id)
        .bind(owner_id)
        .bind(now)
        .fetch_optional(&self.pool)
        .await?;
        Ok(booking)
    }

    /// Count a user's bookings of an item that started before `now`
    pub async fn count_started(&self, booker_id: i64, item_id: i64, now: NaiveDateTime) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM bookings WHERE booker_id = $1 AND item_id = $2 AND start_date < $3",
        )
        .bind(booker_id)
        .bind(item_id)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_query_for_booker_without_filter() {
        let sql = list_query(BookingRole::Booker, BookingState::All, None);
        assert!(sql.contains("WHERE b.booker_id = $1 ORDER BY b.start_date DESC"));
        assert!(!sql.contains("$2"));
        assert!(!sql.contains("LIMIT"));
    }

    #[test]
    fn test_list_query_for_owner_with_state() {
        let sql = list_query(BookingRole::Owner, BookingState::Current, None);
        assert!(sql.contains("WHERE b.item_owner_id = $1 AND b.start_date < $2 AND b.end_date > $2"));

        let sql = list_query(BookingRole::Owner, BookingState::Waiting, None);
        assert!(sql.contains("AND b.status = 'WAITING' ORDER BY"));
    }

    #[test]
    fn test_list_query_pages_after_filtering() {
        let page = Page { index: 2, size: 5 };
        let sql = list_query(BookingRole::Booker, BookingState::Past, Some(page));
        assert!(sql.contains("b.end_date < $2 ORDER BY b.start_date DESC, b.id DESC LIMIT 5 OFFSET 10"));
    }
}
