//! Booking model, status state machine and listing filters

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::{Decode, Encode, FromRow, Postgres};
use utoipa::ToSchema;

use super::item::Item;
use super::pagination::PageParams;
use super::user::User;
use crate::error::{AppError, AppResult};

/// Booking status. WAITING is initial, APPROVED and REJECTED are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum BookingStatus {
    Waiting,
    Approved,
    Rejected,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Waiting => "WAITING",
            BookingStatus::Approved => "APPROVED",
            BookingStatus::Rejected => "REJECTED",
        }
    }

    /// The owner's decision on a booking. Only a WAITING booking can be decided.
    pub fn decide(self, approved: bool) -> AppResult<BookingStatus> {
        match self {
            BookingStatus::Waiting if approved => Ok(BookingStatus::Approved),
            BookingStatus::Waiting => Ok(BookingStatus::Rejected),
            BookingStatus::Approved => Err(AppError::BadRequest("Already Approved".to_string())),
            BookingStatus::Rejected => {
                Err(AppError::BadRequest("Booking already rejected".to_string()))
            }
        }
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "WAITING" => Ok(BookingStatus::Waiting),
            "APPROVED" => Ok(BookingStatus::Approved),
            "REJECTED" => Ok(BookingStatus::Rejected),
            _ => Err(format!("Invalid booking status: {}", s)),
        }
    }
}

// SQLx conversion for BookingStatus (stored as text)
impl sqlx::Type<Postgres> for BookingStatus {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<Postgres>>::compatible(ty)
    }
}

impl<'r> Decode<'r, Postgres> for BookingStatus {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: &str = Decode::<Postgres>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl Encode<'_, Postgres> for BookingStatus {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        <&str as Encode<Postgres>>::encode(self.as_str(), buf)
    }
}

/// Listing filter accepted by `GET /bookings` and `GET /bookings/owner`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BookingState {
    #[default]
    All,
    Waiting,
    Approved,
    Rejected,
    Past,
    Current,
    Future,
}

impl BookingState {
    /// Parse an optional `state` parameter; absence means ALL.
    pub fn parse(token: Option<&str>) -> AppResult<Self> {
        token.map_or(Ok(BookingState::All), str::parse)
    }

    /// Whether the filter depends on the current time
    pub fn is_temporal(&self) -> bool {
        matches!(self, BookingState::Past | BookingState::Current | BookingState::Future)
    }

    /// SQL predicate over the `b` bookings alias. Temporal predicates read
    /// the current time from `$2`.
    pub fn predicate(&self) -> Option<&'static str> {
        match self {
            BookingState::All => None,
            BookingState::Waiting => Some("b.status = 'WAITING'"),
            BookingState::Approved => Some("b.status = 'APPROVED'"),
            BookingState::Rejected => Some("b.status = 'REJECTED'"),
            BookingState::Past => Some("b.end_date < $2"),
            BookingState::Current => Some("b.start_date < $2 AND b.end_date > $2"),
            BookingState::Future => Some("b.start_date > $2"),
        }
    }
}

impl std::str::FromStr for BookingState {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ALL" => Ok(BookingState::All),
            "WAITING" => Ok(BookingState::Waiting),
            "APPROVED" => Ok(BookingState::Approved),
            "REJECTED" => Ok(BookingState::Rejected),
            "PAST" => Ok(BookingState::Past),
            "CURRENT" => Ok(BookingState::Current),
            "FUTURE" => Ok(BookingState::Future),
            _ => Err(AppError::BadRequest(format!("Unknown state: {}", s))),
        }
    }
}

/// Booking model from database
#[derive(Debug, Clone, FromRow)]
pub struct Booking {
    pub id: i64,
    #[sqlx(rename = "start_date")]
    pub start: NaiveDateTime,
    #[sqlx(rename = "end_date")]
    pub end: NaiveDateTime,
    pub status: BookingStatus,
    pub booker_id: i64,
    pub item_id: i64,
    pub item_name: String,
    pub item_owner_id: i64,
}

impl Booking {
    /// Check the owner's decision against this booking, in order: already
    /// approved, actor is not the item owner, status transition.
    pub fn check_decision(&self, actor_id: i64, approved: bool) -> AppResult<BookingStatus> {
        if self.status == BookingStatus::Approved {
            tracing::warn!("Booking {} is already approved", self.id);
            return Err(AppError::BadRequest("Already Approved".to_string()));
        }
        if self.item_owner_id != actor_id {
            tracing::warn!("User {} is not the owner of item {}", actor_id, self.item_id);
            return Err(AppError::NotFound(format!(
                "User {} is not the owner of item {}",
                actor_id, self.item_id
            )));
        }
        self.status.decide(approved)
    }
}

/// Booking summary attached to items as last/next booking
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingShort {
    pub id: i64,
    pub booker_id: i64,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub status: BookingStatus,
}

impl From<Booking> for BookingShort {
    fn from(booking: Booking) -> Self {
        Self {
            id: booking.id,
            booker_id: booking.booker_id,
            start: booking.start,
            end: booking.end,
            status: booking.status,
        }
    }
}

/// Booking with its booker and item resolved
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BookingDetails {
    pub id: i64,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub status: BookingStatus,
    pub booker: User,
    pub item: Item,
}

impl BookingDetails {
    /// Only the booker and the item owner may see a booking
    pub fn is_party(&self, user_id: i64) -> bool {
        user_id == self.booker.id || user_id == self.item.owner_id
    }
}

/// Internal row structure for the booking/booker/item join
#[derive(Debug, Clone, FromRow)]
pub struct BookingDetailsRow {
    pub id: i64,
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
    pub status: BookingStatus,
    pub booker_id: i64,
    pub booker_name: String,
    pub booker_email: String,
    pub item_id: i64,
    pub item_name: String,
    pub item_description: String,
    pub item_available: bool,
    pub item_owner_id: i64,
    pub item_request_id: Option<i64>,
}

impl From<BookingDetailsRow> for BookingDetails {
    fn from(row: BookingDetailsRow) -> Self {
        Self {
            id: row.id,
            start: row.start_date,
            end: row.end_date,
            status: row.status,
            booker: User {
                id: row.booker_id,
                name: row.booker_name,
                email: row.booker_email,
            },
            item: Item {
                id: row.item_id,
                name: row.item_name,
                description: row.item_description,
                available: row.item_available,
                owner_id: row.item_owner_id,
                request_id: row.item_request_id,
            },
        }
    }
}

/// Create booking request
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBooking {
    pub item_id: i64,
    #[serde(default, deserialize_with = "super::datetime::deserialize_optional")]
    pub start: Option<NaiveDateTime>,
    #[serde(default, deserialize_with = "super::datetime::deserialize_optional")]
    pub end: Option<NaiveDateTime>,
}

/// A booking request that passed every creation rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBooking {
    pub item_id: i64,
    pub item_name: String,
    pub item_owner_id: i64,
    pub booker_id: i64,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl CreateBooking {
    /// Apply the creation rules against the resolved item, in order:
    /// dates present, item available, dates well-formed, booker not owner.
    pub fn admit(&self, booker_id: i64, item: &Item, now: NaiveDateTime) -> AppResult<NewBooking> {
        let (Some(start), Some(end)) = (self.start, self.end) else {
            tracing::warn!("Booking of item {} rejected: empty dates", item.id);
            return Err(AppError::BadRequest("Empty booking dates".to_string()));
        };

        if !item.available {
            tracing::warn!("Booking of item {} rejected: item not available", item.id);
            return Err(AppError::BadRequest("Item not available for booking".to_string()));
        }

        if start < now || end <= start {
            tracing::warn!("Booking of item {} rejected: dates {} - {}", item.id, start, end);
            return Err(AppError::BadRequest("Not correct booking dates".to_string()));
        }

        if item.owner_id == booker_id {
            tracing::warn!("User {} tried to book own item {}", booker_id, item.id);
            return Err(AppError::NotFound("Item belong to owner".to_string()));
        }

        Ok(NewBooking {
            item_id: item.id,
            item_name: item.name.clone(),
            item_owner_id: item.owner_id,
            booker_id,
            start,
            end,
        })
    }
}

/// Query parameters for booking listings
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BookingListQuery {
    /// ALL, WAITING, APPROVED, REJECTED, PAST, CURRENT or FUTURE
    pub state: Option<String>,
    /// Zero-based page index
    pub from: Option<i64>,
    /// Page length
    pub size: Option<i64>,
}

impl BookingListQuery {
    pub fn page_params(&self) -> PageParams {
        PageParams {
            from: self.from,
            size: self.size,
        }
    }
}

/// Query parameters for the owner's decision
#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ApproveQuery {
    pub approved: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2023, 10, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn item(owner_id: i64, available: bool) -> Item {
        Item {
            id: 1,
            name: "Drill".to_string(),
            description: "Cordless drill".to_string(),
            available,
            owner_id,
            request_id: None,
        }
    }

    fn request(start: Option<NaiveDateTime>, end: Option<NaiveDateTime>) -> CreateBooking {
        CreateBooking { item_id: 1, start, end }
    }

    #[test]
    fn test_status_only_leaves_waiting() {
        assert_eq!(BookingStatus::Waiting.decide(true).unwrap(), BookingStatus::Approved);
        assert_eq!(BookingStatus::Waiting.decide(false).unwrap(), BookingStatus::Rejected);

        for approved in [true, false] {
            let err = BookingStatus::Approved.decide(approved).unwrap_err();
            assert_eq!(err.to_string(), "Already Approved");
            assert!(BookingStatus::Rejected.decide(approved).is_err());
        }
    }

    fn stored(status: BookingStatus) -> Booking {
        Booking {
            id: 7,
            start: at(20, 10),
            end: at(21, 10),
            status,
            booker_id: 2,
            item_id: 1,
            item_name: "Drill".to_string(),
            item_owner_id: 1,
        }
    }

    #[test]
    fn test_decision_by_owner() {
        let booking = stored(BookingStatus::Waiting);
        assert_eq!(booking.check_decision(1, true).unwrap(), BookingStatus::Approved);
        assert_eq!(booking.check_decision(1, false).unwrap(), BookingStatus::Rejected);

        let err = stored(BookingStatus::Rejected).check_decision(1, true).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
        assert_eq!(err.to_string(), "Booking already rejected");
    }

    #[test]
    fn test_decision_by_non_owner_is_not_found() {
        for actor in [2, 3] {
            let err = stored(BookingStatus::Waiting).check_decision(actor, true).unwrap_err();
            assert!(matches!(err, AppError::NotFound(_)));
        }
    }

    #[test]
    fn test_already_approved_is_reported_before_ownership() {
        let err = stored(BookingStatus::Approved).check_decision(3, false).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
        assert_eq!(err.to_string(), "Already Approved");
    }

    #[test]
    fn test_create_booking_accepts_minute_precision() {
        let request: CreateBooking = serde_json::from_str(
            r#"{"itemId": 1, "start": "2023-10-20T10:00", "end": "2023-10-21T10:00:00"}"#,
        )
        .unwrap();
        assert_eq!(request.start, Some(at(20, 10)));
        assert_eq!(request.end, Some(at(21, 10)));

        let request: CreateBooking = serde_json::from_str(r#"{"itemId": 1, "end": null}"#).unwrap();
        assert_eq!(request.start, None);
        assert_eq!(request.end, None);

        assert!(serde_json::from_str::<CreateBooking>(r#"{"itemId": 1, "start": "tomorrow"}"#).is_err());
    }

    #[test]
    fn test_state_tokens_are_case_sensitive() {
        assert_eq!(BookingState::parse(None).unwrap(), BookingState::All);
        assert_eq!(BookingState::parse(Some("FUTURE")).unwrap(), BookingState::Future);
        assert_eq!(BookingState::parse(Some("CURRENT")).unwrap(), BookingState::Current);

        let err = BookingState::parse(Some("bogus")).unwrap_err();
        assert_eq!(err.to_string(), "Unknown state: bogus");
        assert!(BookingState::parse(Some("future")).is_err());
    }

    #[test]
    fn test_only_time_filters_use_the_clock() {
        assert!(BookingState::Past.is_temporal());
        assert!(!BookingState::Waiting.is_temporal());
        assert_eq!(BookingState::All.predicate(), None);
        assert_eq!(BookingState::Future.predicate(), Some("b.start_date > $2"));
        assert!(!BookingState::Rejected.predicate().unwrap().contains('$'));
    }

    #[test]
    fn test_admit_valid_booking() {
        let now = at(19, 10);
        let booking = request(Some(at(20, 10)), Some(at(21, 10)))
            .admit(2, &item(1, true), now)
            .unwrap();

        assert_eq!(booking.booker_id, 2);
        assert_eq!(booking.item_owner_id, 1);
        assert_eq!(booking.item_name, "Drill");
    }

    #[test]
    fn test_admit_rejects_bad_windows() {
        let now = at(19, 10);
        let available = item(1, true);

        let err = request(None, Some(at(21, 10))).admit(2, &available, now).unwrap_err();
        assert_eq!(err.to_string(), "Empty booking dates");

        for (start, end) in [
            (at(18, 10), at(21, 10)), // starts in the past
            (at(21, 10), at(20, 10)), // ends before start
            (at(20, 10), at(20, 10)), // zero length
        ] {
            let err = request(Some(start), Some(end)).admit(2, &available, now).unwrap_err();
            assert_eq!(err.to_string(), "Not correct booking dates");
        }
    }

    #[test]
    fn test_admit_rejects_unavailable_item_and_owner() {
        let now = at(19, 10);
        let window = request(Some(at(20, 10)), Some(at(21, 10)));

        let err = window.admit(2, &item(1, false), now).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));

        let err = window.admit(1, &item(1, true), now).unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn test_details_row_resolves_booker_and_item() {
        let row = BookingDetailsRow {
            id: 5,
            start_date: at(20, 10),
            end_date: at(21, 10),
            status: BookingStatus::Waiting,
            booker_id: 2,
            booker_name: "Bob".to_string(),
            booker_email: "bob@example.com".to_string(),
            item_id: 1,
            item_name: "Drill".to_string(),
            item_description: "Cordless drill".to_string(),
            item_available: true,
            item_owner_id: 1,
            item_request_id: None,
        };

        let details = BookingDetails::from(row);
        assert_eq!(details.booker.name, "Bob");
        assert_eq!(details.item.owner_id, 1);
        assert!(details.is_party(1));
        assert!(details.is_party(2));
        assert!(!details.is_party(3));

        let json = serde_json::to_value(&details).unwrap();
        assert_eq!(json["status"], "WAITING");
        assert_eq!(json["start"], "2023-10-20T10:00:00");
        assert_eq!(json["item"]["ownerId"], 1);
    }
}
