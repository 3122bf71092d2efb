//! Data models for ShareIt

pub mod booking;
pub mod comment;
pub mod datetime;
pub mod item;
pub mod pagination;
pub mod request;
pub mod user;

// Re-export commonly used types
pub use booking::{Booking, BookingDetails, BookingShort, BookingState, BookingStatus};
pub use comment::Comment;
pub use item::{Item, ItemDetails};
pub use pagination::{Page, PageParams};
pub use request::{ItemRequest, ItemRequestDetails};
pub use user::User;
