use crate::model::{
    booking::{
        event::{CancelBooking, CreateBooking, DecideBooking},
        BookingSummary,
    },
    id::{BookingId, UserId},
};
use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Admit a new booking request; fails when the user already holds an
    /// active booking for the date or the slot is taken.
    async fn create(&self, event: CreateBooking) -> AppResult<BookingId>;
    /// Approve or reject a pending booking together with its audit entry.
    async fn decide(&self, event: DecideBooking) -> AppResult<()>;
    /// Cancel a booking; owners may cancel their own, staff may cancel any.
    async fn cancel(&self, event: CancelBooking) -> AppResult<()>;
    /// The caller's active (pending or approved) bookings.
    async fn find_active_by_user_id(&self, user_id: UserId) -> AppResult<Vec<BookingSummary>>;
    /// All pending bookings, oldest date first, for the staff queue.
    async fn find_pending_all(&self) -> AppResult<Vec<BookingSummary>>;
}
