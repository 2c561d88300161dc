use crate::model::{
    booking::BookingStatus,
    id::{BookingId, RoomId, SlotId, UserId},
    role::Role,
};
use chrono::NaiveDate;
use derive_new::new;

#[derive(new)]
pub struct CreateBooking {
    pub room_id: RoomId,
    pub slot_id: SlotId,
    pub user_id: UserId,
    pub booking_date: NaiveDate,
}

/// The two decisions staff may take on a pending booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingDecision {
    Approved,
    Rejected,
}

impl BookingDecision {
    pub fn as_status(self) -> BookingStatus {
        match self {
            BookingDecision::Approved => BookingStatus::Approved,
            BookingDecision::Rejected => BookingStatus::Rejected,
        }
    }
}

#[derive(new)]
pub struct DecideBooking {
    pub booking_id: BookingId,
    pub decision: BookingDecision,
    pub decided_by: UserId,
}

#[derive(new)]
pub struct CancelBooking {
    pub booking_id: BookingId,
    pub requested_user: UserId,
    pub requested_role: Role,
}
