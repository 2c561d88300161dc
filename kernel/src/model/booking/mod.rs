pub mod event;

use crate::model::id::{BookingId, RoomId, SlotId, UserId};
use chrono::NaiveDate;
use shared::error::AppError;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingStatus {
    Pending,
    Approved,
    Rejected,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Approved => "approved",
            BookingStatus::Rejected => "rejected",
            BookingStatus::Cancelled => "cancelled",
        }
    }

    /// Active bookings occupy their slot and count against the one-per-day
    /// cap; rejected and cancelled ones do not.
    pub fn is_active(&self) -> bool {
        matches!(self, BookingStatus::Pending | BookingStatus::Approved)
    }

    /// Only `pending` may transition; approved, rejected and cancelled are
    /// terminal (the permissive cancel path overwrites regardless).
    pub fn is_terminal(&self) -> bool {
        !matches!(self, BookingStatus::Pending)
    }
}

impl FromStr for BookingStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(BookingStatus::Pending),
            "approved" => Ok(BookingStatus::Approved),
            "rejected" => Ok(BookingStatus::Rejected),
            "cancelled" => Ok(BookingStatus::Cancelled),
            other => Err(AppError::ConversionEntityError(format!(
                "unknown booking status: {other}"
            ))),
        }
    }
}

#[derive(Debug)]
pub struct Booking {
    pub booking_id: BookingId,
    pub room_id: RoomId,
    pub slot_id: SlotId,
    pub booked_by: UserId,
    pub booking_date: NaiveDate,
    pub status: BookingStatus,
}

/// A booking joined with its room, slot and user display data, as rendered
/// in the user's own list and the staff pending queue.
#[derive(Debug)]
pub struct BookingSummary {
    pub booking_id: BookingId,
    pub booking_date: NaiveDate,
    pub status: BookingStatus,
    pub room_name: String,
    pub image_url: Option<String>,
    pub price_per_day: i32,
    pub slot_label: String,
    pub user_name: String,
}
