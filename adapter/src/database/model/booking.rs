use kernel::model::{
    booking::{Booking, BookingStatus, BookingSummary},
    id::{BookingId, RoomId, SlotId, UserId},
};
use shared::error::AppError;
use sqlx::types::chrono::NaiveDate;
use std::str::FromStr;

#[derive(sqlx::FromRow)]
pub struct BookingRow {
    pub booking_id: BookingId,
    pub room_id: RoomId,
    pub slot_id: SlotId,
    pub user_id: UserId,
    pub booking_date: NaiveDate,
    pub status: String,
}

impl TryFrom<BookingRow> for Booking {
    type Error = AppError;

    fn try_from(value: BookingRow) -> Result<Self, Self::Error> {
        let BookingRow {
            booking_id,
            room_id,
            slot_id,
            user_id,
            booking_date,
            status,
        } = value;
        Ok(Booking {
            booking_id,
            room_id,
            slot_id,
            booked_by: user_id,
            booking_date,
            status: BookingStatus::from_str(&status)?,
        })
    }
}

// Used for both the caller's own list and the staff pending queue.
#[derive(sqlx::FromRow)]
pub struct BookingSummaryRow {
    pub booking_id: BookingId,
    pub booking_date: NaiveDate,
    pub status: String,
    pub room_name: String,
    pub image_url: Option<String>,
    pub price_per_day: i32,
    pub slot_label: String,
    pub user_name: String,
}

impl TryFrom<BookingSummaryRow> for BookingSummary {
    type Error = AppError;

    fn try_from(value: BookingSummaryRow) -> Result<Self, Self::Error> {
        let BookingSummaryRow {
            booking_id,
            booking_date,
            status,
            room_name,
            image_url,
            price_per_day,
            slot_label,
            user_name,
        } = value;
        Ok(BookingSummary {
            booking_id,
            booking_date,
            status: BookingStatus::from_str(&status)?,
            room_name,
            image_url,
            price_per_day,
            slot_label,
            user_name,
        })
    }
}
