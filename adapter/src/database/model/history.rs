use kernel::model::{
    booking::BookingStatus,
    history::HistoryRecord,
    id::{BookingId, HistoryId, UserId},
};
use shared::error::AppError;
use sqlx::types::chrono::{DateTime, NaiveDate, Utc};
use std::str::FromStr;

/// History joined with its booking/room/slot/user display data. The query
/// COALESCEs missing joins to placeholder labels, so the display columns
/// are always present.
#[derive(sqlx::FromRow)]
pub struct HistoryRow {
    pub history_id: HistoryId,
    pub booking_id: BookingId,
    pub user_id: UserId,
    pub actor_id: UserId,
    pub action: String,
    pub action_time: DateTime<Utc>,
    pub booking_date: Option<NaiveDate>,
    pub room_name: String,
    pub slot_label: String,
    pub user_name: String,
}

impl TryFrom<HistoryRow> for HistoryRecord {
    type Error = AppError;

    fn try_from(value: HistoryRow) -> Result<Self, Self::Error> {
        let HistoryRow {
            history_id,
            booking_id,
            user_id,
            actor_id,
            action,
            action_time,
            booking_date,
            room_name,
            slot_label,
            user_name,
        } = value;
        Ok(HistoryRecord {
            history_id,
            booking_id,
            subject_user_id: user_id,
            actor_user_id: actor_id,
            action: BookingStatus::from_str(&action)?,
            action_time,
            booking_date,
            room_name,
            slot_label,
            user_name,
        })
    }
}
