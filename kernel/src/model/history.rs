use crate::model::{
    booking::BookingStatus,
    id::{BookingId, HistoryId, UserId},
};
use chrono::{DateTime, NaiveDate, Utc};

/// An audit log entry joined with display data. The joins are best-effort:
/// the adapter substitutes placeholder labels where a join is missing
/// rather than failing the whole query.
#[derive(Debug)]
pub struct HistoryRecord {
    pub history_id: HistoryId,
    pub booking_id: BookingId,
    pub subject_user_id: UserId,
    pub actor_user_id: UserId,
    pub action: BookingStatus,
    pub action_time: DateTime<Utc>,
    pub booking_date: Option<NaiveDate>,
    pub room_name: String,
    pub slot_label: String,
    pub user_name: String,
}
