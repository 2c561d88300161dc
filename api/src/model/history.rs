use chrono::{DateTime, NaiveDate, Utc};
use kernel::model::{
    history::HistoryRecord,
    id::{BookingId, HistoryId, UserId},
};
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoriesResponse {
    pub items: Vec<HistoryResponse>,
}

impl From<Vec<HistoryRecord>> for HistoriesResponse {
    fn from(value: Vec<HistoryRecord>) -> Self {
        Self {
            items: value.into_iter().map(HistoryResponse::from).collect(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryResponse {
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

impl From<HistoryRecord> for HistoryResponse {
    fn from(value: HistoryRecord) -> Self {
        let HistoryRecord {
            history_id,
            booking_id,
            subject_user_id,
            actor_user_id,
            action,
            action_time,
            booking_date,
            room_name,
            slot_label,
            user_name,
        } = value;
        Self {
            history_id,
            booking_id,
            user_id: subject_user_id,
            actor_id: actor_user_id,
            action: action.as_str().to_string(),
            action_time,
            booking_date,
            room_name,
            slot_label,
            user_name,
        }
    }
}
