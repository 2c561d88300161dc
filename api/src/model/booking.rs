use chrono::NaiveDate;
use garde::Validate;
use kernel::model::{
    booking::{event::BookingDecision, BookingSummary},
    id::{BookingId, RoomId, SlotId},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    #[garde(skip)]
    pub room_id: RoomId,
    #[garde(skip)]
    pub slot_id: SlotId,
    #[garde(skip)]
    pub booking_date: NaiveDate,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedBookingResponse {
    pub booking_id: BookingId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingDecisionName {
    Approved,
    Rejected,
}

impl From<BookingDecisionName> for BookingDecision {
    fn from(value: BookingDecisionName) -> Self {
        match value {
            BookingDecisionName::Approved => Self::Approved,
            BookingDecisionName::Rejected => Self::Rejected,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookingStatusRequest {
    pub new_status: BookingDecisionName,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingsResponse {
    pub items: Vec<BookingSummaryResponse>,
}

impl From<Vec<BookingSummary>> for BookingsResponse {
    fn from(value: Vec<BookingSummary>) -> Self {
        Self {
            items: value.into_iter().map(BookingSummaryResponse::from).collect(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingSummaryResponse {
    pub booking_id: BookingId,
    pub booking_date: NaiveDate,
    pub status: String,
    pub room_name: String,
    pub image_url: Option<String>,
    pub price_per_day: i32,
    pub slot_label: String,
    pub user_name: String,
}

impl From<BookingSummary> for BookingSummaryResponse {
    fn from(value: BookingSummary) -> Self {
        let BookingSummary {
            booking_id,
            booking_date,
            status,
            room_name,
            image_url,
            price_per_day,
            slot_label,
            user_name,
        } = value;
        Self {
            booking_id,
            booking_date,
            status: status.as_str().to_string(),
            room_name,
            image_url,
            price_per_day,
            slot_label,
            user_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decision_names_deserialize_from_the_wire_form() {
        let req: UpdateBookingStatusRequest =
            serde_json::from_str(r#"{"newStatus": "approved"}"#).unwrap();
        assert!(matches!(req.new_status, BookingDecisionName::Approved));

        let invalid = serde_json::from_str::<UpdateBookingStatusRequest>(
            r#"{"newStatus": "cancelled"}"#,
        );
        assert!(invalid.is_err());
    }
}
