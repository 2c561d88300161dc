use chrono::NaiveDate;
use derive_new::new;
use garde::Validate;
use kernel::model::{
    availability::{RoomAvailability, SlotAvailability},
    id::{RoomId, SlotId, UserId},
    room::{
        event::{CreateRoom, UpdateRoom},
        Room, RoomStatus,
    },
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomStatusName {
    Available,
    Disabled,
}

impl From<RoomStatus> for RoomStatusName {
    fn from(value: RoomStatus) -> Self {
        match value {
            RoomStatus::Available => Self::Available,
            RoomStatus::Disabled => Self::Disabled,
        }
    }
}

impl From<RoomStatusName> for RoomStatus {
    fn from(value: RoomStatusName) -> Self {
        match value {
            RoomStatusName::Available => Self::Available,
            RoomStatusName::Disabled => Self::Disabled,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoomRequest {
    #[garde(length(min = 1))]
    pub room_name: String,
    #[garde(skip)]
    pub image_url: Option<String>,
    #[garde(range(min = 0))]
    pub price_per_day: i32,
    #[garde(skip)]
    pub status: Option<RoomStatusName>,
}

impl From<CreateRoomRequest> for CreateRoom {
    fn from(value: CreateRoomRequest) -> Self {
        let CreateRoomRequest {
            room_name,
            image_url,
            price_per_day,
            status,
        } = value;
        CreateRoom {
            room_name,
            image_url,
            price_per_day,
            status: status.map(RoomStatus::from).unwrap_or(RoomStatus::Available),
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRoomRequest {
    #[garde(inner(length(min = 1)))]
    pub room_name: Option<String>,
    #[garde(skip)]
    pub image_url: Option<String>,
    #[garde(inner(range(min = 0)))]
    pub price_per_day: Option<i32>,
    #[garde(skip)]
    pub status: Option<RoomStatusName>,
}

#[derive(new)]
pub struct UpdateRoomRequestWithIds(RoomId, UserId, UpdateRoomRequest);

impl From<UpdateRoomRequestWithIds> for UpdateRoom {
    fn from(value: UpdateRoomRequestWithIds) -> Self {
        let UpdateRoomRequestWithIds(
            room_id,
            requested_user,
            UpdateRoomRequest {
                room_name,
                image_url,
                price_per_day,
                status,
            },
        ) = value;
        UpdateRoom {
            room_id,
            room_name,
            image_url,
            price_per_day,
            status: status.map(RoomStatus::from),
            requested_user,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomsResponse {
    pub items: Vec<RoomResponse>,
}

impl From<Vec<Room>> for RoomsResponse {
    fn from(value: Vec<Room>) -> Self {
        Self {
            items: value.into_iter().map(RoomResponse::from).collect(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomResponse {
    pub room_id: RoomId,
    pub room_name: String,
    pub image_url: Option<String>,
    pub price_per_day: i32,
    pub status: RoomStatusName,
}

impl From<Room> for RoomResponse {
    fn from(value: Room) -> Self {
        let Room {
            room_id,
            room_name,
            image_url,
            price_per_day,
            status,
        } = value;
        Self {
            room_id,
            room_name,
            image_url,
            price_per_day,
            status: status.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    pub date: NaiveDate,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomAvailabilitiesResponse {
    pub items: Vec<RoomAvailabilityResponse>,
}

impl From<Vec<RoomAvailability>> for RoomAvailabilitiesResponse {
    fn from(value: Vec<RoomAvailability>) -> Self {
        Self {
            items: value.into_iter().map(RoomAvailabilityResponse::from).collect(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomAvailabilityResponse {
    pub room_id: RoomId,
    pub room_name: String,
    pub image_url: Option<String>,
    pub room_status: RoomStatusName,
    pub slots: Vec<SlotStatusResponse>,
}

impl From<RoomAvailability> for RoomAvailabilityResponse {
    fn from(value: RoomAvailability) -> Self {
        let RoomAvailability {
            room_id,
            room_name,
            image_url,
            room_status,
            slots,
        } = value;
        Self {
            room_id,
            room_name,
            image_url,
            room_status: room_status.into(),
            slots: slots.into_iter().map(SlotStatusResponse::from).collect(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotStatusResponse {
    pub slot_id: SlotId,
    pub label: String,
    pub status: String,
}

impl From<SlotAvailability> for SlotStatusResponse {
    fn from(value: SlotAvailability) -> Self {
        let SlotAvailability {
            slot_id,
            label,
            status,
        } = value;
        Self {
            slot_id,
            label,
            // clients match on the literal "Free"
            status: match status {
                None => "Free".to_string(),
                Some(s) => s.as_str().to_string(),
            },
        }
    }
}
