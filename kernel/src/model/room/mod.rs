pub mod event;

use crate::model::id::RoomId;
use shared::error::AppError;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomStatus {
    Available,
    Disabled,
}

impl RoomStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoomStatus::Available => "available",
            RoomStatus::Disabled => "disabled",
        }
    }
}

impl FromStr for RoomStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "available" => Ok(RoomStatus::Available),
            "disabled" => Ok(RoomStatus::Disabled),
            other => Err(AppError::ConversionEntityError(format!(
                "unknown room status: {other}"
            ))),
        }
    }
}

#[derive(Debug)]
pub struct Room {
    pub room_id: RoomId,
    pub room_name: String,
    pub image_url: Option<String>,
    pub price_per_day: i32,
    pub status: RoomStatus,
}
