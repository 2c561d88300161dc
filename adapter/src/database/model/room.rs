use kernel::model::{
    id::RoomId,
    room::{Room, RoomStatus},
};
use shared::error::AppError;
use std::str::FromStr;

#[derive(sqlx::FromRow)]
pub struct RoomRow {
    pub room_id: RoomId,
    pub room_name: String,
    pub image_url: Option<String>,
    pub price_per_day: i32,
    pub status: String,
}

impl TryFrom<RoomRow> for Room {
    type Error = AppError;

    fn try_from(value: RoomRow) -> Result<Self, Self::Error> {
        let RoomRow {
            room_id,
            room_name,
            image_url,
            price_per_day,
            status,
        } = value;
        Ok(Room {
            room_id,
            room_name,
            image_url,
            price_per_day,
            status: RoomStatus::from_str(&status)?,
        })
    }
}
