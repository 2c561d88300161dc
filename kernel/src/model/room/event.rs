use crate::model::{
    id::{RoomId, UserId},
    room::RoomStatus,
};

pub struct CreateRoom {
    pub room_name: String,
    pub image_url: Option<String>,
    pub price_per_day: i32,
    pub status: RoomStatus,
}

#[derive(Debug)]
pub struct UpdateRoom {
    pub room_id: RoomId,
    pub room_name: Option<String>,
    pub image_url: Option<String>,
    pub price_per_day: Option<i32>,
    pub status: Option<RoomStatus>,
    pub requested_user: UserId,
}

#[derive(Debug)]
pub struct DisableRoom {
    pub room_id: RoomId,
    pub requested_user: UserId,
}
