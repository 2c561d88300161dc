use crate::model::{
    booking::BookingStatus,
    id::{RoomId, SlotId},
    room::RoomStatus,
};

/// One row of the availability projection: a room and the status of every
/// slot on the requested date, slots ordered by slot id ascending.
#[derive(Debug)]
pub struct RoomAvailability {
    pub room_id: RoomId,
    pub room_name: String,
    pub image_url: Option<String>,
    pub room_status: RoomStatus,
    pub slots: Vec<SlotAvailability>,
}

#[derive(Debug)]
pub struct SlotAvailability {
    pub slot_id: SlotId,
    pub label: String,
    /// `None` means the slot is free on the requested date; otherwise the
    /// status of the single active booking covering it.
    pub status: Option<BookingStatus>,
}
