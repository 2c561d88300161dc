use kernel::model::{
    availability::{RoomAvailability, SlotAvailability},
    booking::BookingStatus,
    id::{RoomId, SlotId},
    room::RoomStatus,
};
use shared::error::{AppError, AppResult};
use std::str::FromStr;

/// One row of the rooms × time_slots cross join; `slot_status` is the
/// LEFT-JOINed active booking's status, NULL when the pair is free.
#[derive(sqlx::FromRow)]
pub struct AvailabilitySlotRow {
    pub room_id: RoomId,
    pub room_name: String,
    pub image_url: Option<String>,
    pub room_status: String,
    pub slot_id: SlotId,
    pub slot_label: String,
    pub slot_status: Option<String>,
}

/// Folds the flat cross-join rows into one entry per room. Rows must
/// arrive ordered by room id, then slot id; the fold preserves that order,
/// which clients rely on positionally.
pub fn group_rows_by_room(rows: Vec<AvailabilitySlotRow>) -> AppResult<Vec<RoomAvailability>> {
    let mut rooms: Vec<RoomAvailability> = Vec::new();
    for row in rows {
        let slot = SlotAvailability {
            slot_id: row.slot_id,
            label: row.slot_label,
            status: row
                .slot_status
                .as_deref()
                .map(BookingStatus::from_str)
                .transpose()?,
        };
        match rooms.last_mut() {
            Some(last) if last.room_id == row.room_id => last.slots.push(slot),
            _ => rooms.push(RoomAvailability {
                room_id: row.room_id,
                room_name: row.room_name,
                image_url: row.image_url,
                room_status: RoomStatus::from_str(&row.room_status)?,
                slots: vec![slot],
            }),
        }
    }
    Ok(rooms)
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn row(
        room_id: RoomId,
        room_name: &str,
        slot_id: SlotId,
        slot_label: &str,
        slot_status: Option<&str>,
    ) -> AvailabilitySlotRow {
        AvailabilitySlotRow {
            room_id,
            room_name: room_name.into(),
            image_url: None,
            room_status: "available".into(),
            slot_id,
            slot_label: slot_label.into(),
            slot_status: slot_status.map(String::from),
        }
    }

    #[test]
    fn groups_rows_into_one_entry_per_room() -> AppResult<()> {
        let room_a = RoomId::from(Uuid::from_u128(1));
        let room_b = RoomId::from(Uuid::from_u128(2));
        let slot_1 = SlotId::from(Uuid::from_u128(10));
        let slot_2 = SlotId::from(Uuid::from_u128(20));

        let rooms = group_rows_by_room(vec![
            row(room_a, "Room A", slot_1, "Morning", Some("pending")),
            row(room_a, "Room A", slot_2, "Afternoon", None),
            row(room_b, "Room B", slot_1, "Morning", None),
            row(room_b, "Room B", slot_2, "Afternoon", Some("approved")),
        ])?;

        assert_eq!(rooms.len(), 2);
        assert_eq!(rooms[0].room_id, room_a);
        assert_eq!(rooms[0].slots.len(), 2);
        assert_eq!(rooms[0].slots[0].status, Some(BookingStatus::Pending));
        assert_eq!(rooms[0].slots[1].status, None);
        assert_eq!(rooms[1].room_id, room_b);
        assert_eq!(rooms[1].slots[1].status, Some(BookingStatus::Approved));
        Ok(())
    }

    #[test]
    fn preserves_the_incoming_slot_order() -> AppResult<()> {
        let room = RoomId::new();
        let slots: Vec<SlotId> = (0..4_u128).map(|i| SlotId::from(Uuid::from_u128(i))).collect();
        let rows = slots
            .iter()
            .map(|s| row(room, "Room", *s, "slot", None))
            .collect();

        let rooms = group_rows_by_room(rows)?;
        assert_eq!(rooms.len(), 1);
        let grouped: Vec<SlotId> = rooms[0].slots.iter().map(|s| s.slot_id).collect();
        assert_eq!(grouped, slots);
        Ok(())
    }

    #[test]
    fn unknown_status_fails_the_projection() {
        let rooms = group_rows_by_room(vec![row(
            RoomId::new(),
            "Room",
            SlotId::new(),
            "Morning",
            Some("blocked"),
        )]);
        assert!(matches!(rooms, Err(AppError::ConversionEntityError(_))));
    }

    #[test]
    fn empty_input_yields_no_rooms() -> AppResult<()> {
        assert!(group_rows_by_room(vec![])?.is_empty());
        Ok(())
    }
}
