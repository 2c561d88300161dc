use crate::database::{
    model::availability::{group_rows_by_room, AvailabilitySlotRow},
    ConnectionPool,
};
use async_trait::async_trait;
use chrono::NaiveDate;
use derive_new::new;
use kernel::model::availability::RoomAvailability;
use kernel::repository::availability::AvailabilityRepository;
use shared::error::{AppError, AppResult};

#[derive(new)]
pub struct AvailabilityRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl AvailabilityRepository for AvailabilityRepositoryImpl {
    async fn find_by_date(&self, date: NaiveDate) -> AppResult<Vec<RoomAvailability>> {
        // Every room × every slot; a pair is free unless an active booking
        // covers it on the requested date. The ordering is part of the
        // contract, clients render the result positionally.
        let rows = sqlx::query_as::<_, AvailabilitySlotRow>(
            r#"
                SELECT
                    r.room_id,
                    r.room_name,
                    r.image_url,
                    r.status AS room_status,
                    ts.slot_id,
                    ts.label AS slot_label,
                    b.status AS slot_status
                FROM rooms AS r
                CROSS JOIN time_slots AS ts
                LEFT JOIN bookings AS b
                    ON r.room_id = b.room_id
                    AND ts.slot_id = b.slot_id
                    AND b.booking_date = $1
                    AND b.status IN ('pending', 'approved')
                ORDER BY r.room_id ASC, ts.slot_id ASC
            "#,
        )
        .bind(date)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        group_rows_by_room(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::booking::BookingRepositoryImpl;
    use kernel::model::{
        booking::{event::CreateBooking, BookingStatus},
        id::{RoomId, SlotId, UserId},
    };
    use kernel::repository::booking::BookingRepository;
    use uuid::Uuid;

    fn student1() -> UserId {
        UserId::from(Uuid::parse_str("00000000-0000-4000-8000-000000000001").unwrap())
    }

    fn room_a() -> RoomId {
        RoomId::from(Uuid::parse_str("00000000-0000-4000-8000-000000000201").unwrap())
    }

    fn slot(n: u8) -> SlotId {
        SlotId::from(
            Uuid::parse_str(&format!("00000000-0000-4000-8000-00000000010{n}")).unwrap(),
        )
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    #[sqlx::test(migrations = "../migrations", fixtures("./fixtures/common.sql"))]
    async fn projection_covers_every_room_slot_pair(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let bookings = BookingRepositoryImpl::new(ConnectionPool::new(pool.clone()));
        let repo = AvailabilityRepositoryImpl::new(ConnectionPool::new(pool.clone()));

        bookings
            .create(CreateBooking::new(room_a(), slot(1), student1(), date()))
            .await?;

        let rooms = repo.find_by_date(date()).await?;

        // 3 fixture rooms (the disabled one included) × 4 seeded slots.
        assert_eq!(rooms.len(), 3);
        assert!(rooms.iter().all(|r| r.slots.len() == 4));

        // Rooms ascend by id, slots ascend by id within each room.
        let mut room_ids: Vec<_> = rooms.iter().map(|r| r.room_id).collect();
        room_ids.sort();
        assert_eq!(room_ids, rooms.iter().map(|r| r.room_id).collect::<Vec<_>>());
        for room in &rooms {
            let mut slot_ids: Vec<_> = room.slots.iter().map(|s| s.slot_id).collect();
            slot_ids.sort();
            assert_eq!(
                slot_ids,
                room.slots.iter().map(|s| s.slot_id).collect::<Vec<_>>()
            );
        }

        // Exactly the booked pair carries a status; the rest are free.
        let booked: Vec<_> = rooms
            .iter()
            .flat_map(|r| r.slots.iter().map(move |s| (r.room_id, s.slot_id, s.status)))
            .filter(|(_, _, status)| status.is_some())
            .collect();
        assert_eq!(booked, [(room_a(), slot(1), Some(BookingStatus::Pending))]);
        Ok(())
    }

    #[sqlx::test(migrations = "../migrations", fixtures("./fixtures/common.sql"))]
    async fn projection_ignores_other_dates_and_inactive_bookings(
        pool: sqlx::PgPool,
    ) -> anyhow::Result<()> {
        let bookings = BookingRepositoryImpl::new(ConnectionPool::new(pool.clone()));
        let repo = AvailabilityRepositoryImpl::new(ConnectionPool::new(pool.clone()));

        bookings
            .create(CreateBooking::new(room_a(), slot(1), student1(), date()))
            .await?;

        let other_day = repo.find_by_date(date().succ_opt().unwrap()).await?;
        assert!(other_day
            .iter()
            .flat_map(|r| r.slots.iter())
            .all(|s| s.status.is_none()));

        // A cancelled booking frees the pair again.
        sqlx::query("UPDATE bookings SET status = 'cancelled'")
            .execute(&pool)
            .await?;
        let after_cancel = repo.find_by_date(date()).await?;
        assert!(after_cancel
            .iter()
            .flat_map(|r| r.slots.iter())
            .all(|s| s.status.is_none()));
        Ok(())
    }
}
