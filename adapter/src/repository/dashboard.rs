use crate::database::ConnectionPool;
use async_trait::async_trait;
use derive_new::new;
use kernel::model::dashboard::DashboardSummary;
use kernel::repository::dashboard::DashboardRepository;
use shared::error::{AppError, AppResult};

#[derive(new)]
pub struct DashboardRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl DashboardRepository for DashboardRepositoryImpl {
    async fn summary(&self) -> AppResult<DashboardSummary> {
        let room_count = self.count("SELECT COUNT(*) FROM rooms").await?;
        let slot_count = self.count("SELECT COUNT(*) FROM time_slots").await?;
        let booked_today = self
            .count(
                r#"
                    SELECT COUNT(*) FROM bookings
                    WHERE booking_date = CURRENT_DATE
                      AND status IN ('pending', 'approved')
                "#,
            )
            .await?;
        let pending_bookings = self
            .count("SELECT COUNT(*) FROM bookings WHERE status = 'pending'")
            .await?;
        let disabled_rooms = self
            .count("SELECT COUNT(*) FROM rooms WHERE status = 'disabled'")
            .await?;

        let total_slots = room_count * slot_count;
        Ok(DashboardSummary {
            total_slots,
            free_slots_today: total_slots - booked_today,
            pending_bookings,
            disabled_rooms,
        })
    }
}

impl DashboardRepositoryImpl {
    async fn count(&self, sql: &str) -> AppResult<i64> {
        sqlx::query_scalar::<_, i64>(sql)
            .fetch_one(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::booking::BookingRepositoryImpl;
    use kernel::model::{
        booking::event::CreateBooking,
        id::{RoomId, SlotId, UserId},
    };
    use kernel::repository::booking::BookingRepository;
    use sqlx::types::chrono::NaiveDate;
    use uuid::Uuid;

    #[sqlx::test(migrations = "../migrations", fixtures("./fixtures/common.sql"))]
    async fn summary_counts_follow_the_bookings(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let bookings = BookingRepositoryImpl::new(ConnectionPool::new(pool.clone()));
        let repo = DashboardRepositoryImpl::new(ConnectionPool::new(pool.clone()));

        let empty = repo.summary().await?;
        // 3 fixture rooms × 4 seeded slots.
        assert_eq!(empty.total_slots, 12);
        assert_eq!(empty.free_slots_today, 12);
        assert_eq!(empty.pending_bookings, 0);
        assert_eq!(empty.disabled_rooms, 1);

        // Ask the database what "today" is so the assertion cannot drift
        // from the server's timezone.
        let today: NaiveDate = sqlx::query_scalar("SELECT CURRENT_DATE")
            .fetch_one(&pool)
            .await?;
        let student1 =
            UserId::from(Uuid::parse_str("00000000-0000-4000-8000-000000000001").unwrap());
        let room_a =
            RoomId::from(Uuid::parse_str("00000000-0000-4000-8000-000000000201").unwrap());
        let slot_1 =
            SlotId::from(Uuid::parse_str("00000000-0000-4000-8000-000000000101").unwrap());

        bookings
            .create(CreateBooking::new(room_a, slot_1, student1, today))
            .await?;

        let after = repo.summary().await?;
        assert_eq!(after.free_slots_today, 11);
        assert_eq!(after.pending_bookings, 1);
        Ok(())
    }
}
