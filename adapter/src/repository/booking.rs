use crate::database::{
    model::booking::{BookingRow, BookingSummaryRow},
    ConnectionPool,
};
use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    booking::{
        event::{CancelBooking, CreateBooking, DecideBooking},
        BookingStatus, BookingSummary,
    },
    id::{BookingId, HistoryId, RoomId, SlotId, UserId},
    room::RoomStatus,
};
use kernel::repository::booking::BookingRepository;
use shared::error::{AppError, AppResult};
use sqlx::types::chrono::NaiveDate;
use std::str::FromStr;

#[derive(new)]
pub struct BookingRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl BookingRepository for BookingRepositoryImpl {
    async fn create(&self, event: CreateBooking) -> AppResult<BookingId> {
        let mut tx = self.db.begin().await?;

        // The room must exist and still be open for booking.
        let room_status = sqlx::query_scalar::<_, String>(
            r#"
                SELECT status FROM rooms WHERE room_id = $1
            "#,
        )
        .bind(event.room_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        let Some(room_status) = room_status else {
            return Err(AppError::EntityNotFound(format!(
                "room ({}) was not found",
                event.room_id
            )));
        };
        if RoomStatus::from_str(&room_status)? == RoomStatus::Disabled {
            return Err(AppError::UnprocessableEntity(format!(
                "room ({}) is disabled",
                event.room_id
            )));
        }

        // One active booking per user per day. The conflicting booking is
        // returned so the client can point the user at it.
        let existing = sqlx::query_as::<_, BookingRow>(
            r#"
                SELECT booking_id, room_id, slot_id, user_id, booking_date, status
                FROM bookings
                WHERE user_id = $1
                  AND booking_date = $2
                  AND status IN ('pending', 'approved')
            "#,
        )
        .bind(event.user_id)
        .bind(event.booking_date)
        .fetch_optional(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        if let Some(existing) = existing {
            return Err(AppError::UserAlreadyBooked {
                existing_booking_id: existing.booking_id.raw(),
                booking_date: existing.booking_date,
            });
        }

        // Serialize concurrent admissions on the same (room, slot, date)
        // key. The advisory lock covers the absent-row case, which a row
        // lock cannot; the FOR UPDATE below pins an existing active row
        // against a concurrent transition. Whoever acquires the lock
        // second re-reads after the winner commits and fails SlotTaken.
        self.lock_slot_key(&mut tx, event.room_id, event.slot_id, event.booking_date)
            .await?;

        let taken = sqlx::query_as::<_, BookingRow>(
            r#"
                SELECT booking_id, room_id, slot_id, user_id, booking_date, status
                FROM bookings
                WHERE room_id = $1
                  AND slot_id = $2
                  AND booking_date = $3
                  AND status IN ('pending', 'approved')
                FOR UPDATE
            "#,
        )
        .bind(event.room_id)
        .bind(event.slot_id)
        .bind(event.booking_date)
        .fetch_optional(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        if taken.is_some() {
            return Err(AppError::SlotTaken);
        }

        let booking_id = BookingId::new();
        let res = sqlx::query(
            r#"
                INSERT INTO bookings (booking_id, room_id, slot_id, user_id, booking_date, status)
                VALUES ($1, $2, $3, $4, $5, 'pending')
            "#,
        )
        .bind(booking_id)
        .bind(event.room_id)
        .bind(event.slot_id)
        .bind(event.user_id)
        .bind(event.booking_date)
        .execute(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "no booking record has been created".into(),
            ));
        }

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(booking_id)
    }

    async fn decide(&self, event: DecideBooking) -> AppResult<()> {
        let new_status = event.decision.as_status();
        let mut tx = self.db.begin().await?;

        // Conditional update: only a pending booking may be decided. Zero
        // rows folds "no such booking" and "already decided" into one
        // outcome; callers cannot tell which occurred.
        let res = sqlx::query(
            r#"
                UPDATE bookings
                SET status = $1
                WHERE booking_id = $2 AND status = 'pending'
            "#,
        )
        .bind(new_status.as_str())
        .bind(event.booking_id)
        .execute(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NotFoundOrAlreadyProcessed);
        }

        let subject = sqlx::query_scalar::<_, UserId>(
            r#"
                SELECT user_id FROM bookings WHERE booking_id = $1
            "#,
        )
        .bind(event.booking_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        // The decision and its audit entry land together or not at all.
        self.append_history(&mut tx, event.booking_id, subject, event.decided_by, new_status)
            .await?;

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(())
    }

    async fn cancel(&self, event: CancelBooking) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        let booking = sqlx::query_as::<_, BookingRow>(
            r#"
                SELECT booking_id, room_id, slot_id, user_id, booking_date, status
                FROM bookings
                WHERE booking_id = $1
                FOR UPDATE
            "#,
        )
        .bind(event.booking_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        let Some(booking) = booking else {
            return Err(AppError::EntityNotFound(format!(
                "booking ({}) was not found",
                event.booking_id
            )));
        };

        // Owners may cancel their own booking; staff and lecturers may
        // cancel anyone's.
        if !event.requested_role.is_staff_level() && booking.user_id != event.requested_user {
            return Err(AppError::ForbiddenOperation);
        }

        // No precondition on the current status: cancelling an already
        // decided booking is accepted idempotently.
        let res = sqlx::query(
            r#"
                UPDATE bookings SET status = 'cancelled' WHERE booking_id = $1
            "#,
        )
        .bind(event.booking_id)
        .execute(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "no booking record has been cancelled".into(),
            ));
        }

        tx.commit().await.map_err(AppError::TransactionError)?;

        // The audit append deliberately happens after the commit: a failed
        // history write must not undo a cancellation the caller already
        // saw succeed. Postgres would abort the whole transaction on the
        // failed insert, so the tolerant append cannot share it.
        if let Err(e) = self
            .append_history_on_pool(
                event.booking_id,
                booking.user_id,
                event.requested_user,
                BookingStatus::Cancelled,
            )
            .await
        {
            tracing::warn!(
                error = ?e,
                booking_id = %event.booking_id,
                "failed to record cancellation history"
            );
        }

        Ok(())
    }

    async fn find_active_by_user_id(&self, user_id: UserId) -> AppResult<Vec<BookingSummary>> {
        sqlx::query_as::<_, BookingSummaryRow>(
            r#"
                SELECT
                    b.booking_id,
                    b.booking_date,
                    b.status,
                    r.room_name,
                    r.image_url,
                    r.price_per_day,
                    ts.label AS slot_label,
                    u.user_name
                FROM bookings AS b
                INNER JOIN rooms AS r ON b.room_id = r.room_id
                INNER JOIN time_slots AS ts ON b.slot_id = ts.slot_id
                INNER JOIN users AS u ON b.user_id = u.user_id
                WHERE b.user_id = $1
                  AND b.status IN ('pending', 'approved')
                ORDER BY b.booking_date DESC, b.slot_id ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?
        .into_iter()
        .map(BookingSummary::try_from)
        .collect()
    }

    async fn find_pending_all(&self) -> AppResult<Vec<BookingSummary>> {
        sqlx::query_as::<_, BookingSummaryRow>(
            r#"
                SELECT
                    b.booking_id,
                    b.booking_date,
                    b.status,
                    r.room_name,
                    r.image_url,
                    r.price_per_day,
                    ts.label AS slot_label,
                    u.user_name
                FROM bookings AS b
                INNER JOIN rooms AS r ON b.room_id = r.room_id
                INNER JOIN time_slots AS ts ON b.slot_id = ts.slot_id
                INNER JOIN users AS u ON b.user_id = u.user_id
                WHERE b.status = 'pending'
                ORDER BY b.booking_date ASC, b.slot_id ASC
            "#,
        )
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?
        .into_iter()
        .map(BookingSummary::try_from)
        .collect()
    }
}

impl BookingRepositoryImpl {
    // Transaction-scoped pessimistic lock on the admission key; released
    // automatically at commit or rollback.
    async fn lock_slot_key(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        room_id: RoomId,
        slot_id: SlotId,
        booking_date: NaiveDate,
    ) -> AppResult<()> {
        sqlx::query(
            r#"
                SELECT pg_advisory_xact_lock(hashtextextended($1, 0))
            "#,
        )
        .bind(format!("{room_id}:{slot_id}:{booking_date}"))
        .execute(&mut **tx)
        .await
        .map_err(AppError::SpecificOperationError)?;
        Ok(())
    }

    async fn append_history(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        booking_id: BookingId,
        subject: UserId,
        actor: UserId,
        action: BookingStatus,
    ) -> AppResult<()> {
        let res = sqlx::query(
            r#"
                INSERT INTO history (history_id, booking_id, user_id, actor_id, action)
                VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(HistoryId::new())
        .bind(booking_id)
        .bind(subject)
        .bind(actor)
        .bind(action.as_str())
        .execute(&mut **tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "no history record has been created".into(),
            ));
        }

        Ok(())
    }

    // Best-effort variant used by the cancellation path.
    async fn append_history_on_pool(
        &self,
        booking_id: BookingId,
        subject: UserId,
        actor: UserId,
        action: BookingStatus,
    ) -> AppResult<()> {
        sqlx::query(
            r#"
                INSERT INTO history (history_id, booking_id, user_id, actor_id, action)
                VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(HistoryId::new())
        .bind(booking_id)
        .bind(subject)
        .bind(actor)
        .bind(action.as_str())
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel::model::{booking::event::BookingDecision, role::Role};
    use std::str::FromStr;
    use uuid::Uuid;

    fn student1() -> UserId {
        UserId::from(Uuid::parse_str("00000000-0000-4000-8000-000000000001").unwrap())
    }

    fn student2() -> UserId {
        UserId::from(Uuid::parse_str("00000000-0000-4000-8000-000000000002").unwrap())
    }

    fn staff1() -> UserId {
        UserId::from(Uuid::parse_str("00000000-0000-4000-8000-000000000003").unwrap())
    }

    fn room_a() -> RoomId {
        RoomId::from(Uuid::parse_str("00000000-0000-4000-8000-000000000201").unwrap())
    }

    fn room_b() -> RoomId {
        RoomId::from(Uuid::parse_str("00000000-0000-4000-8000-000000000202").unwrap())
    }

    fn room_disabled() -> RoomId {
        RoomId::from(Uuid::parse_str("00000000-0000-4000-8000-000000000203").unwrap())
    }

    // Slots are reference data seeded by migration.
    fn slot(n: u8) -> SlotId {
        SlotId::from(
            Uuid::parse_str(&format!("00000000-0000-4000-8000-00000000010{n}")).unwrap(),
        )
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    async fn status_of(pool: &sqlx::PgPool, booking_id: BookingId) -> anyhow::Result<BookingStatus> {
        let raw = sqlx::query_scalar::<_, String>(
            "SELECT status FROM bookings WHERE booking_id = $1",
        )
        .bind(booking_id)
        .fetch_one(pool)
        .await?;
        Ok(BookingStatus::from_str(&raw)?)
    }

    async fn history_actions_of(
        pool: &sqlx::PgPool,
        booking_id: BookingId,
    ) -> anyhow::Result<Vec<String>> {
        Ok(sqlx::query_scalar::<_, String>(
            "SELECT action FROM history WHERE booking_id = $1 ORDER BY action_time",
        )
        .bind(booking_id)
        .fetch_all(pool)
        .await?)
    }

    #[sqlx::test(migrations = "../migrations", fixtures("./fixtures/common.sql"))]
    async fn admitted_booking_starts_pending(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = BookingRepositoryImpl::new(ConnectionPool::new(pool.clone()));

        let booking_id = repo
            .create(CreateBooking::new(room_a(), slot(1), student1(), date()))
            .await?;

        assert_eq!(status_of(&pool, booking_id).await?, BookingStatus::Pending);

        let active = repo.find_active_by_user_id(student1()).await?;
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].booking_id, booking_id);
        assert_eq!(active[0].room_name, "Meeting Room A");
        assert_eq!(active[0].user_name, "somchai");
        Ok(())
    }

    #[sqlx::test(migrations = "../migrations", fixtures("./fixtures/common.sql"))]
    async fn second_booking_same_day_is_rejected(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = BookingRepositoryImpl::new(ConnectionPool::new(pool));

        let first = repo
            .create(CreateBooking::new(room_a(), slot(1), student1(), date()))
            .await?;

        // Different room and slot; the daily cap alone rejects it.
        let second = repo
            .create(CreateBooking::new(room_b(), slot(2), student1(), date()))
            .await;

        match second {
            Err(AppError::UserAlreadyBooked {
                existing_booking_id,
                booking_date,
            }) => {
                assert_eq!(existing_booking_id, first.raw());
                assert_eq!(booking_date, date());
            }
            other => panic!("expected UserAlreadyBooked, got {other:?}"),
        }

        // A different date is fine.
        let tomorrow = date().succ_opt().unwrap();
        repo.create(CreateBooking::new(room_b(), slot(2), student1(), tomorrow))
            .await?;
        Ok(())
    }

    #[sqlx::test(migrations = "../migrations", fixtures("./fixtures/common.sql"))]
    async fn taken_slot_is_rejected(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = BookingRepositoryImpl::new(ConnectionPool::new(pool));

        repo.create(CreateBooking::new(room_a(), slot(1), student1(), date()))
            .await?;

        let second = repo
            .create(CreateBooking::new(room_a(), slot(1), student2(), date()))
            .await;
        assert!(matches!(second, Err(AppError::SlotTaken)));

        // The same slot on another date is independent.
        let tomorrow = date().succ_opt().unwrap();
        repo.create(CreateBooking::new(room_a(), slot(1), student2(), tomorrow))
            .await?;
        Ok(())
    }

    #[sqlx::test(migrations = "../migrations", fixtures("./fixtures/common.sql"))]
    async fn concurrent_admissions_for_same_key_admit_exactly_one(
        pool: sqlx::PgPool,
    ) -> anyhow::Result<()> {
        let repo = BookingRepositoryImpl::new(ConnectionPool::new(pool));

        let (r1, r2) = tokio::join!(
            repo.create(CreateBooking::new(room_a(), slot(1), student1(), date())),
            repo.create(CreateBooking::new(room_a(), slot(1), student2(), date())),
        );

        let winners = [r1.is_ok(), r2.is_ok()].iter().filter(|ok| **ok).count();
        assert_eq!(winners, 1);

        let loser = if r1.is_ok() { r2 } else { r1 };
        assert!(matches!(loser, Err(AppError::SlotTaken)));
        Ok(())
    }

    #[sqlx::test(migrations = "../migrations", fixtures("./fixtures/common.sql"))]
    async fn unknown_or_disabled_room_is_rejected(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = BookingRepositoryImpl::new(ConnectionPool::new(pool));

        let unknown = RoomId::new();
        let res = repo
            .create(CreateBooking::new(unknown, slot(1), student1(), date()))
            .await;
        assert!(matches!(res, Err(AppError::EntityNotFound(_))));

        let res = repo
            .create(CreateBooking::new(room_disabled(), slot(1), student1(), date()))
            .await;
        assert!(matches!(res, Err(AppError::UnprocessableEntity(_))));
        Ok(())
    }

    #[sqlx::test(migrations = "../migrations", fixtures("./fixtures/common.sql"))]
    async fn decision_is_recorded_exactly_once(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = BookingRepositoryImpl::new(ConnectionPool::new(pool.clone()));

        let booking_id = repo
            .create(CreateBooking::new(room_a(), slot(1), student1(), date()))
            .await?;

        repo.decide(DecideBooking::new(
            booking_id,
            BookingDecision::Approved,
            staff1(),
        ))
        .await?;

        assert_eq!(status_of(&pool, booking_id).await?, BookingStatus::Approved);
        assert_eq!(history_actions_of(&pool, booking_id).await?, ["approved"]);

        let subject = sqlx::query_scalar::<_, UserId>(
            "SELECT user_id FROM history WHERE booking_id = $1",
        )
        .bind(booking_id)
        .fetch_one(&pool)
        .await?;
        assert_eq!(subject, student1());

        let actor = sqlx::query_scalar::<_, UserId>(
            "SELECT actor_id FROM history WHERE booking_id = $1",
        )
        .bind(booking_id)
        .fetch_one(&pool)
        .await?;
        assert_eq!(actor, staff1());

        // A second decision finds no pending row.
        let second = repo
            .decide(DecideBooking::new(
                booking_id,
                BookingDecision::Rejected,
                staff1(),
            ))
            .await;
        assert!(matches!(second, Err(AppError::NotFoundOrAlreadyProcessed)));
        assert_eq!(status_of(&pool, booking_id).await?, BookingStatus::Approved);
        assert_eq!(history_actions_of(&pool, booking_id).await?, ["approved"]);
        Ok(())
    }

    #[sqlx::test(migrations = "../migrations", fixtures("./fixtures/common.sql"))]
    async fn deciding_a_missing_booking_reports_already_processed(
        pool: sqlx::PgPool,
    ) -> anyhow::Result<()> {
        let repo = BookingRepositoryImpl::new(ConnectionPool::new(pool));

        let res = repo
            .decide(DecideBooking::new(
                BookingId::new(),
                BookingDecision::Approved,
                staff1(),
            ))
            .await;
        assert!(matches!(res, Err(AppError::NotFoundOrAlreadyProcessed)));
        Ok(())
    }

    #[sqlx::test(migrations = "../migrations", fixtures("./fixtures/common.sql"))]
    async fn owner_can_cancel_their_own_booking(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = BookingRepositoryImpl::new(ConnectionPool::new(pool.clone()));

        let booking_id = repo
            .create(CreateBooking::new(room_a(), slot(1), student1(), date()))
            .await?;

        repo.cancel(CancelBooking::new(booking_id, student1(), Role::Student))
            .await?;

        assert_eq!(status_of(&pool, booking_id).await?, BookingStatus::Cancelled);
        assert_eq!(history_actions_of(&pool, booking_id).await?, ["cancelled"]);
        Ok(())
    }

    #[sqlx::test(migrations = "../migrations", fixtures("./fixtures/common.sql"))]
    async fn students_cannot_cancel_someone_elses_booking(
        pool: sqlx::PgPool,
    ) -> anyhow::Result<()> {
        let repo = BookingRepositoryImpl::new(ConnectionPool::new(pool.clone()));

        let booking_id = repo
            .create(CreateBooking::new(room_a(), slot(1), student1(), date()))
            .await?;

        let res = repo
            .cancel(CancelBooking::new(booking_id, student2(), Role::Student))
            .await;
        assert!(matches!(res, Err(AppError::ForbiddenOperation)));
        assert_eq!(status_of(&pool, booking_id).await?, BookingStatus::Pending);

        // Staff may cancel anyone's booking.
        repo.cancel(CancelBooking::new(booking_id, staff1(), Role::Staff))
            .await?;
        assert_eq!(status_of(&pool, booking_id).await?, BookingStatus::Cancelled);
        Ok(())
    }

    #[sqlx::test(migrations = "../migrations", fixtures("./fixtures/common.sql"))]
    async fn cancelling_a_missing_booking_is_not_found(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = BookingRepositoryImpl::new(ConnectionPool::new(pool));

        let res = repo
            .cancel(CancelBooking::new(BookingId::new(), student1(), Role::Student))
            .await;
        assert!(matches!(res, Err(AppError::EntityNotFound(_))));
        Ok(())
    }

    #[sqlx::test(migrations = "../migrations", fixtures("./fixtures/common.sql"))]
    async fn cancellation_survives_a_failed_audit_write(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = BookingRepositoryImpl::new(ConnectionPool::new(pool.clone()));

        let booking_id = repo
            .create(CreateBooking::new(room_a(), slot(1), student1(), date()))
            .await?;

        // Force every history insert to fail.
        sqlx::query("DROP TABLE history").execute(&pool).await?;

        repo.cancel(CancelBooking::new(booking_id, student1(), Role::Student))
            .await?;

        assert_eq!(status_of(&pool, booking_id).await?, BookingStatus::Cancelled);
        Ok(())
    }

    #[sqlx::test(migrations = "../migrations", fixtures("./fixtures/common.sql"))]
    async fn cancelled_slot_can_be_rebooked(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = BookingRepositoryImpl::new(ConnectionPool::new(pool));

        let booking_id = repo
            .create(CreateBooking::new(room_a(), slot(1), student1(), date()))
            .await?;
        repo.cancel(CancelBooking::new(booking_id, student1(), Role::Student))
            .await?;

        // Both the slot and the user's daily cap are released.
        repo.create(CreateBooking::new(room_a(), slot(1), student2(), date()))
            .await?;
        repo.create(CreateBooking::new(room_b(), slot(1), student1(), date()))
            .await?;
        Ok(())
    }

    #[sqlx::test(migrations = "../migrations", fixtures("./fixtures/common.sql"))]
    async fn pending_queue_lists_oldest_dates_first(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = BookingRepositoryImpl::new(ConnectionPool::new(pool));

        let tomorrow = date().succ_opt().unwrap();
        let later = repo
            .create(CreateBooking::new(room_a(), slot(1), student1(), tomorrow))
            .await?;
        let earlier = repo
            .create(CreateBooking::new(room_a(), slot(1), student2(), date()))
            .await?;

        let pending = repo.find_pending_all().await?;
        let ids: Vec<BookingId> = pending.iter().map(|b| b.booking_id).collect();
        assert_eq!(ids, [earlier, later]);
        Ok(())
    }
}
