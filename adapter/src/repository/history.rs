use crate::database::{model::history::HistoryRow, ConnectionPool};
use async_trait::async_trait;
use derive_new::new;
use kernel::model::{history::HistoryRecord, id::UserId};
use kernel::repository::history::HistoryRepository;
use shared::error::{AppError, AppResult};

#[derive(new)]
pub struct HistoryRepositoryImpl {
    db: ConnectionPool,
}

// Display joins are LEFT JOINs with COALESCE placeholders so that a missing
// room, slot or user degrades the label instead of dropping the entry.
const HISTORY_SELECT: &str = r#"
    SELECT
        h.history_id,
        h.booking_id,
        h.user_id,
        h.actor_id,
        h.action,
        h.action_time,
        b.booking_date,
        COALESCE(r.room_name, 'Unknown Room') AS room_name,
        COALESCE(ts.label, 'N/A') AS slot_label,
        COALESCE(u.user_name, 'Unknown User') AS user_name
    FROM history AS h
    LEFT JOIN bookings AS b ON h.booking_id = b.booking_id
    LEFT JOIN rooms AS r ON b.room_id = r.room_id
    LEFT JOIN time_slots AS ts ON b.slot_id = ts.slot_id
    LEFT JOIN users AS u ON h.user_id = u.user_id
"#;

#[async_trait]
impl HistoryRepository for HistoryRepositoryImpl {
    async fn find_by_user_id(&self, user_id: UserId) -> AppResult<Vec<HistoryRecord>> {
        let sql = format!(
            "{HISTORY_SELECT} WHERE h.user_id = $1 ORDER BY b.booking_date DESC, h.action_time DESC"
        );
        sqlx::query_as::<_, HistoryRow>(&sql)
            .bind(user_id)
            .fetch_all(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?
            .into_iter()
            .map(HistoryRecord::try_from)
            .collect()
    }

    async fn find_all(&self) -> AppResult<Vec<HistoryRecord>> {
        let sql = format!("{HISTORY_SELECT} ORDER BY h.action_time DESC");
        sqlx::query_as::<_, HistoryRow>(&sql)
            .fetch_all(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?
            .into_iter()
            .map(HistoryRecord::try_from)
            .collect()
    }
}
