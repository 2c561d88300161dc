use crate::model::{history::HistoryRecord, id::UserId};
use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait HistoryRepository: Send + Sync {
    // the caller's own audit trail
    async fn find_by_user_id(&self, user_id: UserId) -> AppResult<Vec<HistoryRecord>>;
    // the staff-wide audit trail across all users
    async fn find_all(&self) -> AppResult<Vec<HistoryRecord>>;
}
